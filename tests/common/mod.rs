#![allow(dead_code)]

use svm_token_ledger::token::instruction;
use svm_token_ledger::{
    InMemoryAccountsDB, Ledger, LedgerConfig, Mint, Multisig, Pack, Pubkey, TokenAccount, NATIVE_MINT,
};

pub type TestLedger = Ledger<InMemoryAccountsDB>;

pub fn ledger() -> TestLedger {
    let _ = env_logger::builder().is_test(true).try_init();
    Ledger::new_in_memory(LedgerConfig::default())
}

pub fn create_mint(
    ledger: &TestLedger,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
    decimals: u8,
) -> Pubkey {
    let mint = Pubkey::new_unique();
    ledger.create_rent_exempt_account(&mint, Mint::LEN).unwrap();
    let ix = instruction::initialize_mint(
        ledger.program_id(),
        &mint,
        mint_authority,
        freeze_authority,
        decimals,
    )
    .unwrap();
    ledger.execute(&ix).unwrap();
    mint
}

pub fn create_token_account(ledger: &TestLedger, mint: &Pubkey, owner: &Pubkey) -> Pubkey {
    let account = Pubkey::new_unique();
    ledger
        .create_rent_exempt_account(&account, TokenAccount::LEN)
        .unwrap();
    let ix = instruction::initialize_account(ledger.program_id(), &account, mint, owner).unwrap();
    ledger.execute(&ix).unwrap();
    account
}

/// Wrapped native account holding `amount` above its rent-exempt reserve
pub fn create_native_account(ledger: &TestLedger, owner: &Pubkey, amount: u64) -> Pubkey {
    let account = Pubkey::new_unique();
    let reserve = ledger.rent().minimum_balance(TokenAccount::LEN);
    ledger
        .create_account(&account, reserve + amount, TokenAccount::LEN)
        .unwrap();
    let ix = instruction::initialize_account2(ledger.program_id(), &account, &NATIVE_MINT, owner)
        .unwrap();
    ledger.execute(&ix).unwrap();
    account
}

pub fn create_multisig(ledger: &TestLedger, m: u8, signers: &[&Pubkey]) -> Pubkey {
    let multisig = Pubkey::new_unique();
    ledger
        .create_rent_exempt_account(&multisig, Multisig::LEN)
        .unwrap();
    let ix = instruction::initialize_multisig(ledger.program_id(), &multisig, signers, m).unwrap();
    ledger.execute(&ix).unwrap();
    multisig
}

pub fn mint_to(ledger: &TestLedger, mint: &Pubkey, account: &Pubkey, authority: &Pubkey, amount: u64) {
    let ix = instruction::mint_to(ledger.program_id(), mint, account, authority, &[], amount).unwrap();
    ledger.execute(&ix).unwrap();
}

pub fn supply(ledger: &TestLedger, mint: &Pubkey) -> u64 {
    ledger.get_mint(mint).unwrap().supply
}

pub fn balance(ledger: &TestLedger, account: &Pubkey) -> u64 {
    ledger.balance(account).unwrap()
}
