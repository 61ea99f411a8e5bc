mod common;

use common::*;
use svm_token_ledger::token::instruction;
use svm_token_ledger::{AccountState, AuthorityType, Pubkey, TokenAccount, TokenError, Pack};

#[test]
fn test_mint_transfer_burn_flow() {
    let ledger = ledger();
    let authority = Pubkey::new_unique();
    let alice = Pubkey::new_unique();
    let bob = Pubkey::new_unique();

    let mint = create_mint(&ledger, &authority, None, 6);
    let alice_account = create_token_account(&ledger, &mint, &alice);
    let bob_account = create_token_account(&ledger, &mint, &bob);

    mint_to(&ledger, &mint, &alice_account, &authority, 1_000);
    assert_eq!(supply(&ledger, &mint), 1_000);

    let ix = instruction::transfer(ledger.program_id(), &alice_account, &bob_account, &alice, &[], 400)
        .unwrap();
    ledger.execute(&ix).unwrap();
    assert_eq!(balance(&ledger, &alice_account), 600);
    assert_eq!(balance(&ledger, &bob_account), 400);

    let ix = instruction::burn(ledger.program_id(), &bob_account, &mint, &bob, &[], 150).unwrap();
    ledger.execute(&ix).unwrap();
    assert_eq!(balance(&ledger, &bob_account), 250);
    assert_eq!(supply(&ledger, &mint), 850);

    let ix = instruction::burn(ledger.program_id(), &bob_account, &mint, &bob, &[], 251).unwrap();
    assert_eq!(ledger.execute(&ix), Err(TokenError::InsufficientFunds));
    assert_eq!(balance(&ledger, &bob_account), 250);
    assert_eq!(supply(&ledger, &mint), 850);
}

#[test]
fn test_transfer_requires_owner_signature() {
    let ledger = ledger();
    let authority = Pubkey::new_unique();
    let alice = Pubkey::new_unique();
    let mallory = Pubkey::new_unique();

    let mint = create_mint(&ledger, &authority, None, 0);
    let alice_account = create_token_account(&ledger, &mint, &alice);
    let mallory_account = create_token_account(&ledger, &mint, &mallory);
    mint_to(&ledger, &mint, &alice_account, &authority, 10);

    let ix = instruction::transfer(
        ledger.program_id(),
        &alice_account,
        &mallory_account,
        &mallory,
        &[],
        10,
    )
    .unwrap();
    assert_eq!(ledger.execute(&ix), Err(TokenError::MissingRequiredSignature));
    assert_eq!(balance(&ledger, &alice_account), 10);
}

#[test]
fn test_self_transfer_is_noop_for_any_amount() {
    let ledger = ledger();
    let authority = Pubkey::new_unique();
    let alice = Pubkey::new_unique();
    let mint = create_mint(&ledger, &authority, None, 0);
    let account = create_token_account(&ledger, &mint, &alice);
    mint_to(&ledger, &mint, &account, &authority, 5);
    let before = ledger.get_account(&account).unwrap();

    // no signer at all, amount far above the balance
    let mut ix = instruction::transfer(ledger.program_id(), &account, &account, &alice, &[], u64::MAX)
        .unwrap();
    ix.accounts[2].is_signer = false;
    ledger.execute(&ix).unwrap();

    assert_eq!(ledger.get_account(&account).unwrap(), before);
    assert_eq!(balance(&ledger, &account), 5);
}

#[test]
fn test_multisig_two_of_three_mint_authority() {
    let ledger = ledger();
    let (a, b, c) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
    let multisig = create_multisig(&ledger, 2, &[&a, &b, &c]);

    let record = ledger.get_multisig(&multisig).unwrap();
    assert_eq!((record.m, record.n), (2, 3));

    let mint = create_mint(&ledger, &multisig, None, 2);
    let holder = create_token_account(&ledger, &mint, &Pubkey::new_unique());

    let only_a =
        instruction::mint_to(ledger.program_id(), &mint, &holder, &multisig, &[&a], 100).unwrap();
    assert_eq!(ledger.execute(&only_a), Err(TokenError::MissingRequiredSignature));

    let a_twice =
        instruction::mint_to(ledger.program_id(), &mint, &holder, &multisig, &[&a, &a], 100)
            .unwrap();
    assert_eq!(ledger.execute(&a_twice), Err(TokenError::MissingRequiredSignature));

    let outsider = Pubkey::new_unique();
    let a_and_outsider =
        instruction::mint_to(ledger.program_id(), &mint, &holder, &multisig, &[&a, &outsider], 100)
            .unwrap();
    assert_eq!(
        ledger.execute(&a_and_outsider),
        Err(TokenError::MissingRequiredSignature)
    );

    let a_and_c =
        instruction::mint_to(ledger.program_id(), &mint, &holder, &multisig, &[&c, &a], 100)
            .unwrap();
    ledger.execute(&a_and_c).unwrap();
    assert_eq!(supply(&ledger, &mint), 100);
    assert_eq!(balance(&ledger, &holder), 100);
}

#[test]
fn test_multisig_owned_token_account() {
    let ledger = ledger();
    let (a, b) = (Pubkey::new_unique(), Pubkey::new_unique());
    let multisig = create_multisig(&ledger, 1, &[&a, &b]);
    let authority = Pubkey::new_unique();
    let mint = create_mint(&ledger, &authority, None, 0);
    let vault = create_token_account(&ledger, &mint, &multisig);
    let dest = create_token_account(&ledger, &mint, &Pubkey::new_unique());
    mint_to(&ledger, &mint, &vault, &authority, 50);

    let ix = instruction::transfer(ledger.program_id(), &vault, &dest, &multisig, &[&b], 20).unwrap();
    ledger.execute(&ix).unwrap();
    assert_eq!(balance(&ledger, &vault), 30);
    assert_eq!(balance(&ledger, &dest), 20);
}

#[test]
fn test_freeze_blocks_mutation_until_thaw() {
    let ledger = ledger();
    let authority = Pubkey::new_unique();
    let freezer = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let mint = create_mint(&ledger, &authority, Some(&freezer), 0);
    let frozen = create_token_account(&ledger, &mint, &owner);
    let other = create_token_account(&ledger, &mint, &Pubkey::new_unique());
    mint_to(&ledger, &mint, &frozen, &authority, 100);

    let freeze = instruction::freeze_account(ledger.program_id(), &frozen, &mint, &freezer, &[]).unwrap();
    ledger.execute(&freeze).unwrap();
    assert_eq!(
        ledger.get_token_account(&frozen).unwrap().state,
        AccountState::Frozen
    );

    let transfer_out =
        instruction::transfer(ledger.program_id(), &frozen, &other, &owner, &[], 1).unwrap();
    assert_eq!(ledger.execute(&transfer_out), Err(TokenError::AccountFrozen));

    let transfer_in =
        instruction::transfer(ledger.program_id(), &other, &frozen, &owner, &[], 0).unwrap();
    assert_eq!(ledger.execute(&transfer_in), Err(TokenError::AccountFrozen));

    let mint_in = instruction::mint_to(ledger.program_id(), &mint, &frozen, &authority, &[], 1).unwrap();
    assert_eq!(ledger.execute(&mint_in), Err(TokenError::AccountFrozen));

    let burn = instruction::burn(ledger.program_id(), &frozen, &mint, &owner, &[], 1).unwrap();
    assert_eq!(ledger.execute(&burn), Err(TokenError::AccountFrozen));

    let approve = instruction::approve(
        ledger.program_id(),
        &frozen,
        &Pubkey::new_unique(),
        &owner,
        &[],
        1,
    )
    .unwrap();
    assert_eq!(ledger.execute(&approve), Err(TokenError::AccountFrozen));

    let thaw = instruction::thaw_account(ledger.program_id(), &frozen, &mint, &freezer, &[]).unwrap();
    ledger.execute(&thaw).unwrap();
    ledger.execute(&transfer_out).unwrap();
    assert_eq!(balance(&ledger, &frozen), 99);
}

#[test]
fn test_fixed_supply_is_final() {
    let ledger = ledger();
    let authority = Pubkey::new_unique();
    let mint = create_mint(&ledger, &authority, None, 0);
    let holder = create_token_account(&ledger, &mint, &Pubkey::new_unique());
    mint_to(&ledger, &mint, &holder, &authority, 1_000);

    let remove = instruction::set_authority(
        ledger.program_id(),
        &mint,
        None,
        AuthorityType::MintTokens,
        &authority,
        &[],
    )
    .unwrap();
    ledger.execute(&remove).unwrap();
    assert_eq!(ledger.get_mint(&mint).unwrap().mint_authority, None);

    let mint_more =
        instruction::mint_to(ledger.program_id(), &mint, &holder, &authority, &[], 1).unwrap();
    assert_eq!(ledger.execute(&mint_more), Err(TokenError::FixedSupply));

    let restore = instruction::set_authority(
        ledger.program_id(),
        &mint,
        Some(&authority),
        AuthorityType::MintTokens,
        &authority,
        &[],
    )
    .unwrap();
    assert_eq!(ledger.execute(&restore), Err(TokenError::FixedSupply));
    assert_eq!(supply(&ledger, &mint), 1_000);
}

#[test]
fn test_checked_variants_verify_decimals() {
    let ledger = ledger();
    let authority = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let mint = create_mint(&ledger, &authority, None, 6);
    let source = create_token_account(&ledger, &mint, &owner);
    let dest = create_token_account(&ledger, &mint, &Pubkey::new_unique());

    let wrong = instruction::mint_to_checked(ledger.program_id(), &mint, &source, &authority, &[], 10, 9)
        .unwrap();
    assert_eq!(ledger.execute(&wrong), Err(TokenError::DecimalsMismatch));
    let right = instruction::mint_to_checked(ledger.program_id(), &mint, &source, &authority, &[], 10, 6)
        .unwrap();
    ledger.execute(&right).unwrap();

    let ix = instruction::transfer_checked(
        ledger.program_id(),
        &source,
        &mint,
        &dest,
        &owner,
        &[],
        4,
        5,
    )
    .unwrap();
    assert_eq!(ledger.execute(&ix), Err(TokenError::DecimalsMismatch));

    let ix = instruction::transfer_checked(
        ledger.program_id(),
        &source,
        &mint,
        &dest,
        &owner,
        &[],
        4,
        6,
    )
    .unwrap();
    ledger.execute(&ix).unwrap();
    assert_eq!(balance(&ledger, &dest), 4);

    let delegate = Pubkey::new_unique();
    let ix = instruction::approve_checked(
        ledger.program_id(),
        &source,
        &mint,
        &delegate,
        &owner,
        &[],
        3,
        6,
    )
    .unwrap();
    ledger.execute(&ix).unwrap();
    let record = ledger.get_token_account(&source).unwrap();
    assert_eq!(record.delegate, Some(delegate));
    assert_eq!(record.delegated_amount, 3);

    let ix = instruction::burn_checked(ledger.program_id(), &source, &mint, &delegate, &[], 3, 6).unwrap();
    ledger.execute(&ix).unwrap();
    let record = ledger.get_token_account(&source).unwrap();
    assert_eq!(record.amount, 3);
    assert_eq!(record.delegate, None);
    assert_eq!(supply(&ledger, &mint), 7);
}

#[test]
fn test_wrapped_native_round_trip() {
    let ledger = ledger();
    let alice = Pubkey::new_unique();
    let bob = Pubkey::new_unique();
    let reserve = ledger.rent().minimum_balance(TokenAccount::LEN);

    let alice_account = create_native_account(&ledger, &alice, 5_000_000_000);
    let bob_account = create_native_account(&ledger, &bob, 0);

    let record = ledger.get_token_account(&alice_account).unwrap();
    assert_eq!(record.amount, 5_000_000_000);
    assert_eq!(record.is_native, Some(reserve));

    let ix = instruction::transfer(
        ledger.program_id(),
        &alice_account,
        &bob_account,
        &alice,
        &[],
        5_000_000_000,
    )
    .unwrap();
    ledger.execute(&ix).unwrap();
    assert_eq!(balance(&ledger, &alice_account), 0);
    assert_eq!(balance(&ledger, &bob_account), 5_000_000_000);
    assert_eq!(ledger.lamports(&alice_account).unwrap(), reserve);
    assert_eq!(ledger.lamports(&bob_account).unwrap(), reserve + 5_000_000_000);

    // closing a native account with a positive balance releases every lamport
    let close = instruction::close_account(ledger.program_id(), &bob_account, &bob, &bob, &[]).unwrap();
    ledger.execute(&close).unwrap();
    assert!(ledger.get_account(&bob_account).unwrap().is_none());
    assert_eq!(ledger.lamports(&bob).unwrap(), reserve + 5_000_000_000);

    assert_eq!(ledger.get_mint(&svm_token_ledger::NATIVE_MINT).unwrap().supply, 0);
}

#[test]
fn test_native_accounts_reject_mint_and_burn() {
    let ledger = ledger();
    let owner = Pubkey::new_unique();
    let account = create_native_account(&ledger, &owner, 1_000);

    let ix = instruction::mint_to(
        ledger.program_id(),
        &svm_token_ledger::NATIVE_MINT,
        &account,
        &owner,
        &[],
        1,
    )
    .unwrap();
    assert_eq!(ledger.execute(&ix), Err(TokenError::NativeNotSupported));

    let ix = instruction::burn(
        ledger.program_id(),
        &account,
        &svm_token_ledger::NATIVE_MINT,
        &owner,
        &[],
        1,
    )
    .unwrap();
    assert_eq!(ledger.execute(&ix), Err(TokenError::NativeNotSupported));
}

#[test]
fn test_sync_native_picks_up_deposit() {
    let ledger = ledger();
    let owner = Pubkey::new_unique();
    let account = create_native_account(&ledger, &owner, 100);

    let mut raw = ledger.get_account(&account).unwrap().unwrap();
    raw.lamports += 900;
    ledger.set_account(&account, &raw).unwrap();
    assert_eq!(balance(&ledger, &account), 100);

    let ix = instruction::sync_native(ledger.program_id(), &account).unwrap();
    ledger.execute(&ix).unwrap();
    assert_eq!(balance(&ledger, &account), 1_000);
}

#[test]
fn test_close_account_requires_zero_balance() {
    let ledger = ledger();
    let authority = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let mint = create_mint(&ledger, &authority, None, 0);
    let account = create_token_account(&ledger, &mint, &owner);
    mint_to(&ledger, &mint, &account, &authority, 1);
    let lamports = ledger.lamports(&account).unwrap();

    let close = instruction::close_account(ledger.program_id(), &account, &owner, &owner, &[]).unwrap();
    assert_eq!(ledger.execute(&close), Err(TokenError::NonZeroBalance));

    let burn = instruction::burn(ledger.program_id(), &account, &mint, &owner, &[], 1).unwrap();
    ledger.execute(&burn).unwrap();
    ledger.execute(&close).unwrap();
    assert!(ledger.get_account(&account).unwrap().is_none());
    assert_eq!(ledger.lamports(&owner).unwrap(), lamports);

    let self_close =
        instruction::close_account(ledger.program_id(), &account, &account, &owner, &[]).unwrap();
    assert_eq!(ledger.execute(&self_close), Err(TokenError::InvalidAccountData));
}

#[test]
fn test_failed_instruction_leaves_slots_untouched() {
    let ledger = ledger();
    let authority = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let delegate = Pubkey::new_unique();
    let mint = create_mint(&ledger, &authority, None, 0);
    let source = create_token_account(&ledger, &mint, &owner);
    let dest = create_token_account(&ledger, &mint, &Pubkey::new_unique());
    mint_to(&ledger, &mint, &source, &authority, 100);

    let approve =
        instruction::approve(ledger.program_id(), &source, &delegate, &owner, &[], 10).unwrap();
    ledger.execute(&approve).unwrap();

    let snapshot: Vec<_> = [mint, source, dest]
        .iter()
        .map(|k| ledger.get_account(k).unwrap())
        .collect();

    // delegate over its allowance
    let ix = instruction::transfer(ledger.program_id(), &source, &dest, &delegate, &[], 11).unwrap();
    assert_eq!(ledger.execute(&ix), Err(TokenError::InsufficientFunds));

    // destination of another mint
    let other_mint = create_mint(&ledger, &authority, None, 0);
    let foreign = create_token_account(&ledger, &other_mint, &owner);
    let ix = instruction::transfer(ledger.program_id(), &source, &foreign, &owner, &[], 1).unwrap();
    assert_eq!(ledger.execute(&ix), Err(TokenError::MintMismatch));

    // supply overflow
    let mut raw = ledger.get_account(&mint).unwrap().unwrap();
    let mut record = ledger.get_mint(&mint).unwrap();
    record.supply = u64::MAX;
    raw.data = record.to_bytes();
    ledger.set_account(&mint, &raw).unwrap();
    let ix = instruction::mint_to(ledger.program_id(), &mint, &dest, &authority, &[], 1).unwrap();
    assert_eq!(ledger.execute(&ix), Err(TokenError::NumericOverflow));
    record.supply = 100;
    raw.data = record.to_bytes();
    ledger.set_account(&mint, &raw).unwrap();

    let after: Vec<_> = [mint, source, dest]
        .iter()
        .map(|k| ledger.get_account(k).unwrap())
        .collect();
    assert_eq!(snapshot, after);
}

#[test]
fn test_set_owner_clears_delegate() {
    let ledger = ledger();
    let authority = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let new_owner = Pubkey::new_unique();
    let mint = create_mint(&ledger, &authority, None, 0);
    let account = create_token_account(&ledger, &mint, &owner);

    let approve = instruction::approve(
        ledger.program_id(),
        &account,
        &Pubkey::new_unique(),
        &owner,
        &[],
        5,
    )
    .unwrap();
    ledger.execute(&approve).unwrap();

    let ix = instruction::set_authority(
        ledger.program_id(),
        &account,
        Some(&new_owner),
        AuthorityType::AccountOwner,
        &owner,
        &[],
    )
    .unwrap();
    ledger.execute(&ix).unwrap();

    let record = ledger.get_token_account(&account).unwrap();
    assert_eq!(record.owner, new_owner);
    assert_eq!(record.delegate, None);
    assert_eq!(record.delegated_amount, 0);

    let revoke = instruction::revoke(ledger.program_id(), &account, &owner, &[]).unwrap();
    assert_eq!(ledger.execute(&revoke), Err(TokenError::MissingRequiredSignature));
    let revoke = instruction::revoke(ledger.program_id(), &account, &new_owner, &[]).unwrap();
    ledger.execute(&revoke).unwrap();
}

#[test]
fn test_reinitialize_is_rejected() {
    let ledger = ledger();
    let authority = Pubkey::new_unique();
    let mint = create_mint(&ledger, &authority, None, 0);
    let owner = Pubkey::new_unique();
    let account = create_token_account(&ledger, &mint, &owner);

    let again = instruction::initialize_mint(ledger.program_id(), &mint, &authority, None, 3).unwrap();
    assert_eq!(ledger.execute(&again), Err(TokenError::AlreadyInitialized));

    let again = instruction::initialize_account(ledger.program_id(), &account, &mint, &owner).unwrap();
    assert_eq!(ledger.execute(&again), Err(TokenError::AlreadyInitialized));
}

#[test]
fn test_removed_freeze_authority_is_final() {
    let ledger = ledger();
    let authority = Pubkey::new_unique();
    let freezer = Pubkey::new_unique();
    let owner = Pubkey::new_unique();
    let mint = create_mint(&ledger, &authority, Some(&freezer), 0);
    let account = create_token_account(&ledger, &mint, &owner);

    let freeze = instruction::freeze_account(ledger.program_id(), &account, &mint, &freezer, &[]).unwrap();
    ledger.execute(&freeze).unwrap();

    let remove = instruction::set_authority(
        ledger.program_id(),
        &mint,
        None,
        AuthorityType::FreezeAccount,
        &freezer,
        &[],
    )
    .unwrap();
    ledger.execute(&remove).unwrap();
    assert_eq!(ledger.get_mint(&mint).unwrap().freeze_authority, None);

    let thaw = instruction::thaw_account(ledger.program_id(), &account, &mint, &freezer, &[]).unwrap();
    assert_eq!(ledger.execute(&thaw), Err(TokenError::FreezeDisabled));
    assert_eq!(
        ledger.get_token_account(&account).unwrap().state,
        AccountState::Frozen
    );

    let restore = instruction::set_authority(
        ledger.program_id(),
        &mint,
        Some(&freezer),
        AuthorityType::FreezeAccount,
        &freezer,
        &[],
    )
    .unwrap();
    assert_eq!(ledger.execute(&restore), Err(TokenError::FreezeDisabled));
    assert_eq!(ledger.get_mint(&mint).unwrap().freeze_authority, None);
}
