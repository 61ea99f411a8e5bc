//! In-memory ledger host
//!
//! Loads the slots an instruction names, runs the token program over them and
//! commits the changed slots back to the accounts database on success.

use crate::accounts::{AccountsDB, InMemoryAccountsDB, LoadedAccount};
use crate::error::{TokenError, TokenResult};
use crate::programs::token::{
    is_native_mint, native_mint_record, token_program_id, IsInitialized, Mint, Multisig, Pack,
    TokenAccount, TokenProgram,
};
use crate::sysvars::Rent;
use crate::types::{Account, Instruction, Pubkey};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Ledger configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Identity that owns every token record
    pub program_id: Pubkey,
    pub rent: Rent,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            program_id: token_program_id(),
            rent: Rent::default(),
        }
    }
}

/// Token ledger over an accounts database
pub struct Ledger<DB: AccountsDB> {
    accounts: Arc<RwLock<DB>>,
    program: TokenProgram,
    config: LedgerConfig,
}

impl Ledger<InMemoryAccountsDB> {
    /// Create a new ledger with in-memory storage
    pub fn new_in_memory(config: LedgerConfig) -> Self {
        Self::new(InMemoryAccountsDB::new(), config)
    }
}

impl<DB: AccountsDB> Ledger<DB> {
    /// Create a ledger with a custom accounts database
    pub fn new(accounts_db: DB, config: LedgerConfig) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(accounts_db)),
            program: TokenProgram::new(config.program_id, config.rent.clone()),
            config,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.config.program_id
    }

    pub fn rent(&self) -> &Rent {
        &self.config.rent
    }

    /// Execute a single instruction. Nothing is written unless it succeeds.
    pub fn execute(&self, instruction: &Instruction) -> TokenResult<()> {
        if instruction.program_id != self.config.program_id {
            return Err(TokenError::IncorrectProgramId);
        }

        let mut db = self.accounts.write();

        let mut loaded = Vec::with_capacity(instruction.accounts.len());
        for meta in &instruction.accounts {
            let account = db.get_account(&meta.pubkey)?.unwrap_or_default();
            loaded.push(LoadedAccount::new(meta.pubkey, account, meta));
        }
        let before = loaded.clone();

        self.program.process(&mut loaded, &instruction.data)?;

        let mut committed = 0usize;
        for (after, before) in loaded.iter().zip(before.iter()) {
            if after.account == before.account {
                continue;
            }
            if is_closed(&after.account) {
                db.delete_account(&after.pubkey)?;
            } else {
                db.set_account(&after.pubkey, &after.account)?;
            }
            committed += 1;
        }
        log::trace!("committed {} of {} slots", committed, loaded.len());

        Ok(())
    }

    pub fn get_account(&self, pubkey: &Pubkey) -> TokenResult<Option<Account>> {
        self.accounts.read().get_account(pubkey)
    }

    pub fn set_account(&self, pubkey: &Pubkey, account: &Account) -> TokenResult<()> {
        self.accounts.write().set_account(pubkey, account)
    }

    /// Allocate a zeroed slot owned by the token program
    pub fn create_account(&self, pubkey: &Pubkey, lamports: u64, space: usize) -> TokenResult<()> {
        if self.accounts.read().account_exists(pubkey)? {
            return Err(TokenError::AlreadyInitialized);
        }
        let account = Account::new(lamports, space, &self.config.program_id);
        self.set_account(pubkey, &account)
    }

    /// Allocate a rent-exempt slot of `space` bytes
    pub fn create_rent_exempt_account(&self, pubkey: &Pubkey, space: usize) -> TokenResult<()> {
        self.create_account(pubkey, self.config.rent.minimum_balance(space), space)
    }

    fn load(&self, pubkey: &Pubkey) -> TokenResult<Account> {
        self.get_account(pubkey)?
            .ok_or(TokenError::AccountNotFound(*pubkey))
    }

    fn load_owned<T: Pack + IsInitialized>(&self, pubkey: &Pubkey) -> TokenResult<T> {
        let account = self.load(pubkey)?;
        if account.owner != self.config.program_id {
            return Err(TokenError::IncorrectProgramId);
        }
        T::unpack(&account.data)
    }

    /// Mint record at `pubkey`. The native mint is always reported.
    pub fn get_mint(&self, pubkey: &Pubkey) -> TokenResult<Mint> {
        if is_native_mint(pubkey) {
            return Ok(native_mint_record());
        }
        self.load_owned(pubkey)
    }

    pub fn get_token_account(&self, pubkey: &Pubkey) -> TokenResult<TokenAccount> {
        self.load_owned(pubkey)
    }

    pub fn get_multisig(&self, pubkey: &Pubkey) -> TokenResult<Multisig> {
        self.load_owned(pubkey)
    }

    pub fn balance(&self, pubkey: &Pubkey) -> TokenResult<u64> {
        Ok(self.get_token_account(pubkey)?.amount)
    }

    pub fn lamports(&self, pubkey: &Pubkey) -> TokenResult<u64> {
        Ok(self.get_account(pubkey)?.map(|a| a.lamports).unwrap_or(0))
    }
}

fn is_closed(account: &Account) -> bool {
    account.lamports == 0 && account.data.iter().all(|b| *b == 0)
}
