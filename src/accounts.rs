use crate::error::TokenResult;
use crate::types::{Account, AccountMeta, Pubkey};
use std::collections::HashMap;

/// Account database interface - the host storage the ledger reads slots from
/// and commits slots to.
pub trait AccountsDB: Send + Sync {
    fn get_account(&self, pubkey: &Pubkey) -> TokenResult<Option<Account>>;
    fn set_account(&mut self, pubkey: &Pubkey, account: &Account) -> TokenResult<()>;
    fn delete_account(&mut self, pubkey: &Pubkey) -> TokenResult<()>;
    fn account_exists(&self, pubkey: &Pubkey) -> TokenResult<bool>;
}

/// In-memory accounts database
#[derive(Default, Clone)]
pub struct InMemoryAccountsDB {
    accounts: HashMap<Pubkey, Account>,
}

impl InMemoryAccountsDB {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl AccountsDB for InMemoryAccountsDB {
    fn get_account(&self, pubkey: &Pubkey) -> TokenResult<Option<Account>> {
        Ok(self.accounts.get(pubkey).cloned())
    }

    fn set_account(&mut self, pubkey: &Pubkey, account: &Account) -> TokenResult<()> {
        self.accounts.insert(*pubkey, account.clone());
        Ok(())
    }

    fn delete_account(&mut self, pubkey: &Pubkey) -> TokenResult<()> {
        self.accounts.remove(pubkey);
        Ok(())
    }

    fn account_exists(&self, pubkey: &Pubkey) -> TokenResult<bool> {
        Ok(self.accounts.contains_key(pubkey))
    }
}

/// Loaded slot with the flags the host attached to it for one instruction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedAccount {
    pub pubkey: Pubkey,
    pub account: Account,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl LoadedAccount {
    pub fn new(pubkey: Pubkey, account: Account, meta: &AccountMeta) -> Self {
        Self {
            pubkey,
            account,
            is_signer: meta.is_signer,
            is_writable: meta.is_writable,
        }
    }

    /// Writable, non-signing slot
    pub fn writable(pubkey: Pubkey, account: Account) -> Self {
        Self {
            pubkey,
            account,
            is_signer: false,
            is_writable: true,
        }
    }

    /// Read-only, non-signing slot
    pub fn readonly(pubkey: Pubkey, account: Account) -> Self {
        Self {
            pubkey,
            account,
            is_signer: false,
            is_writable: false,
        }
    }

    /// Read-only signing slot with no storage behind it, such as a wallet key
    pub fn signer(pubkey: Pubkey) -> Self {
        Self {
            pubkey,
            account: Account::default(),
            is_signer: true,
            is_writable: false,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.account.data
    }

    pub fn lamports(&self) -> u64 {
        self.account.lamports
    }
}
