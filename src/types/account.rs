use super::Pubkey;
use crate::error::{TokenError, TokenResult};
use serde::{Deserialize, Serialize};

/// Storage slot as handed to the ledger by the host: a native balance, raw
/// record bytes and the program that owns them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Native balance held by this slot
    pub lamports: u64,
    /// Raw record bytes
    pub data: Vec<u8>,
    /// Program that owns this slot
    pub owner: Pubkey,
}

impl Account {
    pub fn new(lamports: u64, space: usize, owner: &Pubkey) -> Self {
        Self {
            lamports,
            data: vec![0; space],
            owner: *owner,
        }
    }

    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    pub fn checked_add_lamports(&mut self, amount: u64) -> TokenResult<()> {
        self.lamports = self
            .lamports
            .checked_add(amount)
            .ok_or(TokenError::NumericOverflow)?;
        Ok(())
    }

    pub fn checked_sub_lamports(&mut self, amount: u64) -> TokenResult<()> {
        self.lamports = self
            .lamports
            .checked_sub(amount)
            .ok_or(TokenError::InsufficientFunds)?;
        Ok(())
    }
}

/// Position of a slot in an instruction's account list, with the flags the
/// host attached to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMeta {
    pub pubkey: Pubkey,
    pub is_signer: bool,
    pub is_writable: bool,
}

impl AccountMeta {
    pub fn new(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    pub fn new_readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}
