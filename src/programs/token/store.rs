//! Typed access to token records held in host-provided slots.

use super::state::{IsInitialized, Mint, Multisig, Pack, TokenAccount};
use crate::accounts::LoadedAccount;
use crate::error::{TokenError, TokenResult};
use crate::sysvars::Rent;
use crate::types::Pubkey;

/// Reads and writes records in slots owned by one program identity.
#[derive(Clone, Debug)]
pub struct RecordStore {
    program_id: Pubkey,
}

impl RecordStore {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    pub fn is_owned(&self, slot: &LoadedAccount) -> bool {
        slot.account.owner == self.program_id
    }

    fn check_owner(&self, slot: &LoadedAccount) -> TokenResult<()> {
        if self.is_owned(slot) {
            Ok(())
        } else {
            Err(TokenError::IncorrectProgramId)
        }
    }

    fn read<T: Pack + IsInitialized>(&self, slot: &LoadedAccount) -> TokenResult<T> {
        self.check_owner(slot)?;
        T::unpack(slot.data())
    }

    fn read_unchecked<T: Pack>(&self, slot: &LoadedAccount) -> TokenResult<T> {
        self.check_owner(slot)?;
        T::unpack_unchecked(slot.data())
    }

    fn write<T: Pack>(&self, slot: &mut LoadedAccount, record: T) -> TokenResult<()> {
        if !slot.is_writable {
            return Err(TokenError::AccountNotWritable);
        }
        self.check_owner(slot)?;
        T::pack(record, &mut slot.account.data)
    }

    pub fn read_mint(&self, slot: &LoadedAccount) -> TokenResult<Mint> {
        self.read(slot)
    }

    pub fn read_mint_unchecked(&self, slot: &LoadedAccount) -> TokenResult<Mint> {
        self.read_unchecked(slot)
    }

    pub fn read_token_account(&self, slot: &LoadedAccount) -> TokenResult<TokenAccount> {
        self.read(slot)
    }

    pub fn read_token_account_unchecked(&self, slot: &LoadedAccount) -> TokenResult<TokenAccount> {
        self.read_unchecked(slot)
    }

    pub fn read_multisig(&self, slot: &LoadedAccount) -> TokenResult<Multisig> {
        self.read(slot)
    }

    pub fn read_multisig_unchecked(&self, slot: &LoadedAccount) -> TokenResult<Multisig> {
        self.read_unchecked(slot)
    }

    pub fn write_mint(&self, slot: &mut LoadedAccount, mint: Mint) -> TokenResult<()> {
        self.write(slot, mint)
    }

    pub fn write_token_account(
        &self,
        slot: &mut LoadedAccount,
        account: TokenAccount,
    ) -> TokenResult<()> {
        self.write(slot, account)
    }

    pub fn write_multisig(&self, slot: &mut LoadedAccount, multisig: Multisig) -> TokenResult<()> {
        self.write(slot, multisig)
    }

    /// Fails with `NotRentExempt` unless the slot holds the rent-exempt minimum
    /// for its data length.
    pub fn check_rent_exempt(&self, slot: &LoadedAccount, rent: &Rent) -> TokenResult<()> {
        if rent.is_exempt(slot.lamports(), slot.account.data_len()) {
            Ok(())
        } else {
            Err(TokenError::NotRentExempt)
        }
    }
}
