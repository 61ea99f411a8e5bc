//! Token instruction processor
//!
//! Every instruction runs against a working copy of the supplied slots. The
//! copy is written back only when the whole instruction succeeded, so a failed
//! instruction leaves every slot untouched.

use super::authority::validate_owner;
use super::instruction::{is_valid_signer_index, AuthorityType, TokenInstruction};
use super::native::{self, is_native_mint, native_mint_record};
use super::state::{AccountState, Mint, Pack, TokenAccount, MAX_SIGNERS};
use super::store::RecordStore;
use super::TOKEN_PROGRAM_ID;
use crate::accounts::LoadedAccount;
use crate::error::{TokenError, TokenResult};
use crate::sysvars::Rent;
use crate::types::Pubkey;

/// SPL-style token program
#[derive(Clone, Debug)]
pub struct TokenProgram {
    store: RecordStore,
    rent: Rent,
}

impl Default for TokenProgram {
    fn default() -> Self {
        Self::new(Pubkey::new(TOKEN_PROGRAM_ID), Rent::default())
    }
}

fn account_at(accounts: &[LoadedAccount], index: usize) -> TokenResult<&LoadedAccount> {
    accounts.get(index).ok_or(TokenError::NotEnoughAccounts)
}

/// Two distinct slots, `first < second`
fn pair_mut(
    accounts: &mut [LoadedAccount],
    first: usize,
    second: usize,
) -> (&mut LoadedAccount, &mut LoadedAccount) {
    let (head, tail) = accounts.split_at_mut(second);
    (&mut head[first], &mut tail[0])
}

impl TokenProgram {
    pub fn new(program_id: Pubkey, rent: Rent) -> Self {
        Self {
            store: RecordStore::new(program_id),
            rent,
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        self.store.program_id()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn rent(&self) -> &Rent {
        &self.rent
    }

    /// Process a token instruction. On error no slot is modified.
    pub fn process(&self, accounts: &mut [LoadedAccount], instruction_data: &[u8]) -> TokenResult<()> {
        let instruction = TokenInstruction::unpack(instruction_data)?;
        let name = instruction.name();
        log::info!("Program log: Instruction: {}", name);

        let mut working = accounts.to_vec();
        match self.dispatch(&mut working, instruction) {
            Ok(()) => {
                for (slot, updated) in accounts.iter_mut().zip(working) {
                    *slot = updated;
                }
                Ok(())
            }
            Err(e) => {
                log::debug!("Program log: {} failed: {}", name, e);
                Err(e)
            }
        }
    }

    fn dispatch(&self, accounts: &mut [LoadedAccount], instruction: TokenInstruction) -> TokenResult<()> {
        match instruction {
            TokenInstruction::InitializeMint {
                decimals,
                mint_authority,
                freeze_authority,
            } => self.process_initialize_mint(accounts, decimals, mint_authority, freeze_authority),

            TokenInstruction::InitializeAccount => self.process_initialize_account(accounts, None),

            TokenInstruction::InitializeAccount2 { owner } => {
                self.process_initialize_account(accounts, Some(owner))
            }

            TokenInstruction::InitializeMultisig { m } => self.process_initialize_multisig(accounts, m),

            TokenInstruction::Transfer { amount } => self.process_transfer(accounts, amount, None),

            TokenInstruction::TransferChecked { amount, decimals } => {
                self.process_transfer(accounts, amount, Some(decimals))
            }

            TokenInstruction::Approve { amount } => self.process_approve(accounts, amount, None),

            TokenInstruction::ApproveChecked { amount, decimals } => {
                self.process_approve(accounts, amount, Some(decimals))
            }

            TokenInstruction::Revoke => self.process_revoke(accounts),

            TokenInstruction::SetAuthority {
                authority_type,
                new_authority,
            } => self.process_set_authority(accounts, authority_type, new_authority),

            TokenInstruction::MintTo { amount } => self.process_mint_to(accounts, amount, None),

            TokenInstruction::MintToChecked { amount, decimals } => {
                self.process_mint_to(accounts, amount, Some(decimals))
            }

            TokenInstruction::Burn { amount } => self.process_burn(accounts, amount, None),

            TokenInstruction::BurnChecked { amount, decimals } => {
                self.process_burn(accounts, amount, Some(decimals))
            }

            TokenInstruction::CloseAccount => self.process_close_account(accounts),

            TokenInstruction::FreezeAccount => self.process_toggle_freeze(accounts, true),

            TokenInstruction::ThawAccount => self.process_toggle_freeze(accounts, false),

            TokenInstruction::SyncNative => self.process_sync_native(accounts),
        }
    }

    /// Mint record for `slot`. The native mint needs no stored record.
    fn load_mint(&self, slot: &LoadedAccount) -> TokenResult<Mint> {
        if is_native_mint(&slot.pubkey) {
            return Ok(native_mint_record());
        }
        self.store.read_mint(slot)
    }

    fn check_decimals(&self, mint_slot: &LoadedAccount, mint_key: &Pubkey, decimals: u8) -> TokenResult<()> {
        if mint_slot.pubkey != *mint_key {
            return Err(TokenError::MintMismatch);
        }
        if self.load_mint(mint_slot)?.decimals != decimals {
            return Err(TokenError::DecimalsMismatch);
        }
        Ok(())
    }

    /// Authorize a debit of `amount` from `source` by the owner or the
    /// delegate, consuming the delegation when the delegate signs.
    fn authorize_debit(
        &self,
        source: &mut TokenAccount,
        authority_slot: &LoadedAccount,
        signers: &[LoadedAccount],
        amount: u64,
    ) -> TokenResult<()> {
        match source.delegate {
            Some(delegate) if authority_slot.pubkey == delegate => {
                validate_owner(&self.store, &delegate, authority_slot, signers)?;
                if source.delegated_amount < amount {
                    return Err(TokenError::InsufficientFunds);
                }
                source.delegated_amount = source
                    .delegated_amount
                    .checked_sub(amount)
                    .ok_or(TokenError::NumericOverflow)?;
                if source.delegated_amount == 0 {
                    source.delegate = None;
                }
                Ok(())
            }
            _ => validate_owner(&self.store, &source.owner, authority_slot, signers),
        }
    }

    fn process_initialize_mint(
        &self,
        accounts: &mut [LoadedAccount],
        decimals: u8,
        mint_authority: Pubkey,
        freeze_authority: Option<Pubkey>,
    ) -> TokenResult<()> {
        let mint_slot = accounts.first_mut().ok_or(TokenError::NotEnoughAccounts)?;

        let existing = self.store.read_mint_unchecked(mint_slot)?;
        if existing.is_initialized {
            return Err(TokenError::AlreadyInitialized);
        }
        self.store.check_rent_exempt(mint_slot, &self.rent)?;

        let mint = Mint {
            mint_authority: Some(mint_authority),
            supply: 0,
            decimals,
            is_initialized: true,
            freeze_authority,
        };

        self.store.write_mint(mint_slot, mint)
    }

    fn process_initialize_account(
        &self,
        accounts: &mut [LoadedAccount],
        owner: Option<Pubkey>,
    ) -> TokenResult<()> {
        let mint_key = account_at(accounts, 1)?.pubkey;
        let owner = match owner {
            Some(owner) => owner,
            None => account_at(accounts, 2)?.pubkey,
        };

        let new_slot = account_at(accounts, 0)?;
        let mut account = self.store.read_token_account_unchecked(new_slot)?;
        if account.state != AccountState::Uninitialized {
            return Err(TokenError::AlreadyInitialized);
        }
        self.store.check_rent_exempt(new_slot, &self.rent)?;
        let rent_exempt_reserve = self.rent.minimum_balance(new_slot.account.data_len());

        self.load_mint(account_at(accounts, 1)?)?;

        account.mint = mint_key;
        account.owner = owner;
        account.delegate = None;
        account.delegated_amount = 0;
        account.state = AccountState::Initialized;
        account.close_authority = None;
        if is_native_mint(&mint_key) {
            native::wrap(&mut account, new_slot, rent_exempt_reserve)?;
        } else {
            account.is_native = None;
            account.amount = 0;
        }

        self.store.write_token_account(&mut accounts[0], account)
    }

    fn process_initialize_multisig(&self, accounts: &mut [LoadedAccount], m: u8) -> TokenResult<()> {
        let (multisig_slot, signer_slots) = accounts
            .split_first_mut()
            .ok_or(TokenError::NotEnoughAccounts)?;

        let mut multisig = self.store.read_multisig_unchecked(multisig_slot)?;
        if multisig.is_initialized {
            return Err(TokenError::AlreadyInitialized);
        }
        self.store.check_rent_exempt(multisig_slot, &self.rent)?;

        let n = signer_slots.len();
        if !is_valid_signer_index(n) || !is_valid_signer_index(m as usize) || m as usize > n {
            return Err(TokenError::InvalidMultisigConfig);
        }

        multisig.m = m;
        multisig.n = n as u8;
        multisig.signers = [Pubkey::default(); MAX_SIGNERS];
        for (dst, slot) in multisig.signers.iter_mut().zip(signer_slots.iter()) {
            *dst = slot.pubkey;
        }
        multisig.is_initialized = true;

        self.store.write_multisig(multisig_slot, multisig)
    }

    fn process_transfer(
        &self,
        accounts: &mut [LoadedAccount],
        amount: u64,
        expected_decimals: Option<u8>,
    ) -> TokenResult<()> {
        // Checked layout: [source, mint, destination, authority, ..signers]
        let (dest_index, authority_index) = match expected_decimals {
            Some(_) => (2, 3),
            None => (1, 2),
        };
        if accounts.len() <= authority_index {
            return Err(TokenError::NotEnoughAccounts);
        }

        // Self-transfer succeeds without touching balances or checking signers.
        if accounts[0].pubkey == accounts[dest_index].pubkey {
            log::debug!("Program log: self-transfer of {} is a no-op", amount);
            return Ok(());
        }

        let mut source = self.store.read_token_account(&accounts[0])?;
        let mut dest = self.store.read_token_account(&accounts[dest_index])?;

        if source.is_frozen() || dest.is_frozen() {
            return Err(TokenError::AccountFrozen);
        }
        if source.mint != dest.mint {
            return Err(TokenError::MintMismatch);
        }
        if let Some(decimals) = expected_decimals {
            self.check_decimals(&accounts[1], &source.mint, decimals)?;
        }
        if source.amount < amount {
            return Err(TokenError::InsufficientFunds);
        }

        self.authorize_debit(
            &mut source,
            &accounts[authority_index],
            &accounts[authority_index + 1..],
            amount,
        )?;

        source.amount = source
            .amount
            .checked_sub(amount)
            .ok_or(TokenError::NumericOverflow)?;
        dest.amount = dest
            .amount
            .checked_add(amount)
            .ok_or(TokenError::NumericOverflow)?;

        let (source_slot, dest_slot) = pair_mut(accounts, 0, dest_index);
        if source.is_native() {
            native::move_lamports(source_slot, dest_slot, amount)?;
        }

        self.store.write_token_account(source_slot, source)?;
        self.store.write_token_account(dest_slot, dest)
    }

    fn process_approve(
        &self,
        accounts: &mut [LoadedAccount],
        amount: u64,
        expected_decimals: Option<u8>,
    ) -> TokenResult<()> {
        // Checked layout: [source, mint, delegate, owner, ..signers]
        let (delegate_index, owner_index) = match expected_decimals {
            Some(_) => (2, 3),
            None => (1, 2),
        };
        if accounts.len() <= owner_index {
            return Err(TokenError::NotEnoughAccounts);
        }

        let mut source = self.store.read_token_account(&accounts[0])?;
        if source.is_frozen() {
            return Err(TokenError::AccountFrozen);
        }
        if let Some(decimals) = expected_decimals {
            self.check_decimals(&accounts[1], &source.mint, decimals)?;
        }

        validate_owner(
            &self.store,
            &source.owner,
            &accounts[owner_index],
            &accounts[owner_index + 1..],
        )?;

        source.delegate = Some(accounts[delegate_index].pubkey);
        source.delegated_amount = amount;

        self.store.write_token_account(&mut accounts[0], source)
    }

    fn process_revoke(&self, accounts: &mut [LoadedAccount]) -> TokenResult<()> {
        if accounts.len() < 2 {
            return Err(TokenError::NotEnoughAccounts);
        }

        let mut source = self.store.read_token_account(&accounts[0])?;
        if source.is_frozen() {
            return Err(TokenError::AccountFrozen);
        }

        validate_owner(&self.store, &source.owner, &accounts[1], &accounts[2..])?;

        source.delegate = None;
        source.delegated_amount = 0;

        self.store.write_token_account(&mut accounts[0], source)
    }

    fn process_set_authority(
        &self,
        accounts: &mut [LoadedAccount],
        authority_type: AuthorityType,
        new_authority: Option<Pubkey>,
    ) -> TokenResult<()> {
        if accounts.len() < 2 {
            return Err(TokenError::NotEnoughAccounts);
        }
        let (owned, rest) = accounts.split_at_mut(1);
        let owned = &mut owned[0];
        let authority_slot = &rest[0];
        let signers = &rest[1..];

        if owned.account.data_len() == TokenAccount::LEN {
            let mut account = self.store.read_token_account(owned)?;
            if account.is_frozen() {
                return Err(TokenError::AccountFrozen);
            }

            match authority_type {
                AuthorityType::AccountOwner => {
                    validate_owner(&self.store, &account.owner, authority_slot, signers)?;
                    account.owner = new_authority.ok_or(TokenError::InvalidAuthority)?;
                    account.delegate = None;
                    account.delegated_amount = 0;
                    if account.is_native() {
                        account.close_authority = None;
                    }
                }
                AuthorityType::CloseAccount => {
                    let current = account.close_authority.unwrap_or(account.owner);
                    validate_owner(&self.store, &current, authority_slot, signers)?;
                    account.close_authority = new_authority;
                }
                AuthorityType::MintTokens | AuthorityType::FreezeAccount => {
                    return Err(TokenError::AuthorityTypeNotSupported);
                }
            }

            self.store.write_token_account(owned, account)
        } else if owned.account.data_len() == Mint::LEN {
            let mut mint = self.store.read_mint(owned)?;

            match authority_type {
                AuthorityType::MintTokens => {
                    // None is terminal: once removed it can never be set again
                    let current = mint.mint_authority.ok_or(TokenError::FixedSupply)?;
                    validate_owner(&self.store, &current, authority_slot, signers)?;
                    mint.mint_authority = new_authority;
                }
                AuthorityType::FreezeAccount => {
                    let current = mint.freeze_authority.ok_or(TokenError::FreezeDisabled)?;
                    validate_owner(&self.store, &current, authority_slot, signers)?;
                    mint.freeze_authority = new_authority;
                }
                AuthorityType::AccountOwner | AuthorityType::CloseAccount => {
                    return Err(TokenError::AuthorityTypeNotSupported);
                }
            }

            self.store.write_mint(owned, mint)
        } else {
            Err(TokenError::InvalidAccountData)
        }
    }

    fn process_mint_to(
        &self,
        accounts: &mut [LoadedAccount],
        amount: u64,
        expected_decimals: Option<u8>,
    ) -> TokenResult<()> {
        if accounts.len() < 3 {
            return Err(TokenError::NotEnoughAccounts);
        }
        if is_native_mint(&accounts[0].pubkey) {
            return Err(TokenError::NativeNotSupported);
        }

        let mut dest = self.store.read_token_account(&accounts[1])?;
        if dest.is_frozen() {
            return Err(TokenError::AccountFrozen);
        }
        if dest.is_native() {
            return Err(TokenError::NativeNotSupported);
        }
        if dest.mint != accounts[0].pubkey {
            return Err(TokenError::MintMismatch);
        }

        let mut mint = self.store.read_mint(&accounts[0])?;
        if let Some(decimals) = expected_decimals {
            if decimals != mint.decimals {
                return Err(TokenError::DecimalsMismatch);
            }
        }

        let mint_authority = mint.mint_authority.ok_or(TokenError::FixedSupply)?;
        validate_owner(&self.store, &mint_authority, &accounts[2], &accounts[3..])?;

        mint.supply = mint
            .supply
            .checked_add(amount)
            .ok_or(TokenError::NumericOverflow)?;
        dest.amount = dest
            .amount
            .checked_add(amount)
            .ok_or(TokenError::NumericOverflow)?;

        let (mint_slot, dest_slot) = pair_mut(accounts, 0, 1);
        self.store.write_mint(mint_slot, mint)?;
        self.store.write_token_account(dest_slot, dest)
    }

    fn process_burn(
        &self,
        accounts: &mut [LoadedAccount],
        amount: u64,
        expected_decimals: Option<u8>,
    ) -> TokenResult<()> {
        if accounts.len() < 3 {
            return Err(TokenError::NotEnoughAccounts);
        }

        let mut source = self.store.read_token_account(&accounts[0])?;
        if source.is_native() {
            return Err(TokenError::NativeNotSupported);
        }
        if source.is_frozen() {
            return Err(TokenError::AccountFrozen);
        }
        if source.mint != accounts[1].pubkey {
            return Err(TokenError::MintMismatch);
        }

        let mut mint = self.store.read_mint(&accounts[1])?;
        if let Some(decimals) = expected_decimals {
            if decimals != mint.decimals {
                return Err(TokenError::DecimalsMismatch);
            }
        }
        if source.amount < amount {
            return Err(TokenError::InsufficientFunds);
        }

        self.authorize_debit(&mut source, &accounts[2], &accounts[3..], amount)?;

        source.amount = source
            .amount
            .checked_sub(amount)
            .ok_or(TokenError::NumericOverflow)?;
        mint.supply = mint
            .supply
            .checked_sub(amount)
            .ok_or(TokenError::NumericOverflow)?;

        let (source_slot, mint_slot) = pair_mut(accounts, 0, 1);
        self.store.write_token_account(source_slot, source)?;
        self.store.write_mint(mint_slot, mint)
    }

    fn process_close_account(&self, accounts: &mut [LoadedAccount]) -> TokenResult<()> {
        if accounts.len() < 3 {
            return Err(TokenError::NotEnoughAccounts);
        }
        if accounts[0].pubkey == accounts[1].pubkey {
            return Err(TokenError::InvalidAccountData);
        }

        let source = self.store.read_token_account(&accounts[0])?;
        if !source.is_native() && source.amount != 0 {
            return Err(TokenError::NonZeroBalance);
        }
        if source.is_frozen() {
            return Err(TokenError::AccountFrozen);
        }

        let close_authority = source.close_authority.unwrap_or(source.owner);
        validate_owner(&self.store, &close_authority, &accounts[2], &accounts[3..])?;

        let (source_slot, dest_slot) = pair_mut(accounts, 0, 1);
        if !source_slot.is_writable || !dest_slot.is_writable {
            return Err(TokenError::AccountNotWritable);
        }

        // For native accounts this releases the wrapped balance together with the reserve.
        let lamports = source_slot.account.lamports;
        dest_slot.account.checked_add_lamports(lamports)?;
        source_slot.account.lamports = 0;
        source_slot.account.data.clear();

        Ok(())
    }

    fn process_toggle_freeze(&self, accounts: &mut [LoadedAccount], freeze: bool) -> TokenResult<()> {
        if accounts.len() < 3 {
            return Err(TokenError::NotEnoughAccounts);
        }

        let mut source = self.store.read_token_account(&accounts[0])?;
        if source.is_native() {
            return Err(TokenError::NativeNotSupported);
        }
        if freeze == source.is_frozen() {
            return Err(TokenError::InvalidState);
        }
        if source.mint != accounts[1].pubkey {
            return Err(TokenError::MintMismatch);
        }

        let mint = self.store.read_mint(&accounts[1])?;
        let freeze_authority = mint.freeze_authority.ok_or(TokenError::FreezeDisabled)?;
        validate_owner(&self.store, &freeze_authority, &accounts[2], &accounts[3..])?;

        source.state = if freeze {
            AccountState::Frozen
        } else {
            AccountState::Initialized
        };

        self.store.write_token_account(&mut accounts[0], source)
    }

    fn process_sync_native(&self, accounts: &mut [LoadedAccount]) -> TokenResult<()> {
        let slot = accounts.first_mut().ok_or(TokenError::NotEnoughAccounts)?;

        let mut account = self.store.read_token_account(slot)?;
        native::sync(&mut account, slot)?;

        self.store.write_token_account(slot, account)
    }
}
