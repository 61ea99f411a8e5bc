//! Token instructions and their builders
//!
//! Instruction data is a one-byte discriminant followed by a fixed payload.
//! Integers are little-endian; an optional key is a presence byte followed by
//! the 32-byte key when present. The variant order below is the discriminant
//! and must never change.

use super::state::{MAX_SIGNERS, MIN_SIGNERS};
use crate::error::{TokenError, TokenResult};
use crate::types::{AccountMeta, Instruction, Pubkey};
use borsh::{BorshDeserialize, BorshSerialize};

/// Authority types for SetAuthority instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum AuthorityType {
    /// Authority to mint new tokens
    MintTokens,
    /// Authority to freeze token accounts
    FreezeAccount,
    /// Owner of a token account
    AccountOwner,
    /// Authority to close a token account
    CloseAccount,
}

/// Token program instructions
#[derive(Clone, Debug, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum TokenInstruction {
    /// Initialize a new mint
    /// Accounts:
    /// 0. `[writable]` Mint account to initialize
    InitializeMint {
        decimals: u8,
        mint_authority: Pubkey,
        freeze_authority: Option<Pubkey>,
    },

    /// Initialize a new token account
    /// Accounts:
    /// 0. `[writable]` Token account to initialize
    /// 1. `[]` Mint account
    /// 2. `[]` Owner of the new account
    InitializeAccount,

    /// Initialize an M-of-N multisig
    /// Accounts:
    /// 0. `[writable]` Multisig account
    /// 1..=n. `[]` Signer keys
    InitializeMultisig { m: u8 },

    /// Transfer tokens
    /// Accounts:
    /// 0. `[writable]` Source token account
    /// 1. `[writable]` Destination token account
    /// 2. `[signer]` Source account owner or delegate
    /// 3.. `[signer]` Multisig co-signers
    Transfer { amount: u64 },

    /// Approve a delegate
    /// Accounts:
    /// 0. `[writable]` Token account
    /// 1. `[]` Delegate
    /// 2. `[signer]` Token account owner
    /// 3.. `[signer]` Multisig co-signers
    Approve { amount: u64 },

    /// Revoke delegate
    /// Accounts:
    /// 0. `[writable]` Token account
    /// 1. `[signer]` Token account owner
    /// 2.. `[signer]` Multisig co-signers
    Revoke,

    /// Set a new authority
    /// Accounts:
    /// 0. `[writable]` Mint or token account
    /// 1. `[signer]` Current authority
    /// 2.. `[signer]` Multisig co-signers
    SetAuthority {
        authority_type: AuthorityType,
        new_authority: Option<Pubkey>,
    },

    /// Mint new tokens
    /// Accounts:
    /// 0. `[writable]` Mint account
    /// 1. `[writable]` Destination token account
    /// 2. `[signer]` Mint authority
    /// 3.. `[signer]` Multisig co-signers
    MintTo { amount: u64 },

    /// Burn tokens
    /// Accounts:
    /// 0. `[writable]` Token account to burn from
    /// 1. `[writable]` Mint account
    /// 2. `[signer]` Token account owner or delegate
    /// 3.. `[signer]` Multisig co-signers
    Burn { amount: u64 },

    /// Close a token account
    /// Accounts:
    /// 0. `[writable]` Token account to close
    /// 1. `[writable]` Destination for remaining lamports
    /// 2. `[signer]` Close authority or owner
    /// 3.. `[signer]` Multisig co-signers
    CloseAccount,

    /// Freeze a token account
    /// Accounts:
    /// 0. `[writable]` Token account to freeze
    /// 1. `[]` Mint account
    /// 2. `[signer]` Freeze authority
    /// 3.. `[signer]` Multisig co-signers
    FreezeAccount,

    /// Thaw a frozen token account
    /// Accounts: same as FreezeAccount
    ThawAccount,

    /// Transfer with checked mint and decimals
    /// Accounts:
    /// 0. `[writable]` Source token account
    /// 1. `[]` Mint account
    /// 2. `[writable]` Destination token account
    /// 3. `[signer]` Source account owner or delegate
    /// 4.. `[signer]` Multisig co-signers
    TransferChecked { amount: u64, decimals: u8 },

    /// Approve with checked mint and decimals
    /// Accounts:
    /// 0. `[writable]` Token account
    /// 1. `[]` Mint account
    /// 2. `[]` Delegate
    /// 3. `[signer]` Token account owner
    /// 4.. `[signer]` Multisig co-signers
    ApproveChecked { amount: u64, decimals: u8 },

    /// Mint with checked decimals
    /// Accounts: same as MintTo
    MintToChecked { amount: u64, decimals: u8 },

    /// Burn with checked decimals
    /// Accounts: same as Burn
    BurnChecked { amount: u64, decimals: u8 },

    /// Initialize a token account with the owner carried in the payload
    /// Accounts:
    /// 0. `[writable]` Token account to initialize
    /// 1. `[]` Mint account
    InitializeAccount2 { owner: Pubkey },

    /// Sync native token account balance with its lamports
    /// Accounts:
    /// 0. `[writable]` Native token account
    SyncNative,
}

impl TokenInstruction {
    pub fn unpack(input: &[u8]) -> TokenResult<Self> {
        borsh::from_slice(input).map_err(|_| TokenError::InvalidInstructionData)
    }

    pub fn pack(&self) -> TokenResult<Vec<u8>> {
        borsh::to_vec(self).map_err(|_| TokenError::InvalidInstructionData)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::InitializeMint { .. } => "InitializeMint",
            Self::InitializeAccount => "InitializeAccount",
            Self::InitializeMultisig { .. } => "InitializeMultisig",
            Self::Transfer { .. } => "Transfer",
            Self::Approve { .. } => "Approve",
            Self::Revoke => "Revoke",
            Self::SetAuthority { .. } => "SetAuthority",
            Self::MintTo { .. } => "MintTo",
            Self::Burn { .. } => "Burn",
            Self::CloseAccount => "CloseAccount",
            Self::FreezeAccount => "FreezeAccount",
            Self::ThawAccount => "ThawAccount",
            Self::TransferChecked { .. } => "TransferChecked",
            Self::ApproveChecked { .. } => "ApproveChecked",
            Self::MintToChecked { .. } => "MintToChecked",
            Self::BurnChecked { .. } => "BurnChecked",
            Self::InitializeAccount2 { .. } => "InitializeAccount2",
            Self::SyncNative => "SyncNative",
        }
    }
}

/// Utility function that checks index is between MIN_SIGNERS and MAX_SIGNERS
pub fn is_valid_signer_index(index: usize) -> bool {
    (MIN_SIGNERS..=MAX_SIGNERS).contains(&index)
}

fn build(
    program_id: &Pubkey,
    instruction: TokenInstruction,
    accounts: Vec<AccountMeta>,
) -> TokenResult<Instruction> {
    Ok(Instruction::new(*program_id, instruction.pack()?, accounts))
}

/// Authority meta followed by the multisig co-signer metas. The authority
/// signs itself only when there are no co-signers.
fn push_authority(accounts: &mut Vec<AccountMeta>, authority: &Pubkey, signers: &[&Pubkey]) -> TokenResult<()> {
    if signers.len() > MAX_SIGNERS {
        return Err(TokenError::InvalidMultisigConfig);
    }
    accounts.push(AccountMeta::new_readonly(*authority, signers.is_empty()));
    for signer in signers {
        accounts.push(AccountMeta::new_readonly(**signer, true));
    }
    Ok(())
}

pub fn initialize_mint(
    program_id: &Pubkey,
    mint: &Pubkey,
    mint_authority: &Pubkey,
    freeze_authority: Option<&Pubkey>,
    decimals: u8,
) -> TokenResult<Instruction> {
    let instruction = TokenInstruction::InitializeMint {
        decimals,
        mint_authority: *mint_authority,
        freeze_authority: freeze_authority.copied(),
    };
    build(program_id, instruction, vec![AccountMeta::new(*mint, false)])
}

pub fn initialize_account(
    program_id: &Pubkey,
    account: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
) -> TokenResult<Instruction> {
    let accounts = vec![
        AccountMeta::new(*account, false),
        AccountMeta::new_readonly(*mint, false),
        AccountMeta::new_readonly(*owner, false),
    ];
    build(program_id, TokenInstruction::InitializeAccount, accounts)
}

pub fn initialize_account2(
    program_id: &Pubkey,
    account: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
) -> TokenResult<Instruction> {
    let accounts = vec![
        AccountMeta::new(*account, false),
        AccountMeta::new_readonly(*mint, false),
    ];
    build(
        program_id,
        TokenInstruction::InitializeAccount2 { owner: *owner },
        accounts,
    )
}

pub fn initialize_multisig(
    program_id: &Pubkey,
    multisig: &Pubkey,
    signers: &[&Pubkey],
    m: u8,
) -> TokenResult<Instruction> {
    if !is_valid_signer_index(m as usize)
        || !is_valid_signer_index(signers.len())
        || m as usize > signers.len()
    {
        return Err(TokenError::InvalidMultisigConfig);
    }
    let mut accounts = Vec::with_capacity(1 + signers.len());
    accounts.push(AccountMeta::new(*multisig, false));
    for signer in signers {
        accounts.push(AccountMeta::new_readonly(**signer, false));
    }
    build(program_id, TokenInstruction::InitializeMultisig { m }, accounts)
}

pub fn transfer(
    program_id: &Pubkey,
    source: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    signers: &[&Pubkey],
    amount: u64,
) -> TokenResult<Instruction> {
    let mut accounts = Vec::with_capacity(3 + signers.len());
    accounts.push(AccountMeta::new(*source, false));
    accounts.push(AccountMeta::new(*destination, false));
    push_authority(&mut accounts, authority, signers)?;
    build(program_id, TokenInstruction::Transfer { amount }, accounts)
}

#[allow(clippy::too_many_arguments)]
pub fn transfer_checked(
    program_id: &Pubkey,
    source: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    signers: &[&Pubkey],
    amount: u64,
    decimals: u8,
) -> TokenResult<Instruction> {
    let mut accounts = Vec::with_capacity(4 + signers.len());
    accounts.push(AccountMeta::new(*source, false));
    accounts.push(AccountMeta::new_readonly(*mint, false));
    accounts.push(AccountMeta::new(*destination, false));
    push_authority(&mut accounts, authority, signers)?;
    build(
        program_id,
        TokenInstruction::TransferChecked { amount, decimals },
        accounts,
    )
}

pub fn approve(
    program_id: &Pubkey,
    source: &Pubkey,
    delegate: &Pubkey,
    owner: &Pubkey,
    signers: &[&Pubkey],
    amount: u64,
) -> TokenResult<Instruction> {
    let mut accounts = Vec::with_capacity(3 + signers.len());
    accounts.push(AccountMeta::new(*source, false));
    accounts.push(AccountMeta::new_readonly(*delegate, false));
    push_authority(&mut accounts, owner, signers)?;
    build(program_id, TokenInstruction::Approve { amount }, accounts)
}

#[allow(clippy::too_many_arguments)]
pub fn approve_checked(
    program_id: &Pubkey,
    source: &Pubkey,
    mint: &Pubkey,
    delegate: &Pubkey,
    owner: &Pubkey,
    signers: &[&Pubkey],
    amount: u64,
    decimals: u8,
) -> TokenResult<Instruction> {
    let mut accounts = Vec::with_capacity(4 + signers.len());
    accounts.push(AccountMeta::new(*source, false));
    accounts.push(AccountMeta::new_readonly(*mint, false));
    accounts.push(AccountMeta::new_readonly(*delegate, false));
    push_authority(&mut accounts, owner, signers)?;
    build(
        program_id,
        TokenInstruction::ApproveChecked { amount, decimals },
        accounts,
    )
}

pub fn revoke(
    program_id: &Pubkey,
    source: &Pubkey,
    owner: &Pubkey,
    signers: &[&Pubkey],
) -> TokenResult<Instruction> {
    let mut accounts = Vec::with_capacity(2 + signers.len());
    accounts.push(AccountMeta::new(*source, false));
    push_authority(&mut accounts, owner, signers)?;
    build(program_id, TokenInstruction::Revoke, accounts)
}

pub fn set_authority(
    program_id: &Pubkey,
    owned: &Pubkey,
    new_authority: Option<&Pubkey>,
    authority_type: AuthorityType,
    owner: &Pubkey,
    signers: &[&Pubkey],
) -> TokenResult<Instruction> {
    let mut accounts = Vec::with_capacity(2 + signers.len());
    accounts.push(AccountMeta::new(*owned, false));
    push_authority(&mut accounts, owner, signers)?;
    build(
        program_id,
        TokenInstruction::SetAuthority {
            authority_type,
            new_authority: new_authority.copied(),
        },
        accounts,
    )
}

pub fn mint_to(
    program_id: &Pubkey,
    mint: &Pubkey,
    account: &Pubkey,
    mint_authority: &Pubkey,
    signers: &[&Pubkey],
    amount: u64,
) -> TokenResult<Instruction> {
    let mut accounts = Vec::with_capacity(3 + signers.len());
    accounts.push(AccountMeta::new(*mint, false));
    accounts.push(AccountMeta::new(*account, false));
    push_authority(&mut accounts, mint_authority, signers)?;
    build(program_id, TokenInstruction::MintTo { amount }, accounts)
}

#[allow(clippy::too_many_arguments)]
pub fn mint_to_checked(
    program_id: &Pubkey,
    mint: &Pubkey,
    account: &Pubkey,
    mint_authority: &Pubkey,
    signers: &[&Pubkey],
    amount: u64,
    decimals: u8,
) -> TokenResult<Instruction> {
    let mut instruction = mint_to(program_id, mint, account, mint_authority, signers, amount)?;
    instruction.data = TokenInstruction::MintToChecked { amount, decimals }.pack()?;
    Ok(instruction)
}

pub fn burn(
    program_id: &Pubkey,
    account: &Pubkey,
    mint: &Pubkey,
    authority: &Pubkey,
    signers: &[&Pubkey],
    amount: u64,
) -> TokenResult<Instruction> {
    let mut accounts = Vec::with_capacity(3 + signers.len());
    accounts.push(AccountMeta::new(*account, false));
    accounts.push(AccountMeta::new(*mint, false));
    push_authority(&mut accounts, authority, signers)?;
    build(program_id, TokenInstruction::Burn { amount }, accounts)
}

#[allow(clippy::too_many_arguments)]
pub fn burn_checked(
    program_id: &Pubkey,
    account: &Pubkey,
    mint: &Pubkey,
    authority: &Pubkey,
    signers: &[&Pubkey],
    amount: u64,
    decimals: u8,
) -> TokenResult<Instruction> {
    let mut instruction = burn(program_id, account, mint, authority, signers, amount)?;
    instruction.data = TokenInstruction::BurnChecked { amount, decimals }.pack()?;
    Ok(instruction)
}

pub fn close_account(
    program_id: &Pubkey,
    account: &Pubkey,
    destination: &Pubkey,
    authority: &Pubkey,
    signers: &[&Pubkey],
) -> TokenResult<Instruction> {
    let mut accounts = Vec::with_capacity(3 + signers.len());
    accounts.push(AccountMeta::new(*account, false));
    accounts.push(AccountMeta::new(*destination, false));
    push_authority(&mut accounts, authority, signers)?;
    build(program_id, TokenInstruction::CloseAccount, accounts)
}

pub fn freeze_account(
    program_id: &Pubkey,
    account: &Pubkey,
    mint: &Pubkey,
    freeze_authority: &Pubkey,
    signers: &[&Pubkey],
) -> TokenResult<Instruction> {
    let mut accounts = Vec::with_capacity(3 + signers.len());
    accounts.push(AccountMeta::new(*account, false));
    accounts.push(AccountMeta::new_readonly(*mint, false));
    push_authority(&mut accounts, freeze_authority, signers)?;
    build(program_id, TokenInstruction::FreezeAccount, accounts)
}

pub fn thaw_account(
    program_id: &Pubkey,
    account: &Pubkey,
    mint: &Pubkey,
    freeze_authority: &Pubkey,
    signers: &[&Pubkey],
) -> TokenResult<Instruction> {
    let mut instruction = freeze_account(program_id, account, mint, freeze_authority, signers)?;
    instruction.data = TokenInstruction::ThawAccount.pack()?;
    Ok(instruction)
}

pub fn sync_native(program_id: &Pubkey, account: &Pubkey) -> TokenResult<Instruction> {
    build(
        program_id,
        TokenInstruction::SyncNative,
        vec![AccountMeta::new(*account, false)],
    )
}
