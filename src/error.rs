use crate::types::Pubkey;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    // Record store errors
    #[error("Invalid account data")]
    InvalidAccountData,

    #[error("Account not initialized")]
    AccountNotInitialized,

    #[error("Account already initialized")]
    AlreadyInitialized,

    #[error("Account is not writable")]
    AccountNotWritable,

    #[error("Account is not owned by the token program")]
    IncorrectProgramId,

    #[error("Account is not rent exempt")]
    NotRentExempt,

    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),

    // Authority errors
    #[error("Missing required signature")]
    MissingRequiredSignature,

    #[error("Invalid authority")]
    InvalidAuthority,

    #[error("Authority type not supported for this account")]
    AuthorityTypeNotSupported,

    #[error("Invalid multisig configuration")]
    InvalidMultisigConfig,

    // Ledger rule errors
    #[error("Insufficient funds")]
    InsufficientFunds,

    #[error("Account is frozen")]
    AccountFrozen,

    #[error("Arithmetic overflow")]
    NumericOverflow,

    #[error("Mint mismatch")]
    MintMismatch,

    #[error("Fixed supply: mint authority has been removed")]
    FixedSupply,

    #[error("Freeze disabled: freeze authority has been removed")]
    FreezeDisabled,

    #[error("Account has non-zero balance")]
    NonZeroBalance,

    #[error("Decimals mismatch")]
    DecimalsMismatch,

    #[error("Instruction not supported for native accounts")]
    NativeNotSupported,

    #[error("Invalid account state for operation")]
    InvalidState,

    // Instruction errors
    #[error("Invalid instruction data")]
    InvalidInstructionData,

    #[error("Not enough accounts provided")]
    NotEnoughAccounts,
}

pub type TokenResult<T> = Result<T, TokenError>;
