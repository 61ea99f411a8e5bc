pub mod types;
pub mod error;
pub mod accounts;
pub mod programs;
pub mod sysvars;
pub mod ledger;

pub use accounts::*;
pub use error::*;
pub use ledger::*;
pub use programs::token::{
    self, token_program_id, AccountState, AuthorityType, Mint, Multisig, Pack, TokenAccount,
    TokenInstruction, TokenProgram, NATIVE_MINT, TOKEN_PROGRAM_ID,
};
pub use sysvars::*;
pub use types::*;
