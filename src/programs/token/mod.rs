//! SPL Token Program
//!
//! Fungible token ledger over host-provided slots: mints, token accounts,
//! multisig authorities and wrapped native balances.

pub mod authority;
pub mod instruction;
pub mod native;
pub mod processor;
pub mod state;
pub mod store;

pub use authority::{validate_owner, Authority};
pub use instruction::{AuthorityType, TokenInstruction};
pub use native::{is_native_mint, native_mint_record, NATIVE_DECIMALS, NATIVE_MINT};
pub use processor::TokenProgram;
pub use state::{AccountState, IsInitialized, Mint, Multisig, Pack, TokenAccount, MAX_SIGNERS, MIN_SIGNERS};
pub use store::RecordStore;

use crate::types::Pubkey;

/// Token program ID
pub const TOKEN_PROGRAM_ID: [u8; 32] = [
    0x06, 0xdd, 0xf6, 0xe1, 0xd7, 0x65, 0xa1, 0x93,
    0xd9, 0xcb, 0xe1, 0x46, 0xce, 0xeb, 0x79, 0xac,
    0x1c, 0xb4, 0x85, 0xed, 0x5f, 0x5b, 0x37, 0x91,
    0x3a, 0x8c, 0xf5, 0x85, 0x7e, 0xff, 0x00, 0xa9,
]; // TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA

pub fn token_program_id() -> Pubkey {
    Pubkey::new(TOKEN_PROGRAM_ID)
}
