pub mod account;
pub mod instruction;
pub mod pubkey;

pub use account::*;
pub use instruction::*;
pub use pubkey::*;
