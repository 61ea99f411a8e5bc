use super::{AccountMeta, Pubkey};
use serde::{Deserialize, Serialize};

/// A single instruction addressed to the token program
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Program ID that will process this instruction
    pub program_id: Pubkey,
    /// Accounts required by the instruction, in the order the program expects
    pub accounts: Vec<AccountMeta>,
    /// Instruction data (discriminant + payload)
    pub data: Vec<u8>,
}

impl Instruction {
    pub fn new(program_id: Pubkey, data: Vec<u8>, accounts: Vec<AccountMeta>) -> Self {
        Self {
            program_id,
            accounts,
            data,
        }
    }
}
