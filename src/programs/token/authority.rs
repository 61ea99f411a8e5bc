//! Authority resolution
//!
//! Every authority field of a record is a single key. That key either signs
//! for itself or names a multisig record, in which case `m` of the record's
//! `n` signers must sign instead.

use super::state::{Multisig, Pack, MAX_SIGNERS};
use super::store::RecordStore;
use crate::accounts::LoadedAccount;
use crate::error::{TokenError, TokenResult};
use crate::types::Pubkey;

/// What an authority slot turned out to be
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Authority {
    /// A plain key that must sign
    Direct(Pubkey),
    /// A multisig record stored at the given address
    Multisig(Pubkey, Multisig),
}

impl Authority {
    /// Classify an authority slot. Only an initialized multisig record owned
    /// by the program counts as a multisig; everything else is a direct key.
    pub fn classify(store: &RecordStore, slot: &LoadedAccount) -> Self {
        if store.is_owned(slot) && slot.account.data_len() == Multisig::LEN {
            if let Ok(multisig) = store.read_multisig(slot) {
                return Authority::Multisig(slot.pubkey, multisig);
            }
        }
        Authority::Direct(slot.pubkey)
    }

    /// Check this authority against the slot it was read from and the extra
    /// signer slots that follow it in the instruction.
    pub fn verify(&self, authority_slot: &LoadedAccount, signers: &[LoadedAccount]) -> TokenResult<()> {
        match self {
            Authority::Direct(_) => {
                if authority_slot.is_signer {
                    Ok(())
                } else {
                    Err(TokenError::MissingRequiredSignature)
                }
            }
            Authority::Multisig(_, multisig) => {
                let mut matched = [false; MAX_SIGNERS];
                let mut num_signers = 0u8;
                for signer in signers.iter().filter(|s| s.is_signer) {
                    for (position, key) in multisig.signer_keys().iter().enumerate() {
                        if *key == signer.pubkey && !matched[position] {
                            matched[position] = true;
                            num_signers += 1;
                            break;
                        }
                    }
                }
                if num_signers < multisig.m {
                    return Err(TokenError::MissingRequiredSignature);
                }
                Ok(())
            }
        }
    }
}

/// Authorize an operation that requires `expected`.
///
/// `authority_slot` is the slot the instruction names as the authority and
/// `signers` the multisig co-signers listed after it.
pub fn validate_owner(
    store: &RecordStore,
    expected: &Pubkey,
    authority_slot: &LoadedAccount,
    signers: &[LoadedAccount],
) -> TokenResult<()> {
    if *expected != authority_slot.pubkey {
        return Err(TokenError::MissingRequiredSignature);
    }
    Authority::classify(store, authority_slot).verify(authority_slot, signers)
}
