//! Token record layouts
//!
//! Mint, token account and multisig records are stored as fixed-size,
//! fixed-offset little-endian byte layouts. Optional values are a 4-byte tag
//! (0 = none, 1 = some) followed by the payload, which is zeroed when absent.

use crate::error::{TokenError, TokenResult};
use crate::types::Pubkey;
use arrayref::{array_mut_ref, array_ref, array_refs, mut_array_refs};

/// Minimum number of multisignature signers
pub const MIN_SIGNERS: usize = 1;
/// Maximum number of multisignature signers
pub const MAX_SIGNERS: usize = 11;

/// Records that carry an initialization flag
pub trait IsInitialized {
    fn is_initialized(&self) -> bool;
}

/// Fixed-size (de)serialization of a record
pub trait Pack: Sized {
    /// Length in bytes of the packed representation
    const LEN: usize;

    #[doc(hidden)]
    fn pack_into_slice(&self, dst: &mut [u8]);
    #[doc(hidden)]
    fn unpack_from_slice(src: &[u8]) -> TokenResult<Self>;

    /// Unpack and require the record to be initialized
    fn unpack(input: &[u8]) -> TokenResult<Self>
    where
        Self: IsInitialized,
    {
        let value = Self::unpack_unchecked(input)?;
        if value.is_initialized() {
            Ok(value)
        } else {
            Err(TokenError::AccountNotInitialized)
        }
    }

    /// Unpack without looking at the initialization flag
    fn unpack_unchecked(input: &[u8]) -> TokenResult<Self> {
        if input.len() != Self::LEN {
            return Err(TokenError::InvalidAccountData);
        }
        Self::unpack_from_slice(input)
    }

    fn pack(src: Self, dst: &mut [u8]) -> TokenResult<()> {
        if dst.len() != Self::LEN {
            return Err(TokenError::InvalidAccountData);
        }
        src.pack_into_slice(dst);
        Ok(())
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut data = vec![0u8; Self::LEN];
        self.pack_into_slice(&mut data);
        data
    }
}

/// Mint record - defines a token type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mint {
    /// Authority allowed to mint new tokens. `None` fixes the supply for good.
    pub mint_authority: Option<Pubkey>,
    /// Total supply of tokens
    pub supply: u64,
    /// Number of base-10 digits to the right of the decimal place
    pub decimals: u8,
    pub is_initialized: bool,
    /// Authority allowed to freeze token accounts. `None` disables freezing for good.
    pub freeze_authority: Option<Pubkey>,
}

impl IsInitialized for Mint {
    fn is_initialized(&self) -> bool {
        self.is_initialized
    }
}

impl Pack for Mint {
    const LEN: usize = 82;

    fn unpack_from_slice(src: &[u8]) -> TokenResult<Self> {
        let src = array_ref![src, 0, 82];
        let (mint_authority, supply, decimals, is_initialized, freeze_authority) =
            array_refs![src, 36, 8, 1, 1, 36];
        Ok(Mint {
            mint_authority: unpack_option_key(mint_authority)?,
            supply: u64::from_le_bytes(*supply),
            decimals: decimals[0],
            is_initialized: unpack_bool(is_initialized)?,
            freeze_authority: unpack_option_key(freeze_authority)?,
        })
    }

    fn pack_into_slice(&self, dst: &mut [u8]) {
        let dst = array_mut_ref![dst, 0, 82];
        let (mint_authority_dst, supply_dst, decimals_dst, is_initialized_dst, freeze_authority_dst) =
            mut_array_refs![dst, 36, 8, 1, 1, 36];
        pack_option_key(&self.mint_authority, mint_authority_dst);
        *supply_dst = self.supply.to_le_bytes();
        decimals_dst[0] = self.decimals;
        is_initialized_dst[0] = self.is_initialized as u8;
        pack_option_key(&self.freeze_authority, freeze_authority_dst);
    }
}

/// Token account state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum AccountState {
    /// Account is not yet initialized
    #[default]
    Uninitialized,
    /// Account is initialized and active
    Initialized,
    /// Account is frozen by the mint's freeze authority
    Frozen,
}

impl TryFrom<u8> for AccountState {
    type Error = TokenError;

    fn try_from(value: u8) -> TokenResult<Self> {
        match value {
            0 => Ok(AccountState::Uninitialized),
            1 => Ok(AccountState::Initialized),
            2 => Ok(AccountState::Frozen),
            _ => Err(TokenError::InvalidAccountData),
        }
    }
}

/// Token account record - holds a balance of one mint
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenAccount {
    /// The mint this account holds tokens for
    pub mint: Pubkey,
    /// Owner of this account: a key or the address of a multisig record
    pub owner: Pubkey,
    /// Amount of tokens held
    pub amount: u64,
    /// Optional delegate approved to move up to `delegated_amount`
    pub delegate: Option<Pubkey>,
    pub state: AccountState,
    /// Set for wrapped-native accounts: the rent-exempt reserve that is not
    /// counted as tokens.
    pub is_native: Option<u64>,
    /// Remaining allowance of the delegate
    pub delegated_amount: u64,
    /// Optional authority that can close this account instead of the owner
    pub close_authority: Option<Pubkey>,
}

impl TokenAccount {
    pub fn is_frozen(&self) -> bool {
        self.state == AccountState::Frozen
    }

    pub fn is_native(&self) -> bool {
        self.is_native.is_some()
    }
}

impl IsInitialized for TokenAccount {
    fn is_initialized(&self) -> bool {
        self.state != AccountState::Uninitialized
    }
}

impl Pack for TokenAccount {
    const LEN: usize = 165;

    fn unpack_from_slice(src: &[u8]) -> TokenResult<Self> {
        let src = array_ref![src, 0, 165];
        let (mint, owner, amount, delegate, state, is_native, delegated_amount, close_authority) =
            array_refs![src, 32, 32, 8, 36, 1, 12, 8, 36];
        Ok(TokenAccount {
            mint: Pubkey::new(*mint),
            owner: Pubkey::new(*owner),
            amount: u64::from_le_bytes(*amount),
            delegate: unpack_option_key(delegate)?,
            state: AccountState::try_from(state[0])?,
            is_native: unpack_option_u64(is_native)?,
            delegated_amount: u64::from_le_bytes(*delegated_amount),
            close_authority: unpack_option_key(close_authority)?,
        })
    }

    fn pack_into_slice(&self, dst: &mut [u8]) {
        let dst = array_mut_ref![dst, 0, 165];
        let (
            mint_dst,
            owner_dst,
            amount_dst,
            delegate_dst,
            state_dst,
            is_native_dst,
            delegated_amount_dst,
            close_authority_dst,
        ) = mut_array_refs![dst, 32, 32, 8, 36, 1, 12, 8, 36];
        mint_dst.copy_from_slice(self.mint.as_ref());
        owner_dst.copy_from_slice(self.owner.as_ref());
        *amount_dst = self.amount.to_le_bytes();
        pack_option_key(&self.delegate, delegate_dst);
        state_dst[0] = self.state as u8;
        pack_option_u64(&self.is_native, is_native_dst);
        *delegated_amount_dst = self.delegated_amount.to_le_bytes();
        pack_option_key(&self.close_authority, close_authority_dst);
    }
}

/// Multisig record - M-of-N authority usable wherever a single key is expected
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Multisig {
    /// Number of signers required
    pub m: u8,
    /// Number of valid signers
    pub n: u8,
    pub is_initialized: bool,
    /// Signer keys; entries at `n..` are zeroed
    pub signers: [Pubkey; MAX_SIGNERS],
}

impl Multisig {
    /// The configured signers, without the zeroed tail
    pub fn signer_keys(&self) -> &[Pubkey] {
        &self.signers[..(self.n as usize).min(MAX_SIGNERS)]
    }
}

impl IsInitialized for Multisig {
    fn is_initialized(&self) -> bool {
        self.is_initialized
    }
}

impl Pack for Multisig {
    const LEN: usize = 355;

    fn unpack_from_slice(src: &[u8]) -> TokenResult<Self> {
        let src = array_ref![src, 0, 355];
        let (m, n, is_initialized, signers_flat) = array_refs![src, 1, 1, 1, 32 * MAX_SIGNERS];
        let mut result = Multisig {
            m: m[0],
            n: n[0],
            is_initialized: unpack_bool(is_initialized)?,
            signers: [Pubkey::default(); MAX_SIGNERS],
        };
        if result.n as usize > MAX_SIGNERS || result.m > result.n {
            return Err(TokenError::InvalidAccountData);
        }
        for (src, dst) in signers_flat.chunks(32).zip(result.signers.iter_mut()) {
            *dst = Pubkey::new_from_slice(src).map_err(|_| TokenError::InvalidAccountData)?;
        }
        Ok(result)
    }

    fn pack_into_slice(&self, dst: &mut [u8]) {
        let dst = array_mut_ref![dst, 0, 355];
        let (m, n, is_initialized, signers_flat) =
            mut_array_refs![dst, 1, 1, 1, 32 * MAX_SIGNERS];
        *m = [self.m];
        *n = [self.n];
        *is_initialized = [self.is_initialized as u8];
        for (i, src) in self.signers.iter().enumerate() {
            let dst_array = array_mut_ref![signers_flat, 32 * i, 32];
            dst_array.copy_from_slice(src.as_ref());
        }
    }
}

fn unpack_bool(src: &[u8; 1]) -> TokenResult<bool> {
    match src[0] {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(TokenError::InvalidAccountData),
    }
}

fn unpack_option_key(src: &[u8; 36]) -> TokenResult<Option<Pubkey>> {
    let (tag, body) = array_refs![src, 4, 32];
    match *tag {
        [0, 0, 0, 0] => Ok(None),
        [1, 0, 0, 0] => Ok(Some(Pubkey::new(*body))),
        _ => Err(TokenError::InvalidAccountData),
    }
}

fn pack_option_key(src: &Option<Pubkey>, dst: &mut [u8; 36]) {
    let (tag, body) = mut_array_refs![dst, 4, 32];
    match src {
        Some(key) => {
            *tag = [1, 0, 0, 0];
            body.copy_from_slice(key.as_ref());
        }
        None => {
            *tag = [0; 4];
            *body = [0; 32];
        }
    }
}

fn unpack_option_u64(src: &[u8; 12]) -> TokenResult<Option<u64>> {
    let (tag, body) = array_refs![src, 4, 8];
    match *tag {
        [0, 0, 0, 0] => Ok(None),
        [1, 0, 0, 0] => Ok(Some(u64::from_le_bytes(*body))),
        _ => Err(TokenError::InvalidAccountData),
    }
}

fn pack_option_u64(src: &Option<u64>, dst: &mut [u8; 12]) {
    let (tag, body) = mut_array_refs![dst, 4, 8];
    match src {
        Some(amount) => {
            *tag = [1, 0, 0, 0];
            *body = amount.to_le_bytes();
        }
        None => {
            *tag = [0; 4];
            *body = [0; 8];
        }
    }
}
