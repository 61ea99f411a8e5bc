//! Wrapped native balances
//!
//! A token account of the native mint holds its tokens as lamports in the
//! same slot. `amount` always equals the slot's lamports above the rent-exempt
//! reserve recorded in `is_native`.

use super::state::{Mint, TokenAccount};
use crate::accounts::LoadedAccount;
use crate::error::{TokenError, TokenResult};
use crate::types::Pubkey;

/// Native mint: So11111111111111111111111111111111111111112
pub const NATIVE_MINT: Pubkey = Pubkey::new([
    0x06, 0x9b, 0x88, 0x57, 0xfe, 0xab, 0x81, 0x84,
    0xfb, 0x68, 0x7f, 0x63, 0x46, 0x18, 0xc0, 0x35,
    0xda, 0xc4, 0x39, 0xdc, 0x1a, 0xeb, 0x3b, 0x55,
    0x98, 0xa0, 0xf0, 0x00, 0x00, 0x00, 0x00, 0x01,
]);

/// Decimals of the native asset
pub const NATIVE_DECIMALS: u8 = 9;

pub fn is_native_mint(mint: &Pubkey) -> bool {
    *mint == NATIVE_MINT
}

/// The record reported for the native mint. Its supply is always 0: wrapped
/// balances are never minted or burned, only moved.
pub fn native_mint_record() -> Mint {
    Mint {
        mint_authority: None,
        supply: 0,
        decimals: NATIVE_DECIMALS,
        is_initialized: true,
        freeze_authority: None,
    }
}

/// Bind a freshly initialized account to the slot's native balance.
pub fn wrap(account: &mut TokenAccount, slot: &LoadedAccount, rent_exempt_reserve: u64) -> TokenResult<()> {
    account.is_native = Some(rent_exempt_reserve);
    account.amount = slot
        .lamports()
        .checked_sub(rent_exempt_reserve)
        .ok_or(TokenError::NotRentExempt)?;
    Ok(())
}

/// Move `amount` lamports alongside a token transfer between two native accounts.
pub fn move_lamports(
    source: &mut LoadedAccount,
    destination: &mut LoadedAccount,
    amount: u64,
) -> TokenResult<()> {
    if !source.is_writable || !destination.is_writable {
        return Err(TokenError::AccountNotWritable);
    }
    source.account.checked_sub_lamports(amount)?;
    destination.account.checked_add_lamports(amount)?;
    Ok(())
}

/// Refresh `amount` from the slot's lamports. Lamports deposited directly into
/// the slot become tokens; the balance can never shrink this way.
pub fn sync(account: &mut TokenAccount, slot: &LoadedAccount) -> TokenResult<()> {
    let reserve = account.is_native.ok_or(TokenError::NativeNotSupported)?;
    let new_amount = slot
        .lamports()
        .checked_sub(reserve)
        .ok_or(TokenError::NumericOverflow)?;
    if new_amount < account.amount {
        return Err(TokenError::InvalidState);
    }
    account.amount = new_amount;
    Ok(())
}
