//! Non-transferable share balances.
//!
//! An account's balance is the sum of `share_amount` over its live deposit
//! slots. Only ledger mutations move it, and every move settles the
//! account's rewards first.

use soroban_sdk::{Address, Env};

use crate::errors::ContractError;
use crate::{rewards, storage};

pub fn mint(env: &Env, account: &Address, amount: i128) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let balance = storage::share_balance(env, account)
        .checked_add(amount)
        .ok_or(ContractError::MathOverflow)?;
    let total = storage::total_shares(env)
        .checked_add(amount)
        .ok_or(ContractError::MathOverflow)?;
    rewards::flush(env, account)?;
    storage::set_share_balance(env, account, balance);
    storage::set_total_shares(env, total);
    Ok(())
}

pub fn burn(env: &Env, account: &Address, amount: i128) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }
    let balance = storage::share_balance(env, account)
        .checked_sub(amount)
        .filter(|b| *b >= 0)
        .ok_or(ContractError::MathOverflow)?;
    let total = storage::total_shares(env)
        .checked_sub(amount)
        .filter(|t| *t >= 0)
        .ok_or(ContractError::MathOverflow)?;
    rewards::flush(env, account)?;
    storage::set_share_balance(env, account, balance);
    storage::set_total_shares(env, total);
    Ok(())
}

/// Move `account` from `old` to `new` shares, minting or burning the delta.
/// Works in either direction; the curve is not assumed to be monotonic.
pub fn adjust(env: &Env, account: &Address, old: i128, new: i128) -> Result<(), ContractError> {
    if new >= old {
        mint(env, account, new - old)
    } else {
        burn(env, account, old - new)
    }
}
