//! Reward-per-share accumulator.
//!
//! Distributed rewards raise a global `reward_per_share` figure. Each account
//! keeps a snapshot of that figure from its last flush plus the rewards it
//! had earned up to then. Flushing before every share mint or burn means an
//! account never earns retroactively on shares it did not yet hold.

use soroban_sdk::{Address, Env};

use crate::errors::ContractError;
use crate::storage;

/// Fixed-point precision of the per-share accumulator.
pub const REWARD_PRECISION: i128 = 1_000_000_000;

/// Spread `amount` plus the carried `dust` over `total_shares`.
///
/// Returns the new accumulator and the scaled remainder to carry into the
/// next distribution. `dust` is in `REWARD_PRECISION` units.
pub fn accrue(
    stored: i128,
    dust: i128,
    amount: i128,
    total_shares: i128,
) -> Result<(i128, i128), ContractError> {
    if total_shares <= 0 {
        return Err(ContractError::NoShares);
    }
    let scaled = amount
        .checked_mul(REWARD_PRECISION)
        .and_then(|v| v.checked_add(dust))
        .ok_or(ContractError::MathOverflow)?;
    let value = stored
        .checked_add(scaled / total_shares)
        .ok_or(ContractError::MathOverflow)?;
    Ok((value, scaled % total_shares))
}

/// Rewards owed to a holder of `shares` since its `paid` snapshot.
pub fn earned(
    shares: i128,
    current: i128,
    paid: i128,
    prior: i128,
) -> Result<i128, ContractError> {
    current
        .checked_sub(paid)
        .and_then(|d| d.checked_mul(shares))
        .map(|v| v / REWARD_PRECISION)
        .and_then(|v| v.checked_add(prior))
        .ok_or(ContractError::MathOverflow)
}

/// Settle `account` against the current accumulator.
pub fn flush(env: &Env, account: &Address) -> Result<(), ContractError> {
    let current = storage::reward_per_share(env);
    let paid = storage::reward_paid(env, account);
    if current == paid {
        return Ok(());
    }
    let owed = earned(
        storage::share_balance(env, account),
        current,
        paid,
        storage::reward_earned(env, account),
    )?;
    storage::set_reward_earned(env, account, owed);
    storage::set_reward_paid(env, account, current);
    Ok(())
}

/// Claimable rewards for `account`, without touching storage.
pub fn pending(env: &Env, account: &Address) -> Result<i128, ContractError> {
    earned(
        storage::share_balance(env, account),
        storage::reward_per_share(env),
        storage::reward_paid(env, account),
        storage::reward_earned(env, account),
    )
}

/// Flush and zero the account's earned balance, returning what was owed.
pub fn take(env: &Env, account: &Address) -> Result<i128, ContractError> {
    flush(env, account)?;
    let owed = storage::reward_earned(env, account);
    if owed > 0 {
        storage::set_reward_earned(env, account, 0);
    }
    Ok(owed)
}
