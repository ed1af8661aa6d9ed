//! Per-account deposit ledger.
//!
//! Each account owns an append-only list of slots. Withdrawn or refunded
//! slots are overwritten with an empty record rather than removed, so a slot
//! index handed out by `deposit` stays valid for the life of the vault.
//!
//! Every operation here validates fully and performs its token transfer
//! before the first storage write. A rejected operation therefore leaves the
//! ledger untouched, which is what lets `batch` tolerate individual failures.
//! Callers are responsible for authentication.

use soroban_sdk::{Address, Env, Vec};

use crate::errors::ContractError;
use crate::storage::{self, Deposit, VaultConfig};
use crate::{curve, events, shares, transfer};

/// Floor applied to every new lock so a zero-length deposit cannot collect
/// multiplier shares within a single ledger.
pub const MIN_LOCK_DURATION: u64 = 600;

// ── Validation helpers ───────────────────────────────────────────────────────

pub(crate) fn require_positive(amount: i128) -> Result<(), ContractError> {
    if amount == 0 {
        return Err(ContractError::ZeroAmount);
    }
    if amount < 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

/// The vault's own address is the null identity: anything sent there is lost.
pub(crate) fn require_receiver(env: &Env, receiver: &Address) -> Result<(), ContractError> {
    if *receiver == env.current_contract_address() {
        return Err(ContractError::ZeroAddress);
    }
    Ok(())
}

/// Clamp a requested duration for a lock starting at `now`.
///
/// The result lies in `[MIN_LOCK_DURATION, max_lock_duration]` and never
/// reaches past `end_date`. Fails when less than the minimum remains.
pub fn lock_duration(config: &VaultConfig, now: u64, requested: u64) -> Result<u64, ContractError> {
    if now >= config.end_date {
        return Err(ContractError::ProgramExpired);
    }
    let duration = requested.clamp(MIN_LOCK_DURATION, config.max_lock_duration);
    let remaining = config.end_date - now;
    if duration <= remaining {
        return Ok(duration);
    }
    if remaining < MIN_LOCK_DURATION {
        return Err(ContractError::ProgramExpired);
    }
    Ok(remaining)
}

/// Duration of a slot ending at `end` once `additional` seconds are added at
/// `now`. Caller guarantees `now < end`.
pub fn extended_duration(config: &VaultConfig, now: u64, end: u64, additional: u64) -> u64 {
    (end - now)
        .saturating_add(additional)
        .min(config.max_lock_duration)
        .min(config.end_date.saturating_sub(now))
}

fn live_slot(
    env: &Env,
    account: &Address,
    deposit_id: u32,
) -> Result<(Vec<Deposit>, Deposit), ContractError> {
    let list = storage::deposits(env, account);
    match list.get(deposit_id) {
        Some(slot) if slot.is_live() => Ok((list, slot)),
        _ => Err(ContractError::NonExistingDeposit),
    }
}

fn shares_for(
    env: &Env,
    config: &VaultConfig,
    amount: i128,
    duration: u64,
) -> Result<i128, ContractError> {
    let points = storage::curve(env)?;
    let multiplier = curve::multiplier(&points, config.max_lock_duration, duration)?;
    curve::share_amount(amount, multiplier)
}

// ── Reads ────────────────────────────────────────────────────────────────────

pub fn get(env: &Env, account: &Address, deposit_id: u32) -> Result<Deposit, ContractError> {
    storage::deposits(env, account)
        .get(deposit_id)
        .ok_or(ContractError::NonExistingDeposit)
}

/// Sum of principal over the account's live slots.
pub fn total_deposit(env: &Env, account: &Address) -> i128 {
    storage::deposits(env, account)
        .iter()
        .fold(0i128, |acc, d| acc.saturating_add(d.amount))
}

// ── Mutations ────────────────────────────────────────────────────────────────

/// Lock `amount` pulled from `depositor` into a new slot owned by `receiver`.
pub fn deposit(
    env: &Env,
    depositor: &Address,
    amount: i128,
    requested_duration: u64,
    receiver: &Address,
) -> Result<u32, ContractError> {
    require_positive(amount)?;
    require_receiver(env, receiver)?;

    let config = storage::config(env)?;
    let now = env.ledger().timestamp();
    let duration = lock_duration(&config, now, requested_duration)?;
    let share_amount = shares_for(env, &config, amount, duration)?;

    let mut list = storage::deposits(env, receiver);
    let deposit_id = list.len();
    let record = Deposit {
        amount,
        share_amount,
        start: now,
        end: now + duration,
    };

    transfer::pull(env, &config.deposit_token, depositor, amount)?;

    list.push_back(record.clone());
    storage::set_deposits(env, receiver, &list);
    shares::mint(env, receiver, share_amount)?;

    events::publish_deposited(
        env,
        deposit_id,
        receiver.clone(),
        depositor.clone(),
        amount,
        share_amount,
        record.start,
        record.end,
    );

    Ok(deposit_id)
}

/// Release an expired slot's principal to `receiver` and empty the slot.
pub fn withdraw(
    env: &Env,
    owner: &Address,
    deposit_id: u32,
    receiver: &Address,
) -> Result<i128, ContractError> {
    require_receiver(env, receiver)?;

    let config = storage::config(env)?;
    let (mut list, slot) = live_slot(env, owner, deposit_id)?;
    if env.ledger().timestamp() < slot.end {
        return Err(ContractError::TooSoon);
    }

    transfer::send(env, &config.deposit_token, receiver, slot.amount)?;

    list.set(deposit_id, Deposit::empty());
    storage::set_deposits(env, owner, &list);
    shares::burn(env, owner, slot.share_amount)?;

    events::publish_withdrawn(
        env,
        deposit_id,
        owner.clone(),
        receiver.clone(),
        slot.amount,
        slot.share_amount,
    );

    Ok(slot.amount)
}

/// Restart a live slot at `now` with its remaining time plus `additional`.
pub fn extend_lock(
    env: &Env,
    owner: &Address,
    deposit_id: u32,
    additional: u64,
) -> Result<(), ContractError> {
    if additional == 0 {
        return Err(ContractError::ZeroDuration);
    }

    let config = storage::config(env)?;
    let (mut list, slot) = live_slot(env, owner, deposit_id)?;
    let now = env.ledger().timestamp();
    if now >= slot.end {
        return Err(ContractError::DepositExpired);
    }

    let duration = extended_duration(&config, now, slot.end, additional);
    let share_amount = shares_for(env, &config, slot.amount, duration)?;

    list.set(
        deposit_id,
        Deposit {
            amount: slot.amount,
            share_amount,
            start: now,
            end: now + duration,
        },
    );
    storage::set_deposits(env, owner, &list);
    shares::adjust(env, owner, slot.share_amount, share_amount)?;

    events::publish_lock_extended(env, deposit_id, additional, owner.clone());

    Ok(())
}

/// Add principal to a live slot without touching its timer.
///
/// The added shares are priced on the slot's remaining duration only.
pub fn increase_lock(
    env: &Env,
    payer: &Address,
    deposit_id: u32,
    owner: &Address,
    added: i128,
) -> Result<(), ContractError> {
    require_positive(added)?;

    let config = storage::config(env)?;
    let (mut list, slot) = live_slot(env, owner, deposit_id)?;
    let now = env.ledger().timestamp();
    if now >= slot.end {
        return Err(ContractError::DepositExpired);
    }

    let added_shares = shares_for(env, &config, added, slot.end - now)?;
    let amount = slot
        .amount
        .checked_add(added)
        .ok_or(ContractError::MathOverflow)?;
    let share_amount = slot
        .share_amount
        .checked_add(added_shares)
        .ok_or(ContractError::MathOverflow)?;

    transfer::pull(env, &config.deposit_token, payer, added)?;

    list.set(
        deposit_id,
        Deposit {
            amount,
            share_amount,
            start: slot.start,
            end: slot.end,
        },
    );
    storage::set_deposits(env, owner, &list);
    shares::mint(env, owner, added_shares)?;

    events::publish_lock_increased(env, deposit_id, payer.clone(), owner.clone(), added);

    Ok(())
}

/// Strip the multiplier bonus from an expired slot: shares fall to 1×.
/// Principal stays in the slot for the owner to withdraw.
pub fn kick(env: &Env, deposit_id: u32, account: &Address) -> Result<(), ContractError> {
    let (mut list, slot) = live_slot(env, account, deposit_id)?;
    if env.ledger().timestamp() < slot.end {
        return Err(ContractError::TooSoon);
    }

    let share_delta = slot.amount - slot.share_amount;
    if share_delta != 0 {
        list.set(
            deposit_id,
            Deposit {
                share_amount: slot.amount,
                ..slot.clone()
            },
        );
        storage::set_deposits(env, account, &list);
        shares::adjust(env, account, slot.share_amount, slot.amount)?;
    }

    events::publish_kicked(env, deposit_id, account.clone(), slot.amount, share_delta);

    Ok(())
}

/// Return a live slot's principal to its owner regardless of `end`.
pub fn refund(
    env: &Env,
    refunder: &Address,
    deposit_id: u32,
    account: &Address,
) -> Result<i128, ContractError> {
    let config = storage::config(env)?;
    let (mut list, slot) = live_slot(env, account, deposit_id)?;

    transfer::send(env, &config.deposit_token, account, slot.amount)?;

    list.set(deposit_id, Deposit::empty());
    storage::set_deposits(env, account, &list);
    shares::burn(env, account, slot.share_amount)?;

    events::publish_refunded(env, deposit_id, account.clone(), refunder.clone(), slot.amount);

    Ok(slot.amount)
}
