//! Several ledger operations under one caller in one invocation.
//!
//! Every batched call observes the same ledger timestamp. With
//! `require_success` the first failure aborts the whole invocation; without
//! it a failing call is skipped, reported through `BatchCallFailed`, and the
//! batch moves on. Skipping is sound because each ledger operation rejects
//! before its first write. `MathOverflow` is the exception: it can surface
//! after effects have begun, so it always aborts.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::errors::ContractError;
use crate::{escrow, events, ledger};

/// A single batched operation. The batch caller acts as depositor, owner
/// or payer as each variant requires.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BatchCall {
    /// `(amount, duration, receiver)`
    Deposit(i128, u64, Address),
    /// `(deposit_id, receiver)`
    Withdraw(u32, Address),
    /// `(deposit_id, increase_duration)`
    ExtendLock(u32, u64),
    /// `(deposit_id, owner, increase_amount)`
    IncreaseLock(u32, Address, i128),
    /// `(deposit_id, account)`
    Kick(u32, Address),
    /// `(receiver)`
    ClaimRewards(Address),
}

/// Status code reported for a call that succeeded.
pub const CALL_OK: u32 = 0;

fn dispatch(env: &Env, caller: &Address, call: BatchCall) -> Result<(), ContractError> {
    match call {
        BatchCall::Deposit(amount, duration, receiver) => {
            ledger::deposit(env, caller, amount, duration, &receiver).map(|_| ())
        }
        BatchCall::Withdraw(deposit_id, receiver) => {
            ledger::withdraw(env, caller, deposit_id, &receiver).map(|_| ())
        }
        BatchCall::ExtendLock(deposit_id, duration) => {
            ledger::extend_lock(env, caller, deposit_id, duration)
        }
        BatchCall::IncreaseLock(deposit_id, owner, amount) => {
            ledger::increase_lock(env, caller, deposit_id, &owner, amount)
        }
        BatchCall::Kick(deposit_id, account) => ledger::kick(env, deposit_id, &account),
        BatchCall::ClaimRewards(receiver) => escrow::claim(env, caller, &receiver).map(|_| ()),
    }
}

/// Run `calls` in order, returning one status code per call
/// (`CALL_OK` or the `ContractError` discriminant).
pub fn execute(
    env: &Env,
    caller: &Address,
    calls: Vec<BatchCall>,
    require_success: bool,
) -> Result<Vec<u32>, ContractError> {
    let mut codes = Vec::new(env);
    for (index, call) in calls.iter().enumerate() {
        match dispatch(env, caller, call) {
            Ok(()) => codes.push_back(CALL_OK),
            Err(err) if require_success || err == ContractError::MathOverflow => {
                return Err(err);
            }
            Err(err) => {
                events::publish_batch_call_failed(env, index as u32, err as u32);
                codes.push_back(err as u32);
            }
        }
    }
    Ok(codes)
}
