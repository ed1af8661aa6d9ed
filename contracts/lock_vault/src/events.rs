#![allow(deprecated)] // events().publish migration tracked separately

use common::roles::Role;
use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the vault is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub deposit_token: Address,
    pub reward_token: Address,
    pub max_lock_duration: u64,
    pub end_date: u64,
    pub timestamp: u64,
}

/// Fired when a new slot is appended to an account's ledger.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub deposit_id: u32,
    pub owner: Address,
    pub depositor: Address,
    pub amount: i128,
    pub share_amount: i128,
    pub start: u64,
    pub end: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub deposit_id: u32,
    pub owner: Address,
    pub receiver: Address,
    pub amount: i128,
    pub share_burned: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockExtendedEvent {
    pub deposit_id: u32,
    pub added_duration: u64,
    pub owner: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockIncreasedEvent {
    pub deposit_id: u32,
    pub payer: Address,
    pub owner: Address,
    pub added_amount: i128,
    pub timestamp: u64,
}

/// Fired when an expired slot loses its multiplier bonus.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct KickedEvent {
    pub deposit_id: u32,
    pub owner: Address,
    pub amount: i128,
    /// New share amount minus old. Negative when the bonus was stripped,
    /// positive when the curve starts below 1×.
    pub share_delta: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RefundedEvent {
    pub deposit_id: u32,
    pub owner: Address,
    pub refunder: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsDistributedEvent {
    pub distributor: Address,
    pub amount: i128,
    pub escrowed: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsClaimedEvent {
    pub account: Address,
    pub receiver: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CurveUpdatedEvent {
    pub points: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub role: Role,
    pub account: Address,
    pub sender: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LayoutEvent {
    pub from_version: u32,
    pub to_version: u32,
    pub timestamp: u64,
}

/// Fired for each batched call whose failure was tolerated.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchCallFailedEvent {
    pub index: u32,
    pub error_code: u32,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    deposit_token: Address,
    reward_token: Address,
    max_lock_duration: u64,
    end_date: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            deposit_token,
            reward_token,
            max_lock_duration,
            end_date,
            timestamp: env.ledger().timestamp(),
        },
    );
}

#[allow(clippy::too_many_arguments)]
pub fn publish_deposited(
    env: &Env,
    deposit_id: u32,
    owner: Address,
    depositor: Address,
    amount: i128,
    share_amount: i128,
    start: u64,
    end: u64,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), owner.clone()),
        DepositedEvent {
            deposit_id,
            owner,
            depositor,
            amount,
            share_amount,
            start,
            end,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    deposit_id: u32,
    owner: Address,
    receiver: Address,
    amount: i128,
    share_burned: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), owner.clone()),
        WithdrawnEvent {
            deposit_id,
            owner,
            receiver,
            amount,
            share_burned,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_lock_extended(env: &Env, deposit_id: u32, added_duration: u64, owner: Address) {
    env.events().publish(
        (symbol_short!("LOCK_EXT"), owner.clone()),
        LockExtendedEvent {
            deposit_id,
            added_duration,
            owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_lock_increased(
    env: &Env,
    deposit_id: u32,
    payer: Address,
    owner: Address,
    added_amount: i128,
) {
    env.events().publish(
        (symbol_short!("LOCK_INC"), owner.clone()),
        LockIncreasedEvent {
            deposit_id,
            payer,
            owner,
            added_amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_kicked(env: &Env, deposit_id: u32, owner: Address, amount: i128, share_delta: i128) {
    env.events().publish(
        (symbol_short!("KICKED"), owner.clone()),
        KickedEvent {
            deposit_id,
            owner,
            amount,
            share_delta,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_refunded(env: &Env, deposit_id: u32, owner: Address, refunder: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("REFUNDED"), owner.clone()),
        RefundedEvent {
            deposit_id,
            owner,
            refunder,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_distributed(env: &Env, distributor: Address, amount: i128, escrowed: i128) {
    env.events().publish(
        (symbol_short!("RWD_DIST"),),
        RewardsDistributedEvent {
            distributor,
            amount,
            escrowed,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_claimed(env: &Env, account: Address, receiver: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), account.clone()),
        RewardsClaimedEvent {
            account,
            receiver,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_curve_updated(env: &Env, points: u32) {
    env.events().publish(
        (symbol_short!("CURVE"),),
        CurveUpdatedEvent {
            points,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_granted(env: &Env, role: Role, account: Address, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_GRT"), account.clone()),
        RoleChangedEvent {
            role,
            account,
            sender,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_revoked(env: &Env, role: Role, account: Address, sender: Address) {
    env.events().publish(
        (symbol_short!("ROLE_RVK"), account.clone()),
        RoleChangedEvent {
            role,
            account,
            sender,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_upgraded(env: &Env, layout_version: u32) {
    env.events().publish(
        (symbol_short!("UPGRADED"),),
        LayoutEvent {
            from_version: layout_version,
            to_version: layout_version,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_migrated(env: &Env, from_version: u32, to_version: u32) {
    env.events().publish(
        (symbol_short!("MIGRATED"),),
        LayoutEvent {
            from_version,
            to_version,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_batch_call_failed(env: &Env, index: u32, error_code: u32) {
    env.events().publish(
        (symbol_short!("BATCH_ERR"),),
        BatchCallFailedEvent {
            index,
            error_code,
            timestamp: env.ledger().timestamp(),
        },
    );
}
