//! Stored schema of the vault and typed accessors over it.
//!
//! The layout is append-only across code revisions:
//! - `DataKey` variants are never renamed, reordered or retyped; new state
//!   gets a new variant at the end of the enum.
//! - `Deposit` and `VaultConfig` are frozen. The host encodes them as maps
//!   keyed by field name, so adding a field would make every existing entry
//!   undecodable. Extra per-deposit data goes under a new key instead.
//!
//! Bump `LAYOUT_VERSION` whenever a variant is appended.

use soroban_sdk::{contracttype, Address, Env, Vec};

use crate::errors::ContractError;

/// Layout revision written by `initialize` and `migrate`.
///
/// 2: appended `RewardDust`.
pub const LAYOUT_VERSION: u32 = 2;

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    // ── instance ─────────────────────────────────────────────
    Initialized,
    LayoutVersion,
    Config,
    Curve,
    TotalShares,
    RewardPerShare,
    // ── persistent, per account ──────────────────────────────
    Deposits(Address),
    Shares(Address),
    RewardPaid(Address),
    RewardEarned(Address),
    // ── instance, layout 2 ───────────────────────────────────
    RewardDust,
}

/// One timed lock position.
///
/// A slot with `amount == 0` is empty: it was withdrawn or refunded and is
/// kept only so later slot indices stay stable.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deposit {
    pub amount: i128,
    pub share_amount: i128,
    pub start: u64,
    pub end: u64,
}

impl Deposit {
    pub fn empty() -> Self {
        Deposit {
            amount: 0,
            share_amount: 0,
            start: 0,
            end: 0,
        }
    }

    pub fn is_live(&self) -> bool {
        self.amount > 0
    }
}

/// Deployment parameters fixed at `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    pub deposit_token: Address,
    pub reward_token: Address,
    /// `None` disables escrow entirely.
    pub escrow_pool: Option<Address>,
    /// Fraction of distributed rewards forwarded to escrow, in `SCALE` units.
    pub escrow_portion: i128,
    pub escrow_duration: u64,
    /// Upper bound on every curve control point.
    pub max_bonus: i128,
    pub max_lock_duration: u64,
    pub end_date: u64,
}

// ── Instance storage ─────────────────────────────────────────────────────────

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Initialized)
}

pub fn mark_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
    bump_instance(env);
}

pub fn layout_version(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::LayoutVersion)
        .unwrap_or(0)
}

pub fn set_layout_version(env: &Env, version: u32) {
    env.storage()
        .instance()
        .set(&DataKey::LayoutVersion, &version);
}

pub fn config(env: &Env) -> Result<VaultConfig, ContractError> {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_config(env: &Env, config: &VaultConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn curve(env: &Env) -> Result<Vec<i128>, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Curve)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_curve(env: &Env, points: &Vec<i128>) {
    env.storage().instance().set(&DataKey::Curve, points);
}

pub fn total_shares(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalShares)
        .unwrap_or(0)
}

pub fn set_total_shares(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalShares, &total);
}

pub fn reward_per_share(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::RewardPerShare)
        .unwrap_or(0)
}

pub fn set_reward_per_share(env: &Env, value: i128) {
    env.storage()
        .instance()
        .set(&DataKey::RewardPerShare, &value);
}

/// Scaled remainder the accumulator could not represent yet.
pub fn reward_dust(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::RewardDust)
        .unwrap_or(0)
}

pub fn set_reward_dust(env: &Env, value: i128) {
    env.storage().instance().set(&DataKey::RewardDust, &value);
}

// ── Persistent storage ───────────────────────────────────────────────────────

fn read_persistent<V>(env: &Env, key: &DataKey) -> Option<V>
where
    V: soroban_sdk::TryFromVal<Env, soroban_sdk::Val>,
{
    let value: Option<V> = env.storage().persistent().get(key);
    if value.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    value
}

fn write_persistent<V>(env: &Env, key: &DataKey, value: &V)
where
    V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.storage().persistent().set(key, value);
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn deposits(env: &Env, account: &Address) -> Vec<Deposit> {
    read_persistent(env, &DataKey::Deposits(account.clone())).unwrap_or(Vec::new(env))
}

pub fn set_deposits(env: &Env, account: &Address, list: &Vec<Deposit>) {
    write_persistent(env, &DataKey::Deposits(account.clone()), list);
}

pub fn share_balance(env: &Env, account: &Address) -> i128 {
    read_persistent(env, &DataKey::Shares(account.clone())).unwrap_or(0)
}

pub fn set_share_balance(env: &Env, account: &Address, balance: i128) {
    write_persistent(env, &DataKey::Shares(account.clone()), &balance);
}

pub fn reward_paid(env: &Env, account: &Address) -> i128 {
    read_persistent(env, &DataKey::RewardPaid(account.clone())).unwrap_or(0)
}

pub fn set_reward_paid(env: &Env, account: &Address, value: i128) {
    write_persistent(env, &DataKey::RewardPaid(account.clone()), &value);
}

pub fn reward_earned(env: &Env, account: &Address) -> i128 {
    read_persistent(env, &DataKey::RewardEarned(account.clone())).unwrap_or(0)
}

pub fn set_reward_earned(env: &Env, account: &Address, value: i128) {
    write_persistent(env, &DataKey::RewardEarned(account.clone()), &value);
}
