use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");
const ROLE_MEMBERS: Symbol = symbol_short!("ROLE_MBR");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Role Enum ────────────────────────────────────────────────────────────────

/// Capabilities recognised by the vault contracts.
///
/// Roles are flat: holding one never implies another. An address that
/// needs two capabilities must be granted both explicitly.
///
/// - `Admin`       – Curve configuration, role administration, code upgrades.
/// - `Distributor` – May push reward tokens into a vault.
/// - `Refunder`    – May force-return a live deposit's principal to its owner.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 1,
    Distributor = 2,
    Refunder = 3,
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn role_key(role: Role, account: &Address) -> (Symbol, Role, Address) {
    (ROLE_PREFIX, role, account.clone())
}

fn members_key(role: Role) -> (Symbol, Role) {
    (ROLE_MEMBERS, role)
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Returns true if `account` currently holds `role`.
pub fn has_role(env: &Env, role: Role, account: &Address) -> bool {
    let key = role_key(role, account);
    let held: bool = env.storage().persistent().get(&key).unwrap_or(false);
    if held {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    held
}

/// Grants `role` to `account`.
///
/// Callers must verify authorization beforehand.
/// Returns `false` when the account already held the role.
pub fn grant_role(env: &Env, role: Role, account: &Address) -> bool {
    if has_role(env, role, account) {
        return false;
    }
    let key = role_key(role, account);
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    track_member(env, role, account);
    true
}

/// Removes `role` from `account`. Returns `false` if it was not held.
pub fn revoke_role(env: &Env, role: Role, account: &Address) -> bool {
    if !has_role(env, role, account) {
        return false;
    }
    env.storage().persistent().remove(&role_key(role, account));
    untrack_member(env, role, account);
    true
}

// ── Member Registry ──────────────────────────────────────────────────────────

/// Returns every address currently holding `role`.
pub fn members(env: &Env, role: Role) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&members_key(role))
        .unwrap_or(Vec::new(env))
}

fn track_member(env: &Env, role: Role, account: &Address) {
    let mut list = members(env, role);
    if !list.contains(account) {
        list.push_back(account.clone());
        env.storage().persistent().set(&members_key(role), &list);
    }
}

fn untrack_member(env: &Env, role: Role, account: &Address) {
    let mut list = members(env, role);
    if let Some(idx) = list.first_index_of(account) {
        list.remove(idx);
        env.storage().persistent().set(&members_key(role), &list);
    }
}
