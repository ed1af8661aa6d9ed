#![no_std]

pub mod batch;
pub mod curve;
pub mod errors;
pub mod escrow;
pub mod events;
pub mod ledger;
pub mod rewards;
pub mod shares;
pub mod storage;
mod transfer;

use common::roles;
use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env, Vec};

pub use batch::BatchCall;
pub use common::roles::Role;
pub use curve::SCALE;
pub use errors::ContractError;
pub use ledger::MIN_LOCK_DURATION;
pub use storage::{Deposit, VaultConfig, LAYOUT_VERSION};

// ── Public-facing types (re-exported for test consumers) ─────────────────────

/// Escrow wiring returned by `get_escrow_config`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EscrowConfig {
    pub pool: Option<Address>,
    pub portion: i128,
    pub duration: u64,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct LockVault;

#[contractimpl]
impl LockVault {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the vault. Runs exactly once per deployment.
    ///
    /// * `admin`  – receives the `Admin` role.
    /// * `config` – tokens, escrow wiring and program bounds.
    /// * `curve`  – multiplier control points, each within `[0, max_bonus]`.
    pub fn initialize(
        env: Env,
        admin: Address,
        config: VaultConfig,
        curve: Vec<i128>,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if config.escrow_portion < 0 || config.escrow_portion > SCALE {
            return Err(ContractError::InvalidConfig);
        }
        if config.max_bonus < 0 || config.max_lock_duration < MIN_LOCK_DURATION {
            return Err(ContractError::InvalidConfig);
        }
        if config.end_date <= env.ledger().timestamp() {
            return Err(ContractError::InvalidConfig);
        }
        if config.escrow_pool == Some(env.current_contract_address()) {
            return Err(ContractError::InvalidConfig);
        }
        curve::validate(&curve, config.max_bonus)?;

        storage::set_config(&env, &config);
        storage::set_curve(&env, &curve);
        storage::set_layout_version(&env, LAYOUT_VERSION);
        storage::mark_initialized(&env);

        roles::grant_role(&env, Role::Admin, &admin);

        events::publish_initialized(
            &env,
            admin,
            config.deposit_token,
            config.reward_token,
            config.max_lock_duration,
            config.end_date,
        );

        Ok(())
    }

    // ── Ledger ──────────────────────────────────────────────────────────────

    /// Lock `amount` deposit tokens from `depositor` for `duration` seconds
    /// into a new slot owned by `receiver`. Returns the slot index.
    ///
    /// The duration is clamped to `[MIN_LOCK_DURATION, max_lock_duration]`
    /// and to the program end date.
    pub fn deposit(
        env: Env,
        depositor: Address,
        amount: i128,
        duration: u64,
        receiver: Address,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        depositor.require_auth();
        ledger::deposit(&env, &depositor, amount, duration, &receiver)
    }

    /// Release an expired slot's principal to `receiver`.
    pub fn withdraw(
        env: Env,
        owner: Address,
        deposit_id: u32,
        receiver: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        ledger::withdraw(&env, &owner, deposit_id, &receiver)
    }

    /// Restart a live slot now, for its remaining time plus
    /// `increase_duration`, repricing its shares on the new duration.
    pub fn extend_lock(
        env: Env,
        owner: Address,
        deposit_id: u32,
        increase_duration: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        ledger::extend_lock(&env, &owner, deposit_id, increase_duration)
    }

    /// Add `increase_amount`, paid by `payer`, to `owner`'s live slot.
    /// The slot's start and end are unchanged.
    pub fn increase_lock(
        env: Env,
        payer: Address,
        deposit_id: u32,
        owner: Address,
        increase_amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        payer.require_auth();
        ledger::increase_lock(&env, &payer, deposit_id, &owner, increase_amount)
    }

    /// Permissionless: reset an expired slot's shares to its principal.
    pub fn kick(env: Env, deposit_id: u32, account: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        ledger::kick(&env, deposit_id, &account)
    }

    /// Run several ledger calls as `caller` in one invocation.
    /// Returns a status code per call (`0` for success).
    pub fn batch(
        env: Env,
        caller: Address,
        calls: Vec<BatchCall>,
        require_success: bool,
    ) -> Result<Vec<u32>, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        batch::execute(&env, &caller, calls, require_success)
    }

    /// Shares are bound to the deposits that minted them.
    pub fn transfer(
        _env: Env,
        _from: Address,
        _to: Address,
        _amount: i128,
    ) -> Result<(), ContractError> {
        Err(ContractError::NonTransferable)
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Pull `amount` reward tokens from `distributor`, forward the escrowed
    /// portion and spread the rest over current share holders.
    /// Returns the escrowed amount.
    pub fn distribute_rewards(
        env: Env,
        distributor: Address,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        distributor.require_auth();
        Self::require_role(&env, &distributor, Role::Distributor)?;
        escrow::distribute(&env, &distributor, amount)
    }

    /// Pay everything `account` has accrued to `receiver`.
    pub fn claim_rewards(
        env: Env,
        account: Address,
        receiver: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();
        escrow::claim(&env, &account, &receiver)
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_multiplier(env: Env, duration: u64) -> Result<i128, ContractError> {
        let config = storage::config(&env)?;
        curve::multiplier(&storage::curve(&env)?, config.max_lock_duration, duration)
    }

    pub fn get_deposit(env: Env, account: Address, deposit_id: u32) -> Result<Deposit, ContractError> {
        ledger::get(&env, &account, deposit_id)
    }

    /// Every slot ever created for `account`, emptied ones included.
    pub fn get_deposits_of(env: Env, account: Address) -> Vec<Deposit> {
        storage::deposits(&env, &account)
    }

    pub fn get_deposits_of_length(env: Env, account: Address) -> u32 {
        storage::deposits(&env, &account).len()
    }

    pub fn get_total_deposit(env: Env, account: Address) -> i128 {
        ledger::total_deposit(&env, &account)
    }

    pub fn balance_of(env: Env, account: Address) -> i128 {
        storage::share_balance(&env, &account)
    }

    pub fn total_supply(env: Env) -> i128 {
        storage::total_shares(&env)
    }

    pub fn get_pending_rewards(env: Env, account: Address) -> Result<i128, ContractError> {
        rewards::pending(&env, &account)
    }

    /// Whole reward tokens received but not yet credited to any holder.
    /// They ride along with the next distribution.
    pub fn undistributed_rewards(env: Env) -> i128 {
        storage::reward_dust(&env) / rewards::REWARD_PRECISION
    }

    pub fn min_lock_duration(_env: Env) -> u64 {
        MIN_LOCK_DURATION
    }

    pub fn max_lock_duration(env: Env) -> Result<u64, ContractError> {
        Ok(storage::config(&env)?.max_lock_duration)
    }

    pub fn end_date(env: Env) -> Result<u64, ContractError> {
        Ok(storage::config(&env)?.end_date)
    }

    pub fn max_bonus(env: Env) -> Result<i128, ContractError> {
        Ok(storage::config(&env)?.max_bonus)
    }

    pub fn get_curve(env: Env) -> Result<Vec<i128>, ContractError> {
        storage::curve(&env)
    }

    pub fn get_config(env: Env) -> Result<VaultConfig, ContractError> {
        storage::config(&env)
    }

    pub fn get_escrow_config(env: Env) -> Result<EscrowConfig, ContractError> {
        let config = storage::config(&env)?;
        Ok(EscrowConfig {
            pool: config.escrow_pool,
            portion: config.escrow_portion,
            duration: config.escrow_duration,
        })
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    pub fn layout_version(env: Env) -> u32 {
        storage::layout_version(&env)
    }

    // ── Curve administration ─────────────────────────────────────────────────

    /// Replace the whole curve. Existing slots keep their share amounts.
    pub fn set_curve(env: Env, caller: Address, points: Vec<i128>) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, Role::Admin)?;

        let config = storage::config(&env)?;
        curve::validate(&points, config.max_bonus)?;
        storage::set_curve(&env, &points);

        events::publish_curve_updated(&env, points.len());
        Ok(())
    }

    /// Overwrite point `index`, or append when `index` equals the length.
    pub fn set_curve_point(
        env: Env,
        caller: Address,
        index: u32,
        value: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, Role::Admin)?;

        let config = storage::config(&env)?;
        curve::validate_point(value, config.max_bonus)?;

        let mut points = storage::curve(&env)?;
        if index < points.len() {
            points.set(index, value);
        } else if index == points.len() {
            points.push_back(value);
        } else {
            return Err(ContractError::InvalidCurve);
        }
        storage::set_curve(&env, &points);

        events::publish_curve_updated(&env, points.len());
        Ok(())
    }

    // ── Role management ──────────────────────────────────────────────────────

    /// Grant `role` to `account`. Only an `Admin` may call this.
    pub fn grant_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, Role::Admin)?;

        if roles::grant_role(&env, role, &account) {
            events::publish_role_granted(&env, role, account, caller);
        }
        Ok(())
    }

    /// Revoke `role` from `account`. Only an `Admin` may call this.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, Role::Admin)?;

        if roles::revoke_role(&env, role, &account) {
            events::publish_role_revoked(&env, role, account, caller);
        }
        Ok(())
    }

    /// Give up one of the caller's own roles.
    pub fn renounce_role(env: Env, account: Address, role: Role) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        account.require_auth();

        if roles::revoke_role(&env, role, &account) {
            events::publish_role_revoked(&env, role, account.clone(), account);
        }
        Ok(())
    }

    pub fn has_role(env: Env, role: Role, account: Address) -> bool {
        roles::has_role(&env, role, &account)
    }

    pub fn get_role_members(env: Env, role: Role) -> Vec<Address> {
        roles::members(&env, role)
    }

    // ── Upgrades ─────────────────────────────────────────────────────────────

    /// Swap the code driving this vault. Stored entries are untouched.
    pub fn upgrade(
        env: Env,
        caller: Address,
        new_wasm_hash: BytesN<32>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, Role::Admin)?;

        env.deployer().update_current_contract_wasm(new_wasm_hash);

        events::publish_upgraded(&env, storage::layout_version(&env));
        Ok(())
    }

    /// Record this revision's layout version after an upgrade.
    ///
    /// Only the version entry is written; every other stored entry keeps its
    /// exact contents. Refuses to move the version backwards.
    pub fn migrate(env: Env, caller: Address) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_role(&env, &caller, Role::Admin)?;

        let stored = storage::layout_version(&env);
        if stored > LAYOUT_VERSION {
            return Err(ContractError::LayoutDowngrade);
        }
        if stored < LAYOUT_VERSION {
            storage::set_layout_version(&env, LAYOUT_VERSION);
            events::publish_migrated(&env, stored, LAYOUT_VERSION);
        }
        Ok(LAYOUT_VERSION)
    }

    /// Return a live slot's principal to `account` before its end date.
    ///
    /// Requires the `Refunder` role; `Admin` alone is not enough.
    pub fn refund(
        env: Env,
        refunder: Address,
        deposit_id: u32,
        account: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        refunder.require_auth();
        Self::require_role(&env, &refunder, Role::Refunder)?;
        ledger::refund(&env, &refunder, deposit_id, &account)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !storage::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_role(env: &Env, caller: &Address, role: Role) -> Result<(), ContractError> {
        if !roles::has_role(env, role, caller) {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_rewards;
