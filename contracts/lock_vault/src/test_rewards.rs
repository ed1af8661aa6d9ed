extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    vec, Address, Env,
};

use crate::{ContractError, EscrowConfig, LockVault, LockVaultClient, Role, VaultConfig, SCALE};

const START: u64 = 1_000;
const MAX_LOCK: u64 = 100_000;
const ESCROW_DURATION: u64 = 50_000;

// ── Test helpers ─────────────────────────────────────────────────────────────

struct Fixture {
    env: Env,
    vault: LockVaultClient<'static>,
    admin: Address,
    distributor: Address,
    deposit_token: Address,
    reward_token: Address,
    pool: Option<LockVaultClient<'static>>,
}

/// Deploys a vault whose escrowed rewards go to a second vault staking the
/// reward token. `portion` is in `SCALE` units; `with_pool = false` leaves
/// escrow disabled.
fn setup(portion: i128, with_pool: bool) -> Fixture {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let deposit_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let curve = vec![&env, SCALE, 2 * SCALE];
    let admin = Address::generate(&env);

    let pool = if with_pool {
        let pool = LockVaultClient::new(&env, &env.register(LockVault, ()));
        pool.initialize(
            &admin,
            &VaultConfig {
                deposit_token: reward_token.clone(),
                reward_token: reward_token.clone(),
                escrow_pool: None,
                escrow_portion: 0,
                escrow_duration: 0,
                max_bonus: 2 * SCALE,
                max_lock_duration: MAX_LOCK,
                end_date: START + 100 * MAX_LOCK,
            },
            &curve,
        );
        Some(pool)
    } else {
        None
    };

    let vault = LockVaultClient::new(&env, &env.register(LockVault, ()));
    vault.initialize(
        &admin,
        &VaultConfig {
            deposit_token: deposit_token.clone(),
            reward_token: reward_token.clone(),
            escrow_pool: pool.as_ref().map(|p| p.address.clone()),
            escrow_portion: portion,
            escrow_duration: ESCROW_DURATION,
            max_bonus: 2 * SCALE,
            max_lock_duration: MAX_LOCK,
            end_date: START + 100 * MAX_LOCK,
        },
        &curve,
    );

    let distributor = Address::generate(&env);
    vault.grant_role(&admin, &Role::Distributor, &distributor);
    StellarAssetClient::new(&env, &reward_token).mint(&distributor, &1_000_000);

    Fixture {
        env,
        vault,
        admin,
        distributor,
        deposit_token,
        reward_token,
        pool,
    }
}

impl Fixture {
    /// New account holding `amount` locked for `MAX_LOCK` (2× shares).
    fn staker(&self, amount: i128) -> Address {
        let user = Address::generate(&self.env);
        StellarAssetClient::new(&self.env, &self.deposit_token).mint(&user, &amount);
        self.vault.deposit(&user, &amount, &MAX_LOCK, &user);
        user
    }

    fn reward_balance(&self, account: &Address) -> i128 {
        TokenClient::new(&self.env, &self.reward_token).balance(account)
    }
}

// ── Distribution ─────────────────────────────────────────────────────────────

#[test]
fn test_escrow_config_view() {
    let f = setup(SCALE / 4, true);
    let pool = f.pool.as_ref().unwrap();

    assert_eq!(
        f.vault.get_escrow_config(),
        EscrowConfig {
            pool: Some(pool.address.clone()),
            portion: SCALE / 4,
            duration: ESCROW_DURATION,
        }
    );
    assert_eq!(pool.get_escrow_config().pool, None);
}

#[test]
fn test_distribute_without_pool_accrues_everything() {
    let f = setup(SCALE / 2, false);
    let alice = f.staker(1_000);

    let escrowed = f.vault.distribute_rewards(&f.distributor, &4_000);

    assert_eq!(escrowed, 0);
    assert_eq!(f.vault.get_pending_rewards(&alice), 4_000);
    assert_eq!(f.reward_balance(&f.vault.address), 4_000);
    assert_eq!(f.reward_balance(&f.distributor), 1_000_000 - 4_000);
}

#[test]
fn test_distribute_splits_into_escrow() {
    let f = setup(SCALE / 4, true);
    let pool = f.pool.as_ref().unwrap();
    let alice = f.staker(1_000);

    let escrowed = f.vault.distribute_rewards(&f.distributor, &4_000);

    assert_eq!(escrowed, 1_000);
    assert_eq!(f.vault.get_pending_rewards(&alice), 3_000);
    assert_eq!(f.reward_balance(&f.vault.address), 3_000);
    assert_eq!(f.reward_balance(&pool.address), 1_000);

    // locked in the pool for the distributor
    let slot = pool.get_deposit(&f.distributor, &0);
    assert_eq!(slot.amount, 1_000);
    assert_eq!(slot.end - slot.start, ESCROW_DURATION);
    assert_eq!(slot.share_amount, 1_500);
    assert_eq!(pool.balance_of(&f.distributor), 1_500);
}

#[test]
fn test_portion_zero_escrows_nothing() {
    let f = setup(0, true);
    let pool = f.pool.as_ref().unwrap();
    let alice = f.staker(1_000);

    assert_eq!(f.vault.distribute_rewards(&f.distributor, &500), 0);
    assert_eq!(f.vault.get_pending_rewards(&alice), 500);
    assert_eq!(pool.get_deposits_of_length(&f.distributor), 0);
}

#[test]
fn test_portion_one_escrows_everything_even_without_shares() {
    let f = setup(SCALE, true);
    let pool = f.pool.as_ref().unwrap();

    assert_eq!(f.vault.total_supply(), 0);
    assert_eq!(f.vault.distribute_rewards(&f.distributor, &800), 800);
    assert_eq!(pool.get_deposit(&f.distributor, &0).amount, 800);
    assert_eq!(f.reward_balance(&f.vault.address), 0);
}

#[test]
fn test_escrow_split_floors() {
    let f = setup(SCALE / 3, true);
    let pool = f.pool.as_ref().unwrap();
    let alice = f.staker(1_000);

    // 1_000 / 3 = 333 escrowed, 667 accrued
    assert_eq!(f.vault.distribute_rewards(&f.distributor, &1_000), 333);
    assert_eq!(pool.get_deposit(&f.distributor, &0).amount, 333);
    assert_eq!(f.vault.get_pending_rewards(&alice), 667);
}

#[test]
fn test_distribute_with_no_shares_fails() {
    let f = setup(0, false);

    match f.vault.try_distribute_rewards(&f.distributor, &100) {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoShares),
        _ => unreachable!("Expected NoShares error"),
    }
    assert_eq!(f.reward_balance(&f.distributor), 1_000_000);
}

#[test]
fn test_distribute_rejects_bad_amount() {
    let f = setup(0, false);
    f.staker(1_000);

    match f.vault.try_distribute_rewards(&f.distributor, &0) {
        Err(Ok(e)) => assert_eq!(e, ContractError::ZeroAmount),
        _ => unreachable!("Expected ZeroAmount error"),
    }
    match f.vault.try_distribute_rewards(&f.distributor, &2_000_000) {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientAllowanceOrBalance),
        _ => unreachable!("Expected InsufficientAllowanceOrBalance error"),
    }
}

#[test]
fn test_distribute_requires_distributor_role() {
    let f = setup(0, false);
    f.staker(1_000);
    StellarAssetClient::new(&f.env, &f.reward_token).mint(&f.admin, &1_000);

    // Admin does not imply Distributor.
    match f.vault.try_distribute_rewards(&f.admin, &100) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    f.vault.revoke_role(&f.admin, &Role::Distributor, &f.distributor);
    match f.vault.try_distribute_rewards(&f.distributor, &100) {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_uninitialized_pool_reverts_distribution() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let deposit_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let dead_pool = env.register(LockVault, ());

    let vault = LockVaultClient::new(&env, &env.register(LockVault, ()));
    let admin = Address::generate(&env);
    vault.initialize(
        &admin,
        &VaultConfig {
            deposit_token,
            reward_token: reward_token.clone(),
            escrow_pool: Some(dead_pool),
            escrow_portion: SCALE,
            escrow_duration: ESCROW_DURATION,
            max_bonus: 2 * SCALE,
            max_lock_duration: MAX_LOCK,
            end_date: START + 100 * MAX_LOCK,
        },
        &vec![&env, SCALE, 2 * SCALE],
    );
    let distributor = Address::generate(&env);
    vault.grant_role(&admin, &Role::Distributor, &distributor);
    StellarAssetClient::new(&env, &reward_token).mint(&distributor, &100);

    match vault.try_distribute_rewards(&distributor, &100) {
        Err(Ok(e)) => assert_eq!(e, ContractError::EscrowForwardFailed),
        _ => unreachable!("Expected EscrowForwardFailed error"),
    }
    assert_eq!(TokenClient::new(&env, &reward_token).balance(&distributor), 100);
}

// ── Accrual ──────────────────────────────────────────────────────────────────

#[test]
fn test_rewards_split_pro_rata_by_shares() {
    let f = setup(0, false);
    let alice = f.staker(1_000); // 2_000 shares
    let bob = Address::generate(&f.env);
    StellarAssetClient::new(&f.env, &f.deposit_token).mint(&bob, &1_000);
    f.vault.deposit(&bob, &1_000, &(MAX_LOCK / 2), &bob); // 1_500 shares

    f.vault.distribute_rewards(&f.distributor, &7_000);

    assert_eq!(f.vault.get_pending_rewards(&alice), 4_000);
    assert_eq!(f.vault.get_pending_rewards(&bob), 3_000);
}

#[test]
fn test_large_supply_carries_undistributed_remainder() {
    let f = setup(0, false);
    let alice = f.staker(1_000_000_000); // 2e9 shares

    // one token is half an accumulator unit at this supply
    f.vault.distribute_rewards(&f.distributor, &1);
    assert_eq!(f.vault.get_pending_rewards(&alice), 0);
    assert_eq!(f.vault.undistributed_rewards(), 1);

    f.vault.distribute_rewards(&f.distributor, &1);
    assert_eq!(f.vault.get_pending_rewards(&alice), 2);
    assert_eq!(f.vault.undistributed_rewards(), 0);

    assert_eq!(f.vault.claim_rewards(&alice, &alice), 2);
    assert_eq!(f.reward_balance(&f.vault.address), 0);
}

#[test]
fn test_remainder_is_accounted_across_holders() {
    let f = setup(0, false);
    let holders = [
        f.staker(1_000_000_000),
        f.staker(1_000_000_000),
        f.staker(1_000_000_000),
    ];

    // 7 tokens over 6e9 shares: one unit per share, one token carried
    f.vault.distribute_rewards(&f.distributor, &7);
    for holder in holders.iter() {
        assert_eq!(f.vault.get_pending_rewards(holder), 2);
    }
    assert_eq!(f.vault.undistributed_rewards(), 1);

    // the carried token plus 5 new ones divide evenly
    f.vault.distribute_rewards(&f.distributor, &5);
    for holder in holders.iter() {
        assert_eq!(f.vault.get_pending_rewards(holder), 4);
    }
    assert_eq!(f.vault.undistributed_rewards(), 0);
}

#[test]
fn test_late_depositor_does_not_share_earlier_rewards() {
    let f = setup(0, false);
    let alice = f.staker(1_000);
    f.vault.distribute_rewards(&f.distributor, &1_000);

    let bob = f.staker(1_000);
    assert_eq!(f.vault.get_pending_rewards(&bob), 0);

    f.vault.distribute_rewards(&f.distributor, &1_000);
    assert_eq!(f.vault.get_pending_rewards(&alice), 1_500);
    assert_eq!(f.vault.get_pending_rewards(&bob), 500);
}

#[test]
fn test_rewards_survive_withdrawal() {
    let f = setup(0, false);
    let alice = f.staker(1_000);
    let bob = f.staker(1_000);
    f.vault.distribute_rewards(&f.distributor, &2_000);

    f.env.ledger().set_timestamp(START + MAX_LOCK);
    f.vault.withdraw(&alice, &0, &alice);
    assert_eq!(f.vault.balance_of(&alice), 0);
    assert_eq!(f.vault.get_pending_rewards(&alice), 1_000);

    // later distributions go to the remaining holder only
    f.vault.distribute_rewards(&f.distributor, &2_000);
    assert_eq!(f.vault.get_pending_rewards(&alice), 1_000);
    assert_eq!(f.vault.get_pending_rewards(&bob), 3_000);
}

#[test]
fn test_kicked_slot_earns_at_base_rate() {
    let f = setup(0, false);
    let alice = f.staker(1_000);
    let bob = f.staker(1_000);

    f.env.ledger().set_timestamp(START + MAX_LOCK);
    f.vault.kick(&0, &alice);
    // alice 1_000 shares, bob 2_000
    f.vault.distribute_rewards(&f.distributor, &3_000);

    assert_eq!(f.vault.get_pending_rewards(&alice), 1_000);
    assert_eq!(f.vault.get_pending_rewards(&bob), 2_000);
}

// ── Claims ───────────────────────────────────────────────────────────────────

#[test]
fn test_claim_pays_receiver_and_resets() {
    let f = setup(0, false);
    let alice = f.staker(1_000);
    let wallet = Address::generate(&f.env);
    f.vault.distribute_rewards(&f.distributor, &2_500);

    assert_eq!(f.vault.claim_rewards(&alice, &wallet), 2_500);
    assert_eq!(f.reward_balance(&wallet), 2_500);
    assert_eq!(f.vault.get_pending_rewards(&alice), 0);

    assert_eq!(f.vault.claim_rewards(&alice, &wallet), 0);
    assert_eq!(f.reward_balance(&wallet), 2_500);
}

#[test]
fn test_claim_to_vault_address_fails() {
    let f = setup(0, false);
    let alice = f.staker(1_000);
    f.vault.distribute_rewards(&f.distributor, &100);

    match f.vault.try_claim_rewards(&alice, &f.vault.address) {
        Err(Ok(e)) => assert_eq!(e, ContractError::ZeroAddress),
        _ => unreachable!("Expected ZeroAddress error"),
    }
    assert_eq!(f.vault.get_pending_rewards(&alice), 100);
}
