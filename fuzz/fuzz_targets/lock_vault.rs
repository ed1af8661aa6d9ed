#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use lock_vault::{BatchCall, LockVault, LockVaultClient, Role, VaultConfig, SCALE};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Env,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { amount: i64, duration: u32 },
    Withdraw { id: u8 },
    ExtendLock { id: u8, added: u32 },
    IncreaseLock { id: u8, amount: i64 },
    Kick { id: u8 },
    Distribute { amount: i64 },
    Claim,
    BatchDeposits { amounts: Vec<i64>, strict: bool },
    Wait { seconds: u32 },
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let admin = Address::generate(&env);
    let token = env
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    let reward = env
        .register_stellar_asset_contract_v2(admin.clone())
        .address();

    let contract_id = env.register(LockVault, ());
    let client = LockVaultClient::new(&env, &contract_id);
    client.initialize(
        &admin,
        &VaultConfig {
            deposit_token: token.clone(),
            reward_token: reward.clone(),
            escrow_pool: None,
            escrow_portion: 0,
            escrow_duration: 0,
            max_bonus: 4 * SCALE,
            max_lock_duration: 1_000_000,
            end_date: u64::from(u32::MAX),
        },
        &vec![&env, SCALE, 2 * SCALE, 4 * SCALE],
    );
    client.grant_role(&admin, &Role::Distributor, &admin);
    StellarAssetClient::new(&env, &reward).mint(&admin, &i128::from(i64::MAX));

    let mut users = std::vec::Vec::new();
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &token).mint(&user, &i128::from(i64::MAX));
        users.push(user);
    }

    // Only unhandled panics count as findings; contract errors are expected.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Deposit { amount, duration } => {
                let _ = client.try_deposit(caller, &i128::from(amount), &u64::from(duration), caller);
            }
            FuzzAction::Withdraw { id } => {
                let _ = client.try_withdraw(caller, &u32::from(id), caller);
            }
            FuzzAction::ExtendLock { id, added } => {
                let _ = client.try_extend_lock(caller, &u32::from(id), &u64::from(added));
            }
            FuzzAction::IncreaseLock { id, amount } => {
                let _ = client.try_increase_lock(caller, &u32::from(id), caller, &i128::from(amount));
            }
            FuzzAction::Kick { id } => {
                let _ = client.try_kick(&u32::from(id), caller);
            }
            FuzzAction::Distribute { amount } => {
                let _ = client.try_distribute_rewards(&admin, &i128::from(amount));
            }
            FuzzAction::Claim => {
                let _ = client.try_claim_rewards(caller, caller);
            }
            FuzzAction::BatchDeposits { amounts, strict } => {
                let mut calls = soroban_sdk::Vec::new(&env);
                for amount in amounts.into_iter().take(8) {
                    calls.push_back(BatchCall::Deposit(i128::from(amount), 0, caller.clone()));
                }
                let _ = client.try_batch(caller, &calls, &strict);
            }
            FuzzAction::Wait { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(u64::from(seconds)));
            }
        }

        let supply = client.total_supply();
        let sum: i128 = users.iter().map(|u| client.balance_of(u)).sum();
        assert_eq!(supply, sum, "share supply diverged from balances");
    }
});
