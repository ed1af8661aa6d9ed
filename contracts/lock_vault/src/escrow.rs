//! Reward intake, escrow forwarding and claims.
//!
//! A distribution is split by `escrow_portion`. The escrowed part is locked
//! straight into the escrow pool (another vault whose deposit token is this
//! vault's reward token) on behalf of the distributor. The remainder accrues
//! to share holders here and is paid out by `claim`.

use soroban_sdk::{
    auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation},
    vec, Address, Env, IntoVal, Symbol,
};

use crate::curve::SCALE;
use crate::errors::ContractError;
use crate::ledger::{require_positive, require_receiver};
use crate::storage::{self, VaultConfig};
use crate::{events, rewards, transfer, LockVaultClient};

/// Split `amount` into `(escrowed, remainder)`; the escrowed part floors.
pub fn split(amount: i128, portion: i128) -> Result<(i128, i128), ContractError> {
    let escrowed = amount
        .checked_mul(portion)
        .map(|v| v / SCALE)
        .ok_or(ContractError::MathOverflow)?;
    Ok((escrowed, amount - escrowed))
}

pub fn distribute(env: &Env, distributor: &Address, amount: i128) -> Result<i128, ContractError> {
    require_positive(amount)?;
    let config = storage::config(env)?;

    let (escrowed, remainder) = match config.escrow_pool {
        Some(_) => split(amount, config.escrow_portion)?,
        None => (0, amount),
    };
    let accumulator = if remainder > 0 {
        Some(rewards::accrue(
            storage::reward_per_share(env),
            storage::reward_dust(env),
            remainder,
            storage::total_shares(env),
        )?)
    } else {
        None
    };

    transfer::pull(env, &config.reward_token, distributor, amount)?;

    if let (Some(pool), true) = (&config.escrow_pool, escrowed > 0) {
        forward(env, &config, pool, distributor, escrowed)?;
    }
    if let Some((value, dust)) = accumulator {
        storage::set_reward_per_share(env, value);
        storage::set_reward_dust(env, dust);
    }

    events::publish_rewards_distributed(env, distributor.clone(), amount, escrowed);

    Ok(escrowed)
}

/// Lock `amount` of reward tokens into `pool` for `escrow_duration`,
/// owned by `receiver`.
fn forward(
    env: &Env,
    config: &VaultConfig,
    pool: &Address,
    receiver: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let vault = env.current_contract_address();

    // The pool pulls from the vault one call deeper than the vault's own
    // invocation, so the token transfer needs explicit pre-authorization.
    env.authorize_as_current_contract(vec![
        env,
        InvokerContractAuthEntry::Contract(SubContractInvocation {
            context: ContractContext {
                contract: config.reward_token.clone(),
                fn_name: Symbol::new(env, "transfer"),
                args: (vault.clone(), pool.clone(), amount).into_val(env),
            },
            sub_invocations: vec![env],
        }),
    ]);

    match LockVaultClient::new(env, pool).try_deposit(
        &vault,
        &amount,
        &config.escrow_duration,
        receiver,
    ) {
        Ok(Ok(_)) => Ok(()),
        _ => Err(ContractError::EscrowForwardFailed),
    }
}

/// Pay `account`'s accrued rewards to `receiver`.
pub fn claim(env: &Env, account: &Address, receiver: &Address) -> Result<i128, ContractError> {
    require_receiver(env, receiver)?;
    let config = storage::config(env)?;

    let owed = rewards::pending(env, account)?;
    if owed > 0 {
        transfer::send(env, &config.reward_token, receiver, owed)?;
    }
    rewards::take(env, account)?;

    events::publish_rewards_claimed(env, account.clone(), receiver.clone(), owed);

    Ok(owed)
}
