//! Token collaborator calls.
//!
//! Transfers go through the client's `try_` variant so a rejected transfer
//! surfaces as `InsufficientAllowanceOrBalance` instead of trapping, and the
//! failed sub-call leaves no trace in the token's state.

use soroban_sdk::{token, Address, Env};

use crate::errors::ContractError;

/// Move `amount` of `token` from `from` into the vault.
pub fn pull(env: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), ContractError> {
    match token::Client::new(env, token).try_transfer(
        from,
        &env.current_contract_address(),
        &amount,
    ) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::InsufficientAllowanceOrBalance),
    }
}

/// Move `amount` of `token` from the vault to `to`.
pub fn send(env: &Env, token: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    match token::Client::new(env, token).try_transfer(
        &env.current_contract_address(),
        to,
        &amount,
    ) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::InsufficientAllowanceOrBalance),
    }
}
