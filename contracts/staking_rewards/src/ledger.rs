use soroban_sdk::{token, Address, Env};

use crate::ContractError;

// Thin adapter over the SEP-41 token interface. Every movement goes through a
// `try_*` call so a rejected transfer surfaces as `TransferFailed` and the
// whole invocation is rolled back.

/// Pull `amount` from `from` into the pool on the holder's own authorization.
pub fn transfer_in(
    env: &Env,
    token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let client = token::Client::new(env, token);
    match client.try_transfer(from, &env.current_contract_address(), &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Pull `amount` from `owner` against an allowance granted to the pool.
pub fn transfer_in_allowed(
    env: &Env,
    token: &Address,
    owner: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let pool = env.current_contract_address();
    let client = token::Client::new(env, token);
    match client.try_transfer_from(&pool, owner, &pool, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Send `amount` from the pool to `to`.
pub fn transfer_out(
    env: &Env,
    token: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    let client = token::Client::new(env, token);
    match client.try_transfer(&env.current_contract_address(), to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// The pool's own balance of `token`.
pub fn balance(env: &Env, token: &Address) -> i128 {
    token::Client::new(env, token).balance(&env.current_contract_address())
}
