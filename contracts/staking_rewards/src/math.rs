use soroban_sdk::{Env, I256};

use crate::ContractError;

/// Fixed-point scaling factor.
///
/// Reward-per-token values carry 18 decimals, matching the precision of the
/// amounts they are multiplied against.
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

/// Accumulator growth when `emitted` reward is spread over `total_staked`.
///
/// ```text
/// floor(emitted × PRECISION / total_staked)
/// ```
///
/// Kept in 256 bits: one base unit staked against a whole funding gives a
/// per-unit value of `emitted × 1e18`, which does not fit in `i128`.
pub fn per_token(env: &Env, emitted: i128, total_staked: i128) -> Result<I256, ContractError> {
    if emitted < 0 || total_staked <= 0 {
        return Err(ContractError::MathOverflow);
    }

    Ok(I256::from_i128(env, emitted)
        .mul(&I256::from_i128(env, PRECISION))
        .div(&I256::from_i128(env, total_staked)))
}

/// Share of an accumulator delta owed to `balance` staked units.
///
/// ```text
/// floor(balance × rpt_delta / PRECISION)
/// ```
///
/// A balance never exceeds the total it was part of while the delta grew, so
/// the result is bounded by the emission and always fits back into `i128`.
pub fn share_of(env: &Env, balance: i128, rpt_delta: &I256) -> Result<i128, ContractError> {
    if balance < 0 || *rpt_delta < I256::from_i32(env, 0) {
        return Err(ContractError::MathOverflow);
    }
    if balance == 0 {
        return Ok(0);
    }

    I256::from_i128(env, balance)
        .mul(rpt_delta)
        .div(&I256::from_i128(env, PRECISION))
        .to_i128()
        .ok_or(ContractError::MathOverflow)
}

/// Reward emitted at `rate` over `seconds`.
pub fn emitted(rate: i128, seconds: u64) -> Result<i128, ContractError> {
    i128::from(seconds)
        .checked_mul(rate)
        .ok_or(ContractError::MathOverflow)
}

pub fn checked_add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::MathOverflow)
}

pub fn checked_sub(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::MathOverflow)
}
