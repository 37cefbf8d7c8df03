use soroban_sdk::{Env, I256};

use crate::math;
use crate::types::{Account, Pool};
use crate::ContractError;

// ── Core reward engine ──────────────────────────────────────────────────────

/// The latest instant rewards have been streaming for: rewards stop at
/// `period_finish`.
pub fn last_time_reward_applicable(pool: &Pool, now: u64) -> u64 {
    core::cmp::min(now, pool.period_finish)
}

fn unsettled_seconds(pool: &Pool, now: u64) -> u64 {
    last_time_reward_applicable(pool, now).saturating_sub(pool.last_update_time)
}

/// Current value of the reward-per-token accumulator.
///
/// ```text
/// Δrpt    = (applicable − last_update) × reward_rate × PRECISION / total_staked
/// new_rpt = stored_rpt + Δrpt
/// ```
///
/// When nothing is staked the stored value is returned unchanged. Emission
/// during such an interval is never distributed to anyone.
pub fn reward_per_token(env: &Env, pool: &Pool, now: u64) -> Result<I256, ContractError> {
    if pool.total_staked <= 0 {
        return Ok(pool.reward_per_token_stored.clone());
    }

    let emitted = math::emitted(pool.reward_rate, unsettled_seconds(pool, now))?;
    let delta = math::per_token(env, emitted, pool.total_staked)?;

    Ok(pool.reward_per_token_stored.add(&delta))
}

/// Rewards owed to `account` when the accumulator stands at `current_rpt`.
///
/// ```text
/// earned = balance × (current_rpt − rpt_paid) / PRECISION + rewards
/// ```
pub fn earned(env: &Env, account: &Account, current_rpt: &I256) -> Result<i128, ContractError> {
    let rpt_delta = current_rpt.sub(&account.reward_per_token_paid);
    let fresh = math::share_of(env, account.balance, &rpt_delta)?;

    math::checked_add(account.rewards, fresh)
}

/// Settle accrual up to `now` before the pool or `account` is mutated.
///
/// The accumulator and `last_update_time` are advanced on `pool`; when an
/// account is supplied its accrued rewards are sealed at its current balance
/// and its paid checkpoint moves to the new accumulator value.
///
/// Emission over an interval with nothing staked belongs to no one, so it is
/// released from `reward_reserved` and may back a later funding.
pub fn checkpoint(
    env: &Env,
    pool: &mut Pool,
    account: Option<&mut Account>,
    now: u64,
) -> Result<(), ContractError> {
    if pool.total_staked <= 0 {
        let unclaimable = math::emitted(pool.reward_rate, unsettled_seconds(pool, now))?;
        pool.reward_reserved = math::checked_sub(pool.reward_reserved, unclaimable)?;
    }

    pool.reward_per_token_stored = reward_per_token(env, pool, now)?;
    pool.last_update_time = last_time_reward_applicable(pool, now);

    if let Some(account) = account {
        account.rewards = earned(env, account, &pool.reward_per_token_stored)?;
        account.reward_per_token_paid = pool.reward_per_token_stored.clone();
    }

    Ok(())
}

// ── Unit tests ──────────────────────────────────────────────────────────────
