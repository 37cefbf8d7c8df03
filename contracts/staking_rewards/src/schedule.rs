use crate::math;
use crate::types::{Pool, PeriodState};
use crate::ContractError;

/// Classify the reward period at `now`.
pub fn period_state(pool: &Pool, now: u64) -> PeriodState {
    if pool.period_finish == 0 {
        PeriodState::Unfunded
    } else if now < pool.period_finish {
        PeriodState::Active
    } else {
        PeriodState::Expired
    }
}

/// Reward of the running period that has not been emitted yet.
pub fn leftover(pool: &Pool, now: u64) -> Result<i128, ContractError> {
    if now >= pool.period_finish {
        return Ok(0);
    }
    math::emitted(pool.reward_rate, pool.period_finish - now)
}

/// Start a new period of `duration` seconds carrying `reward` plus whatever
/// the running period had not emitted yet.
///
/// The pool must already be checkpointed at `now`. The new rate is floored,
/// so at most `reward + leftover` is ever promised; the remainder is picked up
/// as leftover by the next funding. `reward_reserved` swaps the old leftover
/// for the new period's full emission.
pub fn fund(pool: &mut Pool, reward: i128, duration: u64, now: u64) -> Result<(), ContractError> {
    if duration == 0 {
        return Err(ContractError::InvalidDuration);
    }

    let leftover = leftover(pool, now)?;
    let budget = math::checked_add(reward, leftover)?;

    pool.reward_rate = budget / i128::from(duration);
    pool.reward_reserved = math::checked_add(
        math::checked_sub(pool.reward_reserved, leftover)?,
        math::emitted(pool.reward_rate, duration)?,
    )?;
    pool.last_update_time = now;
    pool.period_start = now;
    pool.period_finish = now
        .checked_add(duration)
        .ok_or(ContractError::MathOverflow)?;

    Ok(())
}

/// Full emission of the current period at its rate.
pub fn reward_for_period(pool: &Pool) -> Result<i128, ContractError> {
    math::emitted(pool.reward_rate, pool.period_finish - pool.period_start)
}

/// Reward-token balance that may back a funded period.
///
/// When stake and reward share a token the staked principal sits in the same
/// balance and is excluded.
pub fn fundable_balance(
    reward_balance: i128,
    total_staked: i128,
    shares_asset: bool,
) -> Result<i128, ContractError> {
    if shares_asset {
        math::checked_sub(reward_balance, total_staked)
    } else {
        Ok(reward_balance)
    }
}

/// Reject a schedule that promises more than the pool holds.
///
/// Everything still owed counts against the balance, not just the new
/// period: rewards accrued to stakers but not yet claimed are not free.
pub fn require_solvent(pool: &Pool, fundable: i128) -> Result<(), ContractError> {
    if pool.reward_reserved > fundable {
        return Err(ContractError::InsufficientRewardBalance);
    }
    Ok(())
}

/// Change the length used by the next funding; only between periods.
pub fn set_rewards_duration(pool: &mut Pool, duration: u64, now: u64) -> Result<(), ContractError> {
    if now <= pool.period_finish {
        return Err(ContractError::PeriodNotFinished);
    }
    pool.rewards_duration = duration;
    Ok(())
}
