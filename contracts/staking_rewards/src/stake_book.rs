use crate::math;
use crate::types::{Account, Pool};
use crate::ContractError;

/// Add `amount` to a participant's stake and to the pool total.
pub fn credit(pool: &mut Pool, account: &mut Account, amount: i128) -> Result<(), ContractError> {
    pool.total_staked = math::checked_add(pool.total_staked, amount)?;
    account.balance = math::checked_add(account.balance, amount)?;
    Ok(())
}

/// Remove `amount` from a participant's stake and from the pool total.
pub fn debit(pool: &mut Pool, account: &mut Account, amount: i128) -> Result<(), ContractError> {
    if amount > account.balance {
        return Err(ContractError::InsufficientBalance);
    }
    account.balance = math::checked_sub(account.balance, amount)?;
    pool.total_staked = math::checked_sub(pool.total_staked, amount)?;
    Ok(())
}

/// Hand out the settled rewards, leaving the account at zero and releasing
/// them from the pool's reserve.
pub fn take_rewards(pool: &mut Pool, account: &mut Account) -> Result<i128, ContractError> {
    let reward = core::mem::take(&mut account.rewards);
    pool.reward_reserved = math::checked_sub(pool.reward_reserved, reward)?;
    Ok(reward)
}
