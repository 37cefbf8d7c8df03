use crate::ContractError;

const MIN_DURATION_SECONDS: u64 = 1;
const MAX_DURATION_SECONDS: u64 = 157_680_000; // 5 years

/// Stake, withdraw and recovery amounts must be strictly positive.
pub fn validate_amount(amount: i128) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

/// A funding may be zero (it then only reschedules the leftover) but never
/// negative.
pub fn validate_reward(reward: i128) -> Result<(), ContractError> {
    if reward < 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

/// Reward periods between one second and five years.
pub fn validate_duration(duration_seconds: u64) -> Result<(), ContractError> {
    if !(MIN_DURATION_SECONDS..=MAX_DURATION_SECONDS).contains(&duration_seconds) {
        return Err(ContractError::InvalidDuration);
    }
    Ok(())
}
