use soroban_sdk::{contracttype, Address, Env, I256};

/// Global accounting state of the pool.
///
/// Loaded from instance storage at the start of every call, mutated in memory
/// by the accrual / schedule / stake-book helpers, then written back once.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    /// Sum of every participant's staked balance.
    pub total_staked: i128,
    /// Reward units emitted per second across all stakers.
    pub reward_rate: i128,
    /// Cumulative reward per staked unit, scaled by `PRECISION`.
    ///
    /// 256 bits wide: a dust-sized total stake against a large emission
    /// pushes the per-unit value far past `i128`.
    pub reward_per_token_stored: I256,
    /// Timestamp up to which `reward_per_token_stored` has been settled.
    pub last_update_time: u64,
    /// Start of the current reward period (0 until the first funding).
    pub period_start: u64,
    /// End of the current reward period (0 until the first funding).
    pub period_finish: u64,
    /// Length applied to the next funding when none is given explicitly.
    pub rewards_duration: u64,
    /// Reward tokens promised and not yet paid out: settled rewards, accrued
    /// rewards and the unemitted rest of the running period.
    pub reward_reserved: i128,
}

impl Pool {
    /// An unfunded pool: rate, accumulator and period all at zero.
    pub fn new(env: &Env, rewards_duration: u64) -> Self {
        Pool {
            total_staked: 0,
            reward_rate: 0,
            reward_per_token_stored: I256::from_i32(env, 0),
            last_update_time: 0,
            period_start: 0,
            period_finish: 0,
            rewards_duration,
            reward_reserved: 0,
        }
    }
}

/// Per-participant position.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Account {
    /// Staked balance.
    pub balance: i128,
    /// Settled but not yet claimed rewards.
    pub rewards: i128,
    /// Value of `reward_per_token_stored` at the participant's last checkpoint.
    pub reward_per_token_paid: I256,
}

impl Account {
    pub fn new(env: &Env) -> Self {
        Account {
            balance: 0,
            rewards: 0,
            reward_per_token_paid: I256::from_i32(env, 0),
        }
    }
}

/// Deploy-time configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    pub stake_token: Address,
    pub reward_token: Address,
    /// External contract able to recover the signer of a deposit permit.
    pub permit_verifier: Option<Address>,
}

impl PoolConfig {
    /// Stake and reward balances share one ledger entry when the tokens match.
    pub fn shares_asset(&self) -> bool {
        self.stake_token == self.reward_token
    }
}

/// Where the reward schedule currently stands.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PeriodState {
    /// Never funded.
    Unfunded,
    /// Rewards are streaming until `period_finish`.
    Active,
    /// `period_finish` has passed; the accumulator is frozen until refunded.
    Expired,
}
