use soroban_sdk::{contracttype, symbol_short, Address, Env};

// ── Payloads ────────────────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub distributor: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub rewards_duration: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub amount: i128,
    pub total_staked: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub staker: Address,
    pub amount: i128,
    pub total_staked: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub staker: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardAddedEvent {
    pub reward: i128,
    pub reward_rate: i128,
    pub period_finish: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsDurationUpdatedEvent {
    pub duration: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferEvent {
    pub current_owner: Address,
    pub new_owner: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributorSetEvent {
    pub distributor: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PausedEvent {
    pub paused: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecoveredEvent {
    pub token: Address,
    pub amount: i128,
    pub to: Address,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    distributor: Address,
    stake_token: Address,
    reward_token: Address,
    rewards_duration: u64,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            distributor,
            stake_token,
            reward_token,
            rewards_duration,
        },
    );
}

pub fn publish_staked(env: &Env, staker: Address, amount: i128, total_staked: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            amount,
            total_staked,
        },
    );
}

pub fn publish_withdrawn(env: &Env, staker: Address, amount: i128, total_staked: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), staker.clone()),
        WithdrawnEvent {
            staker,
            amount,
            total_staked,
        },
    );
}

pub fn publish_reward_paid(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_PAID"), staker.clone()),
        RewardPaidEvent { staker, amount },
    );
}

pub fn publish_reward_added(env: &Env, reward: i128, reward_rate: i128, period_finish: u64) {
    env.events().publish(
        (symbol_short!("RWD_ADDED"),),
        RewardAddedEvent {
            reward,
            reward_rate,
            period_finish,
        },
    );
}

pub fn publish_rewards_duration_updated(env: &Env, duration: u64) {
    env.events().publish(
        (symbol_short!("DURATION"),),
        RewardsDurationUpdatedEvent { duration },
    );
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"),),
        OwnerTransferEvent {
            current_owner,
            new_owner,
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, current_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACC"),),
        OwnerTransferEvent {
            current_owner,
            new_owner,
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, current_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"),),
        OwnerTransferEvent {
            current_owner,
            new_owner,
        },
    );
}

pub fn publish_distributor_set(env: &Env, distributor: Address) {
    env.events()
        .publish((symbol_short!("DIST_SET"),), DistributorSetEvent { distributor });
}

pub fn publish_paused(env: &Env, paused: bool) {
    env.events()
        .publish((symbol_short!("PAUSED"),), PausedEvent { paused });
}

pub fn publish_recovered(env: &Env, token: Address, amount: i128, to: Address) {
    env.events().publish(
        (symbol_short!("RECOVERED"),),
        RecoveredEvent { token, amount, to },
    );
}
