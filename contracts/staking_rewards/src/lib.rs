#![no_std]

#[cfg(test)]
extern crate std;

pub mod events;
pub mod ledger;
pub mod math;
pub mod permit;
pub mod rewards;
pub mod schedule;
pub mod stake_book;
pub mod storage;
pub mod types;
pub mod validation;

use soroban_sdk::{contract, contractimpl, log, Address, Env, I256};

pub use permit::{PermitMessage, PermitSignature};
pub use types::{Account, PeriodState, Pool, PoolConfig};

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    InvalidAmount = 5,
    InsufficientBalance = 6,
    InvalidDuration = 7,
    PermitExpired = 8,
    InvalidSignature = 9,
    PermitUnsupported = 10,
    InsufficientRewardBalance = 11,
    PeriodNotFinished = 12,
    Paused = 13,
    TransferFailed = 14,
    ProtectedToken = 15,
    MathOverflow = 16,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingRewardsContract;

#[contractimpl]
impl StakingRewardsContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `distributor`      – the only address allowed to fund reward periods.
    /// * `stake_token`      – SAC address of the token participants stake.
    /// * `reward_token`     – SAC address of the token paid out as rewards;
    ///   may equal `stake_token`.
    /// * `rewards_duration` – default length, in seconds, of a funded period.
    /// * `permit_verifier`  – contract recovering deposit-permit signers; permit
    ///   deposits are unavailable without one.
    pub fn initialize(
        env: Env,
        owner: Address,
        distributor: Address,
        stake_token: Address,
        reward_token: Address,
        rewards_duration: u64,
        permit_verifier: Option<Address>,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        validation::validate_duration(rewards_duration)?;

        storage::set_owner(&env, &owner);
        storage::set_distributor(&env, &distributor);
        storage::set_config(
            &env,
            &PoolConfig {
                stake_token: stake_token.clone(),
                reward_token: reward_token.clone(),
                permit_verifier,
            },
        );
        storage::set_pool(&env, &Pool::new(&env, rewards_duration));
        storage::mark_initialized(&env);

        log!(&env, "initialize", owner, distributor, rewards_duration);
        events::publish_initialized(
            &env,
            owner,
            distributor,
            stake_token,
            reward_token,
            rewards_duration,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens on the staker's own authorization.
    pub fn stake(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        validation::validate_amount(amount)?;
        Self::require_not_paused(&env)?;

        log!(&env, "stake", staker, amount);
        Self::deposit(&env, &staker, amount, false)
    }

    /// Deposit `amount` stake tokens authorized by an off-band signed permit
    /// instead of the staker's own authorization. Anyone may relay it.
    pub fn stake_with_permit(
        env: Env,
        staker: Address,
        amount: i128,
        deadline: u64,
        signature: PermitSignature,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        validation::validate_amount(amount)?;
        Self::require_not_paused(&env)?;

        let config = storage::get_config(&env)?;
        permit::consume(&env, &config, &staker, amount, deadline, &signature)?;

        log!(&env, "stake_with_permit", staker, amount, deadline);
        Self::deposit(&env, &staker, amount, true)
    }

    /// Withdraw `amount` of the staker's balance.
    pub fn withdraw(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();
        validation::validate_amount(amount)?;

        log!(&env, "withdraw", staker, amount);
        Self::release(&env, &staker, amount)
    }

    /// Pay out everything the staker has accrued. Returns the amount paid,
    /// `0` when nothing was owed.
    pub fn get_reward(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        log!(&env, "get_reward", staker);
        Self::harvest(&env, &staker)
    }

    /// Withdraw the whole balance, then claim. Returns the reward paid.
    pub fn exit(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let balance = storage::get_account(&env, &staker).balance;
        validation::validate_amount(balance)?;

        log!(&env, "exit", staker, balance);
        Self::release(&env, &staker, balance)?;
        Self::harvest(&env, &staker)
    }

    // ── Reward schedule ─────────────────────────────────────────────────────

    /// Start a reward period carrying `reward` plus the unspent remainder of
    /// the running one.
    ///
    /// The reward must already have been transferred to the pool. The period
    /// lasts `duration` seconds, or `rewards_duration` when `None`.
    pub fn notify_reward_amount(
        env: Env,
        distributor: Address,
        reward: i128,
        duration: Option<u64>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        distributor.require_auth();
        Self::require_distributor(&env, &distributor)?;
        validation::validate_reward(reward)?;

        let now = env.ledger().timestamp();
        let config = storage::get_config(&env)?;
        let mut pool = storage::get_pool(&env)?;
        let duration = duration.unwrap_or(pool.rewards_duration);
        validation::validate_duration(duration)?;

        // 1. Settle the running period at the old rate.
        rewards::checkpoint(&env, &mut pool, None, now)?;

        // 2. Blend leftover and new reward into a fresh period from now.
        schedule::fund(&mut pool, reward, duration, now)?;

        // 3. Never promise more than the pool holds, counting what is
        //    already owed to stakers.
        let fundable = schedule::fundable_balance(
            ledger::balance(&env, &config.reward_token),
            pool.total_staked,
            config.shares_asset(),
        )?;
        schedule::require_solvent(&pool, fundable)?;

        storage::set_pool(&env, &pool);

        log!(&env, "notify_reward_amount", reward, pool.reward_rate, pool.period_finish);
        events::publish_reward_added(&env, reward, pool.reward_rate, pool.period_finish);

        Ok(())
    }

    /// Change the default period length. Only once the current period ended.
    pub fn set_rewards_duration(
        env: Env,
        owner: Address,
        duration: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        Self::require_owner(&env, &owner)?;
        validation::validate_duration(duration)?;

        let mut pool = storage::get_pool(&env)?;
        schedule::set_rewards_duration(&mut pool, duration, env.ledger().timestamp())?;
        storage::set_pool(&env, &pool);

        log!(&env, "set_rewards_duration", duration);
        events::publish_rewards_duration_updated(&env, duration);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn total_staked(env: Env) -> i128 {
        Self::pool_or_default(&env).total_staked
    }

    pub fn balance_of(env: Env, participant: Address) -> i128 {
        storage::get_account(&env, &participant).balance
    }

    /// Live accumulator value, without mutating state.
    pub fn reward_per_token(env: Env) -> Result<I256, ContractError> {
        let pool = storage::get_pool(&env)?;
        rewards::reward_per_token(&env, &pool, env.ledger().timestamp())
    }

    /// Rewards claimable by `participant` right now, without mutating state.
    pub fn earned(env: Env, participant: Address) -> Result<i128, ContractError> {
        let pool = storage::get_pool(&env)?;
        let rpt = rewards::reward_per_token(&env, &pool, env.ledger().timestamp())?;
        rewards::earned(&env, &storage::get_account(&env, &participant), &rpt)
    }

    pub fn reward_rate(env: Env) -> i128 {
        Self::pool_or_default(&env).reward_rate
    }

    pub fn period_finish(env: Env) -> u64 {
        Self::pool_or_default(&env).period_finish
    }

    pub fn last_update_time(env: Env) -> u64 {
        Self::pool_or_default(&env).last_update_time
    }

    pub fn rewards_duration(env: Env) -> u64 {
        Self::pool_or_default(&env).rewards_duration
    }

    pub fn reward_per_token_stored(env: Env) -> I256 {
        Self::pool_or_default(&env).reward_per_token_stored
    }

    pub fn user_reward_per_token_paid(env: Env, participant: Address) -> I256 {
        storage::get_account(&env, &participant).reward_per_token_paid
    }

    /// Settled, unclaimed rewards as of the participant's last checkpoint.
    pub fn rewards(env: Env, participant: Address) -> i128 {
        storage::get_account(&env, &participant).rewards
    }

    pub fn last_time_reward_applicable(env: Env) -> u64 {
        rewards::last_time_reward_applicable(&Self::pool_or_default(&env), env.ledger().timestamp())
    }

    /// Total emission of the current period at its rate.
    pub fn reward_for_duration(env: Env) -> Result<i128, ContractError> {
        schedule::reward_for_period(&storage::get_pool(&env)?)
    }

    /// Reward tokens owed or still to be emitted. Only the balance above this
    /// can back a new funding.
    pub fn reward_reserved(env: Env) -> i128 {
        Self::pool_or_default(&env).reward_reserved
    }

    pub fn period_state(env: Env) -> PeriodState {
        schedule::period_state(&Self::pool_or_default(&env), env.ledger().timestamp())
    }

    pub fn get_account(env: Env, participant: Address) -> Account {
        storage::get_account(&env, &participant)
    }

    /// Nonce the participant's next deposit permit must be signed over.
    pub fn nonce(env: Env, participant: Address) -> u64 {
        storage::get_nonce(&env, &participant)
    }

    pub fn get_config(env: Env) -> Result<PoolConfig, ContractError> {
        storage::get_config(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        storage::get_owner(&env)
    }

    pub fn pending_owner(env: Env) -> Option<Address> {
        storage::get_pending_owner(&env)
    }

    pub fn distributor(env: Env) -> Result<Address, ContractError> {
        storage::get_distributor(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    // ── Ownership transfer (two-step) ──────────────────────────────────────

    /// Propose a new owner. The proposed address must call `accept_owner`.
    pub fn propose_owner(
        env: Env,
        current_owner: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_owner.require_auth();
        Self::require_owner(&env, &current_owner)?;

        storage::set_pending_owner(&env, &new_owner);

        events::publish_owner_transfer_proposed(&env, current_owner, new_owner);

        Ok(())
    }

    /// Accept a pending ownership transfer.
    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_owner.require_auth();

        let pending = storage::get_pending_owner(&env).ok_or(ContractError::InvalidInput)?;
        if new_owner != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_owner = storage::get_owner(&env)?;
        storage::set_owner(&env, &new_owner);
        storage::clear_pending_owner(&env);

        events::publish_owner_transfer_accepted(&env, old_owner, new_owner);

        Ok(())
    }

    /// Withdraw a pending ownership proposal.
    pub fn cancel_owner_transfer(env: Env, current_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_owner.require_auth();
        Self::require_owner(&env, &current_owner)?;

        let pending = storage::get_pending_owner(&env).ok_or(ContractError::InvalidInput)?;
        storage::clear_pending_owner(&env);

        events::publish_owner_transfer_cancelled(&env, current_owner, pending);

        Ok(())
    }

    // ── Owner functions ──────────────────────────────────────────────────────

    /// Hand the funding role to another address.
    pub fn set_rewards_distributor(
        env: Env,
        owner: Address,
        distributor: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        Self::require_owner(&env, &owner)?;

        storage::set_distributor(&env, &distributor);

        log!(&env, "set_rewards_distributor", distributor);
        events::publish_distributor_set(&env, distributor);

        Ok(())
    }

    /// Stop or resume new deposits. Withdrawals and claims stay open.
    pub fn set_paused(env: Env, owner: Address, paused: bool) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        Self::require_owner(&env, &owner)?;

        storage::set_paused(&env, paused);

        log!(&env, "set_paused", paused);
        events::publish_paused(&env, paused);

        Ok(())
    }

    /// Return tokens sent to the pool by mistake. The stake and reward tokens
    /// back participant balances and cannot be recovered.
    pub fn recover_token(
        env: Env,
        owner: Address,
        token: Address,
        amount: i128,
        to: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        owner.require_auth();
        Self::require_owner(&env, &owner)?;
        validation::validate_amount(amount)?;

        let config = storage::get_config(&env)?;
        if token == config.stake_token || token == config.reward_token {
            return Err(ContractError::ProtectedToken);
        }

        ledger::transfer_out(&env, &token, &to, amount)?;

        log!(&env, "recover_token", token, amount, to);
        events::publish_recovered(&env, token, amount, to);

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !storage::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if *caller != storage::get_owner(env)? {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn require_distributor(env: &Env, caller: &Address) -> Result<(), ContractError> {
        if *caller != storage::get_distributor(env)? {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn require_not_paused(env: &Env) -> Result<(), ContractError> {
        if storage::is_paused(env) {
            return Err(ContractError::Paused);
        }
        Ok(())
    }

    fn pool_or_default(env: &Env) -> Pool {
        storage::get_pool(env).unwrap_or_else(|_| Pool::new(env, 0))
    }

    /// Checkpoint, pull the stake in, then credit it.
    ///
    /// `permitted` pulls against the allowance left by a consumed permit
    /// rather than on the staker's own authorization.
    fn deposit(
        env: &Env,
        staker: &Address,
        amount: i128,
        permitted: bool,
    ) -> Result<(), ContractError> {
        let now = env.ledger().timestamp();
        let config = storage::get_config(env)?;
        let mut pool = storage::get_pool(env)?;
        let mut account = storage::get_account(env, staker);

        rewards::checkpoint(env, &mut pool, Some(&mut account), now)?;

        if permitted {
            ledger::transfer_in_allowed(env, &config.stake_token, staker, amount)?;
        } else {
            ledger::transfer_in(env, &config.stake_token, staker, amount)?;
        }

        stake_book::credit(&mut pool, &mut account, amount)?;
        storage::set_pool(env, &pool);
        storage::set_account(env, staker, &account);

        events::publish_staked(env, staker.clone(), amount, pool.total_staked);

        Ok(())
    }

    /// Checkpoint, debit the stake, then send it back.
    fn release(env: &Env, staker: &Address, amount: i128) -> Result<(), ContractError> {
        let now = env.ledger().timestamp();
        let config = storage::get_config(env)?;
        let mut pool = storage::get_pool(env)?;
        let mut account = storage::get_account(env, staker);

        rewards::checkpoint(env, &mut pool, Some(&mut account), now)?;
        stake_book::debit(&mut pool, &mut account, amount)?;
        storage::set_pool(env, &pool);
        storage::set_account(env, staker, &account);

        ledger::transfer_out(env, &config.stake_token, staker, amount)?;

        events::publish_withdrawn(env, staker.clone(), amount, pool.total_staked);

        Ok(())
    }

    /// Checkpoint, then pay out and zero the settled rewards.
    fn harvest(env: &Env, staker: &Address) -> Result<i128, ContractError> {
        let now = env.ledger().timestamp();
        let config = storage::get_config(env)?;
        let mut pool = storage::get_pool(env)?;
        let mut account = storage::get_account(env, staker);

        rewards::checkpoint(env, &mut pool, Some(&mut account), now)?;
        let reward = stake_book::take_rewards(&mut pool, &mut account)?;
        storage::set_pool(env, &pool);
        storage::set_account(env, staker, &account);

        if reward > 0 {
            ledger::transfer_out(env, &config.reward_token, staker, reward)?;
            events::publish_reward_paid(env, staker.clone(), reward);
        }

        Ok(reward)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_permit;


#[cfg(test)]
mod test_scenarios;
