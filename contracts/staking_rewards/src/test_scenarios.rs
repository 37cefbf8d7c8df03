#![cfg(test)]

// End-to-end reward distributions over full periods.

use soroban_sdk::I256;

use crate::test_setup::*;
use crate::*;

const REWARDS_DURATION: u64 = 60 * DAY;

#[test]
fn test_single_staker_collects_whole_period() {
    let s = Setup::new(REWARDS_DURATION);
    let alice = s.participant(UNIT);
    s.client.stake(&alice, &UNIT);
    s.fund(100 * UNIT);

    let rate = s.client.reward_rate();
    assert_eq!(rate, 100 * UNIT / i128::from(REWARDS_DURATION));

    s.at(START + REWARDS_DURATION);
    let paid = s.client.exit(&alice);

    assert_eq!(paid, rate * i128::from(REWARDS_DURATION));
    assert_close(paid, 100 * UNIT, 1);
    assert_eq!(s.reward_token.balance(&alice), paid);
    assert_eq!(s.stake_token.balance(&alice), UNIT);
}

#[test]
fn test_late_staker_earns_only_from_entry() {
    let s = Setup::new(REWARDS_DURATION);
    s.fund(100 * UNIT);
    let rate = s.client.reward_rate();

    // Nobody is staked for the first half; that emission is never assigned.
    let half = START + REWARDS_DURATION / 2;
    s.at(half);
    assert_eq!(s.client.reward_per_token(), I256::from_i32(&s.env, 0));

    let alice = s.participant(2 * UNIT);
    s.client.stake(&alice, &(2 * UNIT));

    s.at(START + REWARDS_DURATION + DAY);
    let earned = s.client.earned(&alice);
    let emitted_after_entry = rate * i128::from(START + REWARDS_DURATION - half);
    assert!(earned <= emitted_after_entry);
    assert!(emitted_after_entry - earned <= 2);
    assert_close(earned, 50 * UNIT, 1);
}

#[test]
fn test_second_half_staker_gets_a_quarter() {
    let s = Setup::new(REWARDS_DURATION);
    let alice = s.participant(UNIT);
    let bob = s.participant(UNIT);

    s.client.stake(&alice, &UNIT);
    s.fund(100 * UNIT);
    let total = s.client.reward_for_duration();

    s.at(START + REWARDS_DURATION / 2);
    s.client.stake(&bob, &UNIT);

    s.at(START + REWARDS_DURATION);
    let alice_paid = s.client.exit(&alice);
    let bob_paid = s.client.exit(&bob);

    assert_close(alice_paid, total * 3 / 4, 1);
    assert_close(bob_paid, total / 4, 1);
    assert!(alice_paid + bob_paid <= total);
}

#[test]
fn test_mid_period_top_up_blends_rates() {
    let s = Setup::new(10 * DAY);
    let alice = s.participant(10 * UNIT);
    let bob = s.participant(40 * UNIT);
    let carol = s.participant(50 * UNIT);

    s.client.stake(&alice, &(10 * UNIT));
    s.client.stake(&bob, &(40 * UNIT));
    s.fund(500 * UNIT);
    let first_rate = s.client.reward_rate();

    // Day 5: carol joins and a 300 top-up spread over 20 days arrives.
    let day5 = START + 5 * DAY;
    s.at(day5);
    s.client.stake(&carol, &(50 * UNIT));
    s.fund_for(300 * UNIT, 20 * DAY);

    let remaining = first_rate * i128::from(5 * DAY);
    let blended = (300 * UNIT + remaining) / i128::from(20 * DAY);
    assert_eq!(s.client.reward_rate(), blended);
    assert_eq!(s.client.period_finish(), day5 + 20 * DAY);
    assert_eq!(s.client.rewards_duration(), 10 * DAY);

    // Halfway through the new period: 250 emitted before, 275 after.
    s.at(day5 + 10 * DAY);
    assert_close(s.client.earned(&alice), 50 * UNIT + 27_500_000_000_000_000_000, 1);
    assert_close(s.client.earned(&bob), 200 * UNIT + 110 * UNIT, 1);
    assert_close(s.client.earned(&carol), 137_500_000_000_000_000_000, 1);

    s.at(day5 + 20 * DAY);
    let a = s.client.get_reward(&alice);
    let b = s.client.get_reward(&bob);
    let c = s.client.get_reward(&carol);

    assert_close(a, 105 * UNIT, 1);
    assert_close(b, 420 * UNIT, 1);
    assert_close(c, 275 * UNIT, 1);
    assert!(a + b + c <= 800 * UNIT);
}

#[test]
fn test_dust_stake_against_large_reward_keeps_pool_usable() {
    let s = Setup::new(7 * DAY);
    let dust = s.participant(1);
    s.client.stake(&dust, &1);
    s.fund(1_000 * UNIT);
    let total = s.client.reward_for_duration();

    // One base unit collects the whole emission for two days: the per-unit
    // value is past anything i128 can hold.
    s.at(START + 2 * DAY);
    assert!(s.client.reward_per_token().to_i128().is_none());

    let bob = s.participant(UNIT);
    s.client.stake(&bob, &UNIT);

    s.at(START + 30 * DAY);
    let dust_paid = s.client.exit(&dust);
    let bob_paid = s.client.exit(&bob);

    assert_close(dust_paid, total * 2 / 7, 1);
    assert_close(bob_paid, total * 5 / 7, 1);
    assert!(dust_paid + bob_paid <= total);

    // Still accepting stake and funding afterwards.
    s.client.stake(&dust, &1);
    s.fund(1_000 * UNIT);
    assert_eq!(s.client.period_state(), PeriodState::Active);
}

#[test]
fn test_unstaked_stretch_is_released_for_the_next_funding() {
    let s = Setup::new(10 * DAY);
    s.fund(100 * UNIT);
    let rate = s.client.reward_rate();

    // Nobody staked for the first four days; that emission backs nothing.
    s.at(START + 4 * DAY);
    let alice = s.participant(UNIT);
    s.client.stake(&alice, &UNIT);
    assert_eq!(s.client.reward_reserved(), rate * i128::from(6 * DAY));

    s.at(START + 10 * DAY);
    let paid = s.client.exit(&alice);
    assert_eq!(paid, rate * i128::from(6 * DAY));
    assert_eq!(s.client.reward_reserved(), 0);

    // The idle 40 tokens can be rescheduled without a new transfer.
    s.client
        .notify_reward_amount(&s.distributor, &(40 * UNIT), &None);
    assert_eq!(s.client.reward_rate(), 40 * UNIT / i128::from(10 * DAY));
}

#[test]
fn test_refunding_after_expiry_carries_nothing_over() {
    let s = Setup::new(10 * DAY);
    let alice = s.participant(UNIT);
    s.client.stake(&alice, &UNIT);
    s.fund(100 * UNIT);

    s.at(START + 12 * DAY);
    s.fund(50 * UNIT);

    assert_eq!(s.client.reward_rate(), 50 * UNIT / i128::from(10 * DAY));
    assert_eq!(s.client.last_update_time(), START + 12 * DAY);

    // The gap between periods accrued nothing.
    assert_close(s.client.earned(&alice), 100 * UNIT, 1);
}

#[test]
fn test_single_asset_pool_does_not_count_principal_as_reward() {
    let s = Setup::single_asset(REWARDS_DURATION);
    let alice = s.participant(1_000 * UNIT);
    s.client.stake(&alice, &(1_000 * UNIT));

    // Pool holds 1_100 tokens, but only 100 of them are free for rewards.
    s.deposit_reward(100 * UNIT);
    assert_eq!(
        s.client
            .try_notify_reward_amount(&s.distributor, &(200 * UNIT), &None),
        Err(Ok(ContractError::InsufficientRewardBalance))
    );

    s.client
        .notify_reward_amount(&s.distributor, &(100 * UNIT), &None);

    s.at(START + REWARDS_DURATION);
    let paid = s.client.exit(&alice);
    assert_close(paid, 100 * UNIT, 1);
    assert_eq!(s.stake_token.balance(&alice), 1_000 * UNIT + paid);
}

#[test]
fn test_new_duration_used_by_next_funding() {
    let s = Setup::new(REWARDS_DURATION);
    s.fund(60 * UNIT);

    s.at(START + REWARDS_DURATION + 1);
    s.client.set_rewards_duration(&s.owner, &(30 * DAY));
    s.fund(30 * UNIT);

    assert_eq!(s.client.period_finish(), s.now() + 30 * DAY);
    assert_eq!(s.client.reward_rate(), 30 * UNIT / i128::from(30 * DAY));
}
