#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{StellarAssetClient, TokenClient},
    Address, Env, I256,
};
use staking_rewards::{StakingRewardsContract, StakingRewardsContractClient};

const PERIOD: u64 = 7 * 86_400;
const WALLET: i128 = 1_000_000_000_000_000_000_000_000_000_000;
const FUND_STEP: i128 = 1_000_000_000_000_000;

/// Stake amounts are raw base units scaled by `10^(scale % 8)`, so single
/// base units and whale-sized deposits both show up.
#[derive(Arbitrary, Debug)]
enum Op {
    Stake { who: u8, amount: u64, scale: u8 },
    Withdraw { who: u8, amount: u64, scale: u8 },
    Claim { who: u8 },
    Exit { who: u8 },
    Fund { amount: u32, duration: Option<u32> },
    Wait { seconds: u32 },
}

fn base_units(amount: u64, scale: u8) -> i128 {
    i128::from(amount) * 10i128.pow(u32::from(scale % 8))
}

fuzz_target!(|ops: Vec<Op>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);

    let token_admin = Address::generate(&env);
    let stake_sac = env.register_stellar_asset_contract_v2(token_admin.clone());
    let reward_sac = env.register_stellar_asset_contract_v2(token_admin);
    let stake_admin = StellarAssetClient::new(&env, &stake_sac.address());
    let reward_admin = StellarAssetClient::new(&env, &reward_sac.address());
    let reward_token = TokenClient::new(&env, &reward_sac.address());

    let contract_id = env.register(StakingRewardsContract, ());
    let client = StakingRewardsContractClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    let distributor = Address::generate(&env);
    client.initialize(
        &owner,
        &distributor,
        &stake_sac.address(),
        &reward_sac.address(),
        &PERIOD,
        &None,
    );

    let people: Vec<Address> = (0..3).map(|_| Address::generate(&env)).collect();
    for who in &people {
        stake_admin.mint(who, &WALLET);
    }

    let mut funded: i128 = 0;
    let mut paid: i128 = 0;
    let mut last_rpt = I256::from_i32(&env, 0);

    for op in ops.iter().take(64) {
        match *op {
            Op::Stake { who, amount, scale } => {
                let staker = &people[who as usize % people.len()];
                let _ = client.try_stake(staker, &base_units(amount, scale));
            }
            Op::Withdraw { who, amount, scale } => {
                let staker = &people[who as usize % people.len()];
                let _ = client.try_withdraw(staker, &base_units(amount, scale));
            }
            Op::Claim { who } => {
                let staker = &people[who as usize % people.len()];
                if let Ok(Ok(reward)) = client.try_get_reward(staker) {
                    paid += reward;
                }
            }
            Op::Exit { who } => {
                let staker = &people[who as usize % people.len()];
                if let Ok(Ok(reward)) = client.try_exit(staker) {
                    paid += reward;
                }
            }
            Op::Fund { amount, duration } => {
                let reward = i128::from(amount) * FUND_STEP;
                if reward > 0 {
                    reward_admin.mint(&contract_id, &reward);
                    funded += reward;
                }
                let duration = duration.map(u64::from);
                let _ = client.try_notify_reward_amount(&distributor, &reward, &duration);
            }
            Op::Wait { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now + u64::from(seconds));
            }
        }

        let rpt = client.reward_per_token();
        assert!(rpt >= last_rpt);
        last_rpt = rpt;

        let mut owed = 0;
        let mut staked = 0;
        for who in &people {
            owed += client.earned(who);
            staked += client.balance_of(who);
        }
        let reserved = client.reward_reserved();
        assert_eq!(client.total_staked(), staked);
        assert!(paid + owed <= funded);
        assert!(owed <= reserved);
        assert!(reserved <= funded - paid);
        assert_eq!(reward_token.balance(&contract_id), funded - paid);
    }
});
