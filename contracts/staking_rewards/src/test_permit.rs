#![cfg(test)]

use soroban_sdk::{xdr::ToXdr, Address, BytesN, Env};

use crate::test_setup::*;
use crate::*;

const WEEK: u64 = 7 * DAY;

// Stand-in for a ledger-side signature scheme. An enrolled participant's key
// is `sha256(address)`; a "signature" is the message digest tagged with that
// key. Good enough to exercise the pool's permit handling end to end.
mod verifier {
    use soroban_sdk::{contract, contractimpl, token, xdr::ToXdr, Address, BytesN, Env};

    use crate::{PermitMessage, PermitSignature};

    #[contract]
    pub struct MockPermitVerifier;

    #[contractimpl]
    impl MockPermitVerifier {
        pub fn enroll(env: Env, signer: Address) -> BytesN<32> {
            let key = env.crypto().sha256(&signer.clone().to_xdr(&env)).to_bytes();
            env.storage().persistent().set(&key, &signer);
            key
        }

        pub fn verify(
            env: Env,
            message: PermitMessage,
            signature: PermitSignature,
        ) -> Option<Address> {
            let digest = env.crypto().sha256(&message.clone().to_xdr(&env)).to_bytes();
            if digest != signature.r {
                return None;
            }
            let signer: Address = env.storage().persistent().get(&signature.s)?;

            let expiration = env.ledger().sequence() + 100;
            token::Client::new(&env, &message.token).approve(
                &signer,
                &message.spender,
                &message.amount,
                &expiration,
            );
            Some(signer)
        }
    }
}

use verifier::{MockPermitVerifier, MockPermitVerifierClient};

struct PermitSetup<'a> {
    pool: Setup<'a>,
    verifier: MockPermitVerifierClient<'a>,
}

impl PermitSetup<'_> {
    fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths_allowing_non_root_auth();

        let verifier_id = env.register(MockPermitVerifier, ());
        let verifier = MockPermitVerifierClient::new(&env, &verifier_id);
        let pool = Setup::build(env, WEEK, false, Some(verifier_id));

        PermitSetup { pool, verifier }
    }

    fn message(&self, owner: &Address, amount: i128, deadline: u64) -> PermitMessage {
        PermitMessage {
            token: self.pool.stake_token.address.clone(),
            owner: owner.clone(),
            spender: self.pool.client.address.clone(),
            amount,
            nonce: self.pool.client.nonce(owner),
            deadline,
        }
    }

    fn sign(&self, key: &BytesN<32>, message: &PermitMessage) -> PermitSignature {
        let env = &self.pool.env;
        PermitSignature {
            v: 27,
            r: env.crypto().sha256(&message.clone().to_xdr(env)).to_bytes(),
            s: key.clone(),
        }
    }
}

#[test]
fn test_stake_with_permit() {
    let p = PermitSetup::new();
    let s = &p.pool;
    let alice = s.participant(10 * UNIT);
    let key = p.verifier.enroll(&alice);

    let deadline = START + 3_600;
    let signature = p.sign(&key, &p.message(&alice, 4 * UNIT, deadline));
    s.client
        .stake_with_permit(&alice, &(4 * UNIT), &deadline, &signature);

    assert_eq!(s.client.balance_of(&alice), 4 * UNIT);
    assert_eq!(s.client.total_staked(), 4 * UNIT);
    assert_eq!(s.stake_token.balance(&alice), 6 * UNIT);
    assert_eq!(s.client.nonce(&alice), 1);
}

#[test]
fn test_permit_stake_accrues_like_a_plain_stake() {
    let p = PermitSetup::new();
    let s = &p.pool;
    let alice = s.participant(UNIT);
    let key = p.verifier.enroll(&alice);

    let signature = p.sign(&key, &p.message(&alice, UNIT, START));
    s.client
        .stake_with_permit(&alice, &UNIT, &START, &signature);
    s.fund(7 * UNIT);

    s.at(START + WEEK);
    assert_eq!(
        s.client.earned(&alice),
        s.client.reward_rate() * i128::from(WEEK)
    );
}

#[test]
fn test_permit_past_deadline_fails() {
    let p = PermitSetup::new();
    let s = &p.pool;
    let alice = s.participant(UNIT);
    let key = p.verifier.enroll(&alice);

    let deadline = START + 60;
    let signature = p.sign(&key, &p.message(&alice, UNIT, deadline));

    s.at(deadline + 1);
    assert_eq!(
        s.client
            .try_stake_with_permit(&alice, &UNIT, &deadline, &signature),
        Err(Ok(ContractError::PermitExpired))
    );
    assert_eq!(s.client.nonce(&alice), 0);
}

#[test]
fn test_permit_signed_by_someone_else_fails() {
    let p = PermitSetup::new();
    let s = &p.pool;
    let alice = s.participant(UNIT);
    let mallory = s.participant(0);
    p.verifier.enroll(&alice);
    let mallory_key = p.verifier.enroll(&mallory);

    let deadline = START + 60;
    let forged = p.sign(&mallory_key, &p.message(&alice, UNIT, deadline));
    assert_eq!(
        s.client
            .try_stake_with_permit(&alice, &UNIT, &deadline, &forged),
        Err(Ok(ContractError::InvalidSignature))
    );
    assert_eq!(s.client.balance_of(&alice), 0);
}

#[test]
fn test_permit_for_different_amount_fails() {
    let p = PermitSetup::new();
    let s = &p.pool;
    let alice = s.participant(10 * UNIT);
    let key = p.verifier.enroll(&alice);

    let deadline = START + 60;
    let signature = p.sign(&key, &p.message(&alice, UNIT, deadline));
    assert_eq!(
        s.client
            .try_stake_with_permit(&alice, &(2 * UNIT), &deadline, &signature),
        Err(Ok(ContractError::InvalidSignature))
    );
}

#[test]
fn test_permit_cannot_be_replayed() {
    let p = PermitSetup::new();
    let s = &p.pool;
    let alice = s.participant(10 * UNIT);
    let key = p.verifier.enroll(&alice);

    let deadline = START + 60;
    let signature = p.sign(&key, &p.message(&alice, UNIT, deadline));
    s.client
        .stake_with_permit(&alice, &UNIT, &deadline, &signature);

    assert_eq!(
        s.client
            .try_stake_with_permit(&alice, &UNIT, &deadline, &signature),
        Err(Ok(ContractError::InvalidSignature))
    );
    assert_eq!(s.client.balance_of(&alice), UNIT);

    // A fresh signature over the next nonce is accepted.
    let next = p.sign(&key, &p.message(&alice, UNIT, deadline));
    s.client.stake_with_permit(&alice, &UNIT, &deadline, &next);
    assert_eq!(s.client.balance_of(&alice), 2 * UNIT);
    assert_eq!(s.client.nonce(&alice), 2);
}

#[test]
fn test_permit_blocked_while_paused() {
    let p = PermitSetup::new();
    let s = &p.pool;
    let alice = s.participant(UNIT);
    let key = p.verifier.enroll(&alice);
    s.client.set_paused(&s.owner, &true);

    let signature = p.sign(&key, &p.message(&alice, UNIT, START));
    assert_eq!(
        s.client
            .try_stake_with_permit(&alice, &UNIT, &START, &signature),
        Err(Ok(ContractError::Paused))
    );
}

#[test]
fn test_permit_without_verifier_is_unsupported() {
    let s = Setup::new(WEEK);
    let alice = s.participant(UNIT);
    let signature = PermitSignature {
        v: 27,
        r: BytesN::from_array(&s.env, &[1; 32]),
        s: BytesN::from_array(&s.env, &[2; 32]),
    };

    assert_eq!(
        s.client
            .try_stake_with_permit(&alice, &UNIT, &(START + 60), &signature),
        Err(Ok(ContractError::PermitUnsupported))
    );
    assert_eq!(s.client.nonce(&alice), 0);
}
