use soroban_sdk::{contractclient, contracttype, Address, BytesN, Env};

use crate::storage;
use crate::types::PoolConfig;
use crate::ContractError;

/// The approval a participant signs off-band to let the pool pull their stake.
///
/// `nonce` is the participant's current permit nonce, so a signature is good
/// for exactly one deposit.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermitMessage {
    pub token: Address,
    pub owner: Address,
    pub spender: Address,
    pub amount: i128,
    pub nonce: u64,
    pub deadline: u64,
}

/// Recoverable signature over a `PermitMessage`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PermitSignature {
    pub v: u32,
    pub r: BytesN<32>,
    pub s: BytesN<32>,
}

/// Signature recovery supplied by the ledger side.
///
/// On success the verifier returns the signer and leaves the pool an
/// allowance of `message.amount` on `message.token`; on failure it returns
/// `None`.
#[contractclient(name = "PermitVerifierClient")]
pub trait PermitVerifier {
    fn verify(env: Env, message: PermitMessage, signature: PermitSignature) -> Option<Address>;
}

/// Check and use up a deposit permit for `owner`.
///
/// Fails with `PermitExpired` past the deadline, `PermitUnsupported` when the
/// pool has no verifier, and `InvalidSignature` when the signature does not
/// recover to `owner` for the current nonce (which also covers replays).
pub fn consume(
    env: &Env,
    config: &PoolConfig,
    owner: &Address,
    amount: i128,
    deadline: u64,
    signature: &PermitSignature,
) -> Result<(), ContractError> {
    if env.ledger().timestamp() > deadline {
        return Err(ContractError::PermitExpired);
    }

    let verifier = config
        .permit_verifier
        .clone()
        .ok_or(ContractError::PermitUnsupported)?;

    let nonce = storage::get_nonce(env, owner);
    let message = PermitMessage {
        token: config.stake_token.clone(),
        owner: owner.clone(),
        spender: env.current_contract_address(),
        amount,
        nonce,
        deadline,
    };

    let signer = match PermitVerifierClient::new(env, &verifier).try_verify(&message, signature) {
        Ok(Ok(Some(signer))) => signer,
        _ => return Err(ContractError::InvalidSignature),
    };
    if signer != *owner {
        return Err(ContractError::InvalidSignature);
    }

    let next = nonce.checked_add(1).ok_or(ContractError::MathOverflow)?;
    storage::set_nonce(env, owner, next);

    Ok(())
}
