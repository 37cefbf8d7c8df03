use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::types::{Account, Pool, PoolConfig};
use crate::ContractError;

// ── Storage key constants ───────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");
const DISTRIBUTOR: Symbol = symbol_short!("DISTRIB");
const CONFIG: Symbol = symbol_short!("CONFIG");
const POOL: Symbol = symbol_short!("POOL");
const PAUSED: Symbol = symbol_short!("PAUSED");

// Per-participant persistent storage uses tuple keys:  (prefix, address)
const ACCOUNT: Symbol = symbol_short!("ACCT");
const NONCE: Symbol = symbol_short!("NONCE");

const INSTANCE_TTL_THRESHOLD: u32 = 518_400; // ~30 days
const INSTANCE_TTL_EXTEND_TO: u32 = 1_036_800; // ~60 days
const ACCOUNT_TTL_THRESHOLD: u32 = 5_184_000; // ~300 days
const ACCOUNT_TTL_EXTEND_TO: u32 = 10_368_000; // ~600 days

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND_TO);
}

fn extend_account_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, ACCOUNT_TTL_THRESHOLD, ACCOUNT_TTL_EXTEND_TO);
}

// ── Lifecycle ───────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn mark_initialized(env: &Env) {
    env.storage().instance().set(&INITIALIZED, &true);
}

// ── Roles ───────────────────────────────────────────────────────────────────

pub fn get_owner(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&OWNER)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

pub fn get_pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

pub fn set_pending_owner(env: &Env, pending: &Address) {
    env.storage().instance().set(&PENDING_OWNER, pending);
}

pub fn clear_pending_owner(env: &Env) {
    env.storage().instance().remove(&PENDING_OWNER);
}

pub fn get_distributor(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&DISTRIBUTOR)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_distributor(env: &Env, distributor: &Address) {
    env.storage().instance().set(&DISTRIBUTOR, distributor);
}

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&PAUSED, &paused);
}

// ── Pool ────────────────────────────────────────────────────────────────────

pub fn get_config(env: &Env) -> Result<PoolConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&CONFIG, config);
}

pub fn get_pool(env: &Env) -> Result<Pool, ContractError> {
    env.storage()
        .instance()
        .get(&POOL)
        .ok_or(ContractError::NotInitialized)
}

/// Persist the pool aggregate and keep the instance alive.
pub fn set_pool(env: &Env, pool: &Pool) {
    env.storage().instance().set(&POOL, pool);
    extend_instance_ttl(env);
}

// ── Accounts ────────────────────────────────────────────────────────────────

/// Missing accounts read as all-zero; they are created by the first write.
pub fn get_account(env: &Env, participant: &Address) -> Account {
    env.storage()
        .persistent()
        .get(&(ACCOUNT, participant.clone()))
        .unwrap_or_else(|| Account::new(env))
}

pub fn set_account(env: &Env, participant: &Address, account: &Account) {
    let key = (ACCOUNT, participant.clone());
    env.storage().persistent().set(&key, account);
    extend_account_ttl(env, &key);
}

pub fn get_nonce(env: &Env, participant: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&(NONCE, participant.clone()))
        .unwrap_or(0)
}

pub fn set_nonce(env: &Env, participant: &Address, nonce: u64) {
    let key = (NONCE, participant.clone());
    env.storage().persistent().set(&key, &nonce);
    extend_account_ttl(env, &key);
}
