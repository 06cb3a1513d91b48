//! Balance ledger: custodied amount per depositor.
//!
//! Entries live in persistent storage under `(DEPOSIT, depositor)` and read
//! as zero until the first credit. They are never removed, only driven to
//! zero. A running total of all entries is kept in instance storage so the
//! conservation invariant `total <= token.balance(escrow)` can be checked
//! without enumerating depositors.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::ContractError;

const DEPOSIT: Symbol = symbol_short!("DEPOSIT");
const TOTAL_DEPOSITS: Symbol = symbol_short!("TOT_DEP");

const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

fn entry_key(depositor: &Address) -> (Symbol, Address) {
    (DEPOSIT, depositor.clone())
}

fn store_entry(env: &Env, depositor: &Address, amount: i128) {
    let key = entry_key(depositor);
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn store_total(env: &Env, total: i128) {
    env.storage().instance().set(&TOTAL_DEPOSITS, &total);
}

pub fn balance_of(env: &Env, depositor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&entry_key(depositor))
        .unwrap_or(0)
}

pub fn total(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_DEPOSITS).unwrap_or(0)
}

/// Add `amount` to the depositor's entry. Returns the new entry.
pub fn credit(env: &Env, depositor: &Address, amount: i128) -> Result<i128, ContractError> {
    let balance = balance_of(env, depositor)
        .checked_add(amount)
        .ok_or(ContractError::InvalidInput)?;
    let total = total(env)
        .checked_add(amount)
        .ok_or(ContractError::InvalidInput)?;

    store_entry(env, depositor, balance);
    store_total(env, total);
    Ok(balance)
}

/// Subtract `amount` from the depositor's entry. Returns the new entry.
///
/// Fails with `InsufficientBalance` and leaves storage untouched when the
/// entry is smaller than `amount`.
pub fn debit(env: &Env, depositor: &Address, amount: i128) -> Result<i128, ContractError> {
    let current = balance_of(env, depositor);
    if amount > current {
        return Err(ContractError::InsufficientBalance);
    }
    let balance = current - amount;
    let total = total(env).saturating_sub(amount);

    store_entry(env, depositor, balance);
    store_total(env, total);
    Ok(balance)
}

/// Zero the depositor's entry and return what it held.
pub fn take_all(env: &Env, depositor: &Address) -> i128 {
    let current = balance_of(env, depositor);
    if current == 0 {
        return 0;
    }
    store_entry(env, depositor, 0);
    store_total(env, total(env).saturating_sub(current));
    current
}
