//! Escrow behaviour against a controllable token.
//!
//! `MockToken` implements just the token functions the gateway calls, plus
//! setters that write balances and allowances directly, a switch that makes
//! every transfer trap, and a hook that calls back into the escrow from
//! inside `transfer`.

#![allow(clippy::unwrap_used, clippy::expect_used)]
extern crate std;

use soroban_sdk::{
    contract, contractimpl, symbol_short, testutils::Address as _, vec, Address, Env, MuxedAddress,
    Symbol,
};

use crate::{ContractError, EscrowContract, EscrowContractClient};

// ── Mock token ────────────────────────────────────────────────────────────────

const BALANCE: Symbol = symbol_short!("BAL");
const ALLOWANCE: Symbol = symbol_short!("ALLOW");
const FAIL: Symbol = symbol_short!("FAIL");
const REENTRY: Symbol = symbol_short!("REENTRY");
const REENTRY_RESULT: Symbol = symbol_short!("RE_RES");

#[contract]
pub struct MockToken;

#[contractimpl]
impl MockToken {
    pub fn set_balance(env: Env, id: Address, amount: i128) {
        env.storage().persistent().set(&(BALANCE, id), &amount);
    }

    pub fn set_allowance(env: Env, from: Address, spender: Address, amount: i128) {
        env.storage()
            .persistent()
            .set(&(ALLOWANCE, from, spender), &amount);
    }

    pub fn set_fail_transfers(env: Env, fail: bool) {
        env.storage().instance().set(&FAIL, &fail);
    }

    /// On the next outbound `transfer`, try `escrow.withdraw(depositor, amount)`.
    pub fn set_reentry(env: Env, escrow: Address, depositor: Address, amount: i128) {
        env.storage()
            .instance()
            .set(&REENTRY, &(escrow, depositor, amount));
    }

    /// `None` until a re-entrant call was attempted, then whether it succeeded.
    pub fn reentry_result(env: Env) -> Option<bool> {
        env.storage().instance().get(&REENTRY_RESULT)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage().persistent().get(&(BALANCE, id)).unwrap_or(0)
    }

    pub fn transfer(env: Env, from: Address, to: MuxedAddress, amount: i128) {
        from.require_auth();
        Self::check_not_failing(&env);

        let hook: Option<(Address, Address, i128)> = env.storage().instance().get(&REENTRY);
        if let Some((escrow, depositor, again)) = hook {
            env.storage().instance().remove(&REENTRY);
            let attempt = EscrowContractClient::new(&env, &escrow).try_withdraw(&depositor, &again);
            env.storage()
                .instance()
                .set(&REENTRY_RESULT, &attempt.is_ok());
        }

        Self::move_balance(&env, &from, &to.address(), amount);
    }

    pub fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        Self::check_not_failing(&env);

        let key = (ALLOWANCE, from.clone(), spender);
        let allowance: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        if allowance < amount {
            panic!("insufficient allowance");
        }
        env.storage().persistent().set(&key, &(allowance - amount));

        Self::move_balance(&env, &from, &to, amount);
    }
}

impl MockToken {
    fn check_not_failing(env: &Env) {
        let fail: bool = env.storage().instance().get(&FAIL).unwrap_or(false);
        if fail {
            panic!("forced transfer failure");
        }
    }

    fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) {
        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            panic!("insufficient balance");
        }
        let to_balance = Self::balance(env.clone(), to.clone());
        Self::set_balance(env.clone(), from.clone(), from_balance - amount);
        Self::set_balance(env.clone(), to.clone(), to_balance + amount);
    }
}

// ── Test helpers ─────────────────────────────────────────────────────────────

const DEPOSIT: i128 = 1_000;

fn setup() -> (
    Env,
    EscrowContractClient<'static>,
    MockTokenClient<'static>,
    Address, // owner
) {
    let env = Env::default();
    env.mock_all_auths();

    let token_id = env.register(MockToken, ());
    let token = MockTokenClient::new(&env, &token_id);

    let contract_id = env.register(EscrowContract, ());
    let client = EscrowContractClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    client.initialize(&owner, &token_id);

    (env, client, token, owner)
}

/// A depositor whose `DEPOSIT` already sits in the escrow.
fn deposited_user(env: &Env, client: &EscrowContractClient, token: &MockTokenClient) -> Address {
    let user = Address::generate(env);
    token.set_balance(&user, &DEPOSIT);
    token.set_allowance(&user, &client.address, &DEPOSIT);
    client.deposit(&user, &DEPOSIT);
    user
}

// ── Forced failures ───────────────────────────────────────────────────────────

#[test]
fn test_deposit_against_mock_token() {
    let (env, client, token, _owner) = setup();
    let user = deposited_user(&env, &client, &token);

    assert_eq!(client.deposits_of(&user), DEPOSIT);
    assert_eq!(token.balance(&user), 0);
    assert_eq!(client.custodied_balance(), DEPOSIT);
}

#[test]
fn test_failed_pull_leaves_ledger_untouched() {
    let (env, client, token, _owner) = setup();
    let user = Address::generate(&env);
    token.set_balance(&user, &DEPOSIT);
    token.set_allowance(&user, &client.address, &DEPOSIT);
    token.set_fail_transfers(&true);

    assert!(client.try_deposit(&user, &DEPOSIT).is_err());
    assert_eq!(client.deposits_of(&user), 0);
    assert_eq!(client.total_deposits(), 0);
    assert_eq!(token.balance(&user), DEPOSIT);
}

#[test]
fn test_failed_push_rolls_back_withdraw_debit() {
    let (env, client, token, _owner) = setup();
    let user = deposited_user(&env, &client, &token);

    token.set_fail_transfers(&true);
    assert!(client.try_withdraw(&user, &DEPOSIT).is_err());

    assert_eq!(client.deposits_of(&user), DEPOSIT);
    assert_eq!(client.total_deposits(), DEPOSIT);
    assert_eq!(client.custodied_balance(), DEPOSIT);

    // Once the token recovers the same withdrawal goes through.
    token.set_fail_transfers(&false);
    client.withdraw(&user, &DEPOSIT);
    assert_eq!(client.deposits_of(&user), 0);
    assert_eq!(token.balance(&user), DEPOSIT);
}

#[test]
fn test_failed_push_rolls_back_drain() {
    let (env, client, token, owner) = setup();
    let alice = deposited_user(&env, &client, &token);
    let bob = deposited_user(&env, &client, &token);

    token.set_fail_transfers(&true);
    assert!(client
        .try_drain_to_owner(&owner, &vec![&env, alice.clone(), bob.clone()])
        .is_err());

    assert_eq!(client.deposits_of(&alice), DEPOSIT);
    assert_eq!(client.deposits_of(&bob), DEPOSIT);
    assert_eq!(token.balance(&owner), 0);
}

#[test]
fn test_failed_push_rolls_back_emergency_exit() {
    let (env, client, token, owner) = setup();
    deposited_user(&env, &client, &token);

    token.set_fail_transfers(&true);
    assert!(client.try_emergency_exit(&owner).is_err());
    assert_eq!(client.custodied_balance(), DEPOSIT);
}

#[test]
fn test_custody_set_directly_is_swept() {
    let (_env, client, token, owner) = setup();

    // Balance written straight into the token, no deposit recorded.
    token.set_balance(&client.address, &42);
    assert_eq!(client.total_deposits(), 0);

    assert_eq!(client.emergency_exit(&owner), 42);
    assert_eq!(token.balance(&owner), 42);
    assert_eq!(
        client.try_emergency_exit(&owner),
        Err(Ok(ContractError::NothingToDrain))
    );
}

// ── Re-entrancy ───────────────────────────────────────────────────────────────
//
// The host refuses a nested call into a contract already on the stack, so the
// inner `withdraw` never runs. These tests cover that refusal and the single
// payout of the outer call; they do not observe debit-before-push ordering.

#[test]
fn test_reentrant_withdraw_is_refused_and_pays_out_once() {
    let (env, client, token, _owner) = setup();
    let user = deposited_user(&env, &client, &token);

    // The token tries a second withdrawal of the same amount mid-transfer.
    token.set_reentry(&client.address, &user, &DEPOSIT);
    client.withdraw(&user, &DEPOSIT);

    assert_eq!(token.reentry_result(), Some(false));
    assert_eq!(client.deposits_of(&user), 0);
    assert_eq!(token.balance(&user), DEPOSIT);
    assert_eq!(client.custodied_balance(), 0);
    assert_eq!(client.total_deposits(), 0);
}

#[test]
fn test_reentrant_partial_withdraw_is_refused() {
    let (env, client, token, _owner) = setup();
    let user = deposited_user(&env, &client, &token);

    token.set_reentry(&client.address, &user, &(DEPOSIT / 2));
    client.withdraw(&user, &(DEPOSIT / 2));

    assert_eq!(token.reentry_result(), Some(false));
    assert_eq!(client.deposits_of(&user), DEPOSIT / 2);
    assert_eq!(token.balance(&user), DEPOSIT / 2);
    assert_eq!(client.custodied_balance(), DEPOSIT / 2);
}
