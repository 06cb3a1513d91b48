#![no_std]

//! # Escrow Contract
//!
//! Custodial bookkeeping for a single token. Depositors move tokens in with
//! an allowance and take them back out while the escrow admits it; the owner
//! can lock the escrow, drain depositor entries to itself, or sweep the whole
//! custodied balance in an emergency.
//!
//! ## Invariants
//!
//! - `sum(deposits_of(*)) == total_deposits() <= custodied_balance()` after
//!   every call except `emergency_exit`, which leaves entries unbacked.
//! - Ledger entries never go negative.
//! - On every outbound path the ledger entry is written *before* the token
//!   transfer. Re-entry during the transfer is refused by the host.

pub mod events;
pub mod gateway;
pub mod ledger;
pub mod state;

use common::ownership::{self, AccessError, AccessPolicy, SingleOwner};
use soroban_sdk::{contract, contractimpl, log, symbol_short, Address, Env, Symbol, Vec};

use gateway::TokenGateway;
pub use state::EscrowState;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");

/// Strategy guarding every owner-only entry point.
type OwnerPolicy = SingleOwner;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    InsufficientBalance = 5,
    InvalidState = 6,
    InvalidTransition = 7,
    NoBalance = 8,
    NothingToDrain = 9,
}

impl ContractError {
    /// Human-readable reason, for wallets and scripts surfacing a failed call.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "contract is not initialized",
            ContractError::AlreadyInitialized => "contract is already initialized",
            ContractError::Unauthorized => "caller is not the owner",
            ContractError::InvalidInput => {
                "should specify at least one user with a non-negative amount for each"
            }
            ContractError::InsufficientBalance => "insufficient balance",
            ContractError::InvalidState => "contract needs to be active or is locked",
            ContractError::InvalidTransition => "already active",
            ContractError::NoBalance => "no valid balance found for user",
            ContractError::NothingToDrain => "should have something to drain",
        }
    }
}

impl From<AccessError> for ContractError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::NotInitialized => ContractError::NotInitialized,
            AccessError::Unauthorized => ContractError::Unauthorized,
            AccessError::NoPendingTransfer => ContractError::InvalidInput,
        }
    }
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct EscrowContract;

#[contractimpl]
impl EscrowContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the escrow.
    ///
    /// * `owner` – the deploying account; signs this call and becomes the
    ///   only identity allowed to run administrative operations.
    /// * `token` – address of the token contract whose balances are held.
    pub fn initialize(env: Env, owner: Address, token: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        owner.require_auth();

        ownership::set_owner(&env, &owner);
        gateway::set_token(&env, &token);
        state::store(&env, EscrowState::Active);
        env.storage().instance().set(&INITIALIZED, &true);

        events::publish_initialized(&env, owner, token);

        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        ownership::get_owner(&env).ok_or(ContractError::NotInitialized)
    }

    pub fn token(env: Env) -> Result<Address, ContractError> {
        gateway::get_token(&env)
    }

    // ── Lifecycle ───────────────────────────────────────────────────────────

    pub fn state(env: Env) -> EscrowState {
        state::load(&env)
    }

    /// Block deposits and depositor withdrawals. Re-locking is allowed.
    pub fn lock(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;

        state::store(&env, state::load(&env).lock());
        events::publish_locked(&env, caller);

        Ok(())
    }

    /// Block deposits but keep depositor withdrawals open.
    pub fn unstake(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;

        state::store(&env, state::load(&env).unstake());
        events::publish_unstaking(&env, caller);

        Ok(())
    }

    /// Return to `Active`. Fails with `InvalidTransition` if already active.
    pub fn activate(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;

        let next = state::load(&env).activate()?;
        state::store(&env, next);
        events::publish_activated(&env, caller);

        Ok(())
    }

    // ── Depositor operations ────────────────────────────────────────────────

    /// Move `amount` tokens from `depositor` into custody.
    ///
    /// `depositor` must first `approve` the escrow for at least `amount` on the
    /// token. Allowance and balance failures come straight from the token and
    /// leave the ledger untouched.
    pub fn deposit(env: Env, depositor: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        depositor.require_auth();
        state::require_active(&env)?;

        if amount < 0 {
            log!(&env, "negative amount", depositor);
            return Err(ContractError::InvalidInput);
        }

        // 1. Pull tokens in; a failure here traps before any ledger write.
        TokenGateway::load(&env)?.pull(&depositor, amount);

        // 2. Credit the depositor.
        let new_balance = ledger::credit(&env, &depositor, amount)?;

        events::publish_deposited(&env, depositor, amount, new_balance);

        Ok(())
    }

    /// Return `amount` of the depositor's own entry to them.
    ///
    /// Admitted while `Active` or `Unstaking`.
    pub fn withdraw(env: Env, depositor: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        depositor.require_auth();
        state::require_not_locked(&env)?;

        if amount < 0 {
            log!(&env, "negative amount", depositor);
            return Err(ContractError::InvalidInput);
        }
        if ledger::balance_of(&env, &depositor) == 0 {
            return Err(ContractError::NoBalance);
        }

        // Debit before transfer (checks-effects-interactions).
        let new_balance = ledger::debit(&env, &depositor, amount)?;

        TokenGateway::load(&env)?.push(&depositor, amount);

        events::publish_withdrawn(&env, depositor, amount, new_balance);

        Ok(())
    }

    // ── View functions ──────────────────────────────────────────────────────

    /// Return the depositor's ledger entry (zero if never credited).
    pub fn deposits_of(env: Env, depositor: Address) -> i128 {
        ledger::balance_of(&env, &depositor)
    }

    /// Return the sum of all ledger entries.
    pub fn total_deposits(env: Env) -> i128 {
        ledger::total(&env)
    }

    /// Return the escrow's balance on the custodied token.
    pub fn custodied_balance(env: Env) -> Result<i128, ContractError> {
        Ok(TokenGateway::load(&env)?.custodied())
    }

    // ── Administrative operations ───────────────────────────────────────────

    /// Move every listed depositor's full entry to the owner.
    ///
    /// Zero entries (including repeats later in the list) are skipped. Works
    /// in any lifecycle state. Returns the total moved.
    pub fn drain_to_owner(
        env: Env,
        caller: Address,
        depositors: Vec<Address>,
    ) -> Result<i128, ContractError> {
        Self::require_owner(&env, &caller)?;

        let gateway = TokenGateway::load(&env)?;
        let mut drained: i128 = 0;

        for depositor in depositors.iter() {
            let amount = ledger::take_all(&env, &depositor);
            if amount == 0 {
                continue;
            }
            gateway.push(&caller, amount);
            drained = drained
                .checked_add(amount)
                .ok_or(ContractError::InvalidInput)?;

            events::publish_drained(&env, depositor, amount, caller.clone());
        }

        Ok(drained)
    }

    /// Move `amounts[i]` from `depositors[i]`'s entry to the owner, for each i.
    ///
    /// Any pair asking for more than the entry holds aborts the whole batch
    /// with `InsufficientBalance`. Works in any lifecycle state. Returns the
    /// total moved.
    pub fn withdraw_to_owner(
        env: Env,
        caller: Address,
        depositors: Vec<Address>,
        amounts: Vec<i128>,
    ) -> Result<i128, ContractError> {
        Self::require_owner(&env, &caller)?;

        if depositors.is_empty() {
            log!(&env, "should specify at least one user");
            return Err(ContractError::InvalidInput);
        }
        if depositors.len() != amounts.len() {
            log!(&env, "should have amount for each user");
            return Err(ContractError::InvalidInput);
        }

        let gateway = TokenGateway::load(&env)?;
        let mut moved: i128 = 0;

        for (depositor, amount) in depositors.iter().zip(amounts.iter()) {
            if amount < 0 {
                log!(&env, "negative amount", depositor);
                return Err(ContractError::InvalidInput);
            }
            ledger::debit(&env, &depositor, amount)?;
            gateway.push(&caller, amount);
            moved = moved
                .checked_add(amount)
                .ok_or(ContractError::InvalidInput)?;

            events::publish_drained(&env, depositor, amount, caller.clone());
        }

        Ok(moved)
    }

    /// Send the entire custodied balance to the owner in one transfer.
    ///
    /// Ledger entries are left as they are: after this call they
    /// are no longer backed by custodied tokens.
    pub fn emergency_exit(env: Env, caller: Address) -> Result<i128, ContractError> {
        Self::require_owner(&env, &caller)?;

        let gateway = TokenGateway::load(&env)?;
        let amount = gateway.custodied();
        if amount <= 0 {
            return Err(ContractError::NothingToDrain);
        }

        gateway.push(&caller, amount);

        log!(&env, "emergency exit swept custody", amount, ledger::total(&env));
        events::publish_emergency_exit(&env, caller, amount);

        Ok(amount)
    }

    // ── Ownership transfer (two-step) ───────────────────────────────────────

    /// Propose a new owner. The proposed address must call `accept_owner`.
    pub fn propose_owner(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;

        ownership::propose_owner(&env, &new_owner);
        events::publish_owner_transfer_proposed(&env, caller, new_owner);

        Ok(())
    }

    /// Complete a pending transfer. Only the proposed address may call this.
    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_owner.require_auth();

        let old_owner = ownership::accept_owner(&env, &new_owner)?;
        events::publish_owner_transfer_accepted(&env, old_owner, new_owner);

        Ok(())
    }

    pub fn cancel_owner_transfer(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_owner(&env, &caller)?;

        let cancelled = ownership::cancel_transfer(&env)?;
        events::publish_owner_transfer_cancelled(&env, caller, cancelled);

        Ok(())
    }

    pub fn pending_owner(env: Env) -> Option<Address> {
        ownership::get_pending_owner(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: `caller` signed the call and passes the owner policy.
    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        OwnerPolicy::authorize(env, caller)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_gateway;
