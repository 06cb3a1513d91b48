#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the escrow is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub token: Address,
    pub timestamp: u64,
}

/// Fired by `lock`, `unstake` and `activate`. The topic names the new state.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StateChangedEvent {
    pub owner: Address,
    pub timestamp: u64,
}

/// Fired when a depositor moves tokens into custody.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub depositor: Address,
    pub amount: i128,
    pub new_balance: i128,
    pub timestamp: u64,
}

/// Fired when a depositor takes tokens back out of custody.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub depositor: Address,
    pub amount: i128,
    pub new_balance: i128,
    pub timestamp: u64,
}

/// Fired for every depositor whose entry the owner drains.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DrainedEvent {
    pub depositor: Address,
    pub amount: i128,
    pub owner: Address,
    pub timestamp: u64,
}

/// Fired when the owner sweeps the whole custodied balance.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyExitEvent {
    pub owner: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferProposedEvent {
    pub current_owner: Address,
    pub proposed_owner: Address,
    pub timestamp: u64,
}

/// Fired when an ownership transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferAcceptedEvent {
    pub old_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

/// Fired when a pending ownership transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerTransferCancelledEvent {
    pub owner: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, token: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            token,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_locked(env: &Env, owner: Address) {
    env.events().publish(
        (symbol_short!("LOCKED"),),
        StateChangedEvent {
            owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaking(env: &Env, owner: Address) {
    env.events().publish(
        (symbol_short!("UNSTAKING"),),
        StateChangedEvent {
            owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_activated(env: &Env, owner: Address) {
    env.events().publish(
        (symbol_short!("ACTIVATED"),),
        StateChangedEvent {
            owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposited(env: &Env, depositor: Address, amount: i128, new_balance: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), depositor.clone()),
        DepositedEvent {
            depositor,
            amount,
            new_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, depositor: Address, amount: i128, new_balance: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), depositor.clone()),
        WithdrawnEvent {
            depositor,
            amount,
            new_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_drained(env: &Env, depositor: Address, amount: i128, owner: Address) {
    env.events().publish(
        (symbol_short!("DRAINED"), depositor.clone()),
        DrainedEvent {
            depositor,
            amount,
            owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_exit(env: &Env, owner: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("EMERGENCY"),),
        EmergencyExitEvent {
            owner,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"), current_owner.clone()),
        OwnerTransferProposedEvent {
            current_owner,
            proposed_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_accepted(env: &Env, old_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"), new_owner.clone()),
        OwnerTransferAcceptedEvent {
            old_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("OWN_CNCL"), owner.clone()),
        OwnerTransferCancelledEvent {
            owner,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
