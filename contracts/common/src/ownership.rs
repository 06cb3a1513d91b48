//! # Single-owner access control
//!
//! Stores one privileged owner per contract instance and exposes the
//! `onlyOwner` guard through the [`AccessPolicy`] trait. Contracts pick a
//! policy at a single type alias, so a role-based or multi-owner strategy can
//! replace [`SingleOwner`] without touching the guarded entry points.
//!
//! Ownership moves in two steps: the current owner proposes a successor and
//! the successor accepts. The owner slot is never cleared.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Storage keys ─────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");

// ── Errors ───────────────────────────────────────────────────────────────────

/// Failures raised by an [`AccessPolicy`].
///
/// Contracts convert these into their own `#[contracterror]` enum with `From`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AccessError {
    /// No owner has been stored yet.
    NotInitialized,
    /// The caller is not permitted to run the guarded operation.
    Unauthorized,
    /// An ownership transfer step was requested with nothing pending.
    NoPendingTransfer,
}

// ── Policy seam ──────────────────────────────────────────────────────────────

/// Authorization strategy consulted at the top of every privileged operation.
///
/// Implementations only decide *whether* `caller` may proceed. The caller's
/// signature must already have been checked with `require_auth()`.
pub trait AccessPolicy {
    fn authorize(env: &Env, caller: &Address) -> Result<(), AccessError>;
}

/// The caller must be exactly the stored owner.
pub struct SingleOwner;

impl AccessPolicy for SingleOwner {
    fn authorize(env: &Env, caller: &Address) -> Result<(), AccessError> {
        let owner = get_owner(env).ok_or(AccessError::NotInitialized)?;
        if *caller != owner {
            return Err(AccessError::Unauthorized);
        }
        Ok(())
    }
}

// ── Owner slot ───────────────────────────────────────────────────────────────

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

// ── Two-step transfer ────────────────────────────────────────────────────────

/// Record `new_owner` as the pending successor. Replaces any earlier proposal.
///
/// Callers must run their policy guard first.
pub fn propose_owner(env: &Env, new_owner: &Address) {
    env.storage().instance().set(&PENDING_OWNER, new_owner);
}

pub fn get_pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

/// Promote the pending successor if `new_owner` matches it.
///
/// Returns the previous owner on success.
pub fn accept_owner(env: &Env, new_owner: &Address) -> Result<Address, AccessError> {
    let pending = get_pending_owner(env).ok_or(AccessError::NoPendingTransfer)?;
    if *new_owner != pending {
        return Err(AccessError::Unauthorized);
    }
    let previous = get_owner(env).ok_or(AccessError::NotInitialized)?;

    set_owner(env, new_owner);
    env.storage().instance().remove(&PENDING_OWNER);
    Ok(previous)
}

/// Drop the pending proposal and return the address that was proposed.
pub fn cancel_transfer(env: &Env) -> Result<Address, AccessError> {
    let pending = get_pending_owner(env).ok_or(AccessError::NoPendingTransfer)?;
    env.storage().instance().remove(&PENDING_OWNER);
    Ok(pending)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
