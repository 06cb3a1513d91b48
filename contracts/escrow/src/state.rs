//! Lifecycle state machine.
//!
//! The escrow is always in exactly one [`EscrowState`]. Only the owner moves
//! it between states; nothing transitions automatically.

use soroban_sdk::{contracttype, log, symbol_short, Env, Symbol};

use crate::ContractError;

const STATE: Symbol = symbol_short!("STATE");

/// Operating mode of the escrow.
///
/// | State     | deposit | depositor withdraw |
/// |-----------|---------|--------------------|
/// | Active    | yes     | yes                |
/// | Unstaking | no      | yes                |
/// | Locked    | no      | no                 |
///
/// Administrative drains ignore the state entirely.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum EscrowState {
    Active = 0,
    Unstaking = 1,
    Locked = 2,
}

impl EscrowState {
    pub fn admits_deposit(&self) -> bool {
        matches!(self, EscrowState::Active)
    }

    pub fn admits_withdraw(&self) -> bool {
        !matches!(self, EscrowState::Locked)
    }

    /// `Locked` and `Unstaking` are reachable from any state.
    pub fn lock(self) -> EscrowState {
        EscrowState::Locked
    }

    pub fn unstake(self) -> EscrowState {
        EscrowState::Unstaking
    }

    /// Re-activating an already active escrow is rejected.
    pub fn activate(self) -> Result<EscrowState, ContractError> {
        match self {
            EscrowState::Active => Err(ContractError::InvalidTransition),
            EscrowState::Unstaking | EscrowState::Locked => Ok(EscrowState::Active),
        }
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

/// An escrow that has never stored a state reads as `Active`.
pub fn load(env: &Env) -> EscrowState {
    env.storage()
        .instance()
        .get(&STATE)
        .unwrap_or(EscrowState::Active)
}

pub fn store(env: &Env, state: EscrowState) {
    env.storage().instance().set(&STATE, &state);
}

// ── Guards ───────────────────────────────────────────────────────────────────

pub fn require_active(env: &Env) -> Result<(), ContractError> {
    if !load(env).admits_deposit() {
        log!(env, "contract needs to be active");
        return Err(ContractError::InvalidState);
    }
    Ok(())
}

pub fn require_not_locked(env: &Env) -> Result<(), ContractError> {
    if !load(env).admits_withdraw() {
        log!(env, "contract is locked");
        return Err(ContractError::InvalidState);
    }
    Ok(())
}
