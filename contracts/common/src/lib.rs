//! Shared building blocks for the escrow contract suite.
//!
//! This crate provides:
//! - [`ownership`]: single-owner storage, two-step ownership transfer, and
//!   the [`AccessPolicy`] seam used to guard privileged entry points.

#![cfg_attr(not(feature = "std"), no_std)]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod ownership;

pub use ownership::{AccessError, AccessPolicy, SingleOwner};
