//! Shared building blocks for the lock-vault contract suite.
//!
//! This crate provides:
//! - [`roles`]: the flat role registry that gates privileged vault calls.

#![cfg_attr(not(feature = "std"), no_std)]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod roles;

pub use roles::*;
