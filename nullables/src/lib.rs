//! Nullable infrastructure for deterministic testing.
//!
//! External collaborators are abstracted behind traits. This crate provides
//! test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod hub;

pub use hub::NullHub;
