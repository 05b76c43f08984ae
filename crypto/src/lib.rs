//! Hashing primitives for the SkillRep ledger.
//!
//! - **Blake2b-256** for every digest in the workspace
//! - Skill identifiers derived from skill names
//! - Deterministic address derivation from seed bytes

pub mod address;
pub mod hash;

pub use address::derive_address;
pub use hash::{blake2b_256, blake2b_256_multi, skill_id};
