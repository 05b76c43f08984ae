//! Fundamental types for the SkillRep ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, skill and configuration identifiers, skill slots, super-endorsement
//! cells and ledger parameters.

pub mod address;
pub mod error;
pub mod hash;
pub mod params;
pub mod skill;
pub mod super_endorsement;

pub use address::Address;
pub use error::TypesError;
pub use hash::{ConfigId, ScopeId, SkillId};
pub use params::{LedgerParams, DEFAULT_EXPERT_THRESHOLD};
pub use skill::{SkillSlot, SKILL_SLOTS};
pub use super_endorsement::{matrix_index, SuperEndorsement, MATRIX_CELLS, MATRIX_SIZE};
