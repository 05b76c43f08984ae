//! Shared utilities for the SkillRep workspace.

pub mod logging;

pub use logging::{init_logging, LogFormat};
