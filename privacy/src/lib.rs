//! Privacy endorser: the only party the ledger accepts private endorsements from.
//!
//! The endorser checks its caller against its own verification cache,
//! deduplicates by the true originator (which only it sees), then forwards
//! the endorsement to the ledger under its own address.

pub mod endorser;
pub mod error;

pub use endorser::{EndorserState, PrivacyEndorser, PrivacyEndorserConfig};
pub use error::PrivacyError;
