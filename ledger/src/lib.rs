//! Profile ledger: the system of record for verified participants.
//!
//! Each verified address owns a profile URI, four named skill slots and a
//! 4×4 grid of super endorsements. Endorsements are counted per
//! `(endorser, target, skill)` triple with two independent dedup sets (regular
//! and expert); a third, private channel is reserved for the configured
//! privacy endorser, which does its own deduplication.
//!
//! Every operation validates fully before it mutates, so a rejected call
//! leaves no trace.

pub mod config;
pub mod endorsement;
pub mod error;
pub mod event;
pub mod grid;
pub mod ledger;
pub mod profile;
pub mod shared;
pub mod snapshot;

pub use config::LedgerConfig;
pub use endorsement::{EndorsementBook, EndorsementKey};
pub use error::LedgerError;
pub use event::{EndorsementChannel, LedgerEvent};
pub use grid::SuperEndorsementGrid;
pub use ledger::{LedgerSummary, ProfileLedger};
pub use profile::Profile;
pub use shared::{PrivateEndorsementSink, SharedLedger};
pub use snapshot::LedgerSnapshot;
