//! Identity gate for the SkillRep components.
//!
//! The cryptographic proof of identity happens elsewhere, in an external
//! verification hub. This crate only caches its verdict: once an address
//! is verified it stays verified, and every gated operation consults the
//! cached flag instead of asking the hub again.
//!
//! Each component (the profile ledger and the privacy endorser) owns its
//! own [`VerificationRegistry`]; being verified with one says nothing about
//! the other.

pub mod authority;
pub mod error;
pub mod hub;
pub mod registry;

pub use authority::VerifierAuthority;
pub use error::VerificationError;
pub use hub::VerificationHub;
pub use registry::VerificationRegistry;
