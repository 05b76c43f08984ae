//! The external verification hub seam.
//!
//! The protocol does not specify HOW identity is proven, only that a hub
//! attested it once. Different hubs can be plugged in.

use skillrep_types::Address;

/// An external identity-verification collaborator.
pub trait VerificationHub {
    /// The address the hub calls back from.
    fn address(&self) -> &Address;

    /// Whether the hub has a valid identity proof on file for `subject`.
    fn attest(&self, subject: &Address) -> bool;
}

impl<H: VerificationHub + ?Sized> VerificationHub for &H {
    fn address(&self) -> &Address {
        (**self).address()
    }

    fn attest(&self, subject: &Address) -> bool {
        (**self).attest(subject)
    }
}
