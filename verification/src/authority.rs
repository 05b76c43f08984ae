//! Who may record a verification.

use crate::error::VerificationError;
use crate::hub::VerificationHub;
use crate::registry::VerificationRegistry;
use serde::{Deserialize, Serialize};
use skillrep_types::Address;

/// The two parties allowed to flip an address to verified: the component
/// administrator, and the hub through its callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifierAuthority {
    pub admin: Address,
    pub hub: Address,
}

impl VerifierAuthority {
    pub fn new(admin: Address, hub: Address) -> Self {
        Self { admin, hub }
    }

    pub fn may_verify(&self, caller: &Address) -> bool {
        *caller == self.admin || *caller == self.hub
    }

    /// Record `subject` as verified on behalf of `caller`.
    ///
    /// Returns `true` if the registry changed.
    pub fn verify(
        &self,
        registry: &mut VerificationRegistry,
        caller: &Address,
        subject: Address,
    ) -> Result<bool, VerificationError> {
        if !self.may_verify(caller) {
            return Err(VerificationError::NotAuthorized(*caller));
        }
        let fresh = registry.verify(subject);
        if fresh {
            tracing::info!(subject = %subject, by = %caller, "address verified");
        }
        Ok(fresh)
    }

    /// Ask `hub` once about `subject` and cache a positive answer.
    ///
    /// The hub must be the one this authority was configured with.
    pub fn verify_with_hub<H: VerificationHub>(
        &self,
        registry: &mut VerificationRegistry,
        hub: &H,
        subject: Address,
    ) -> Result<bool, VerificationError> {
        if *hub.address() != self.hub {
            return Err(VerificationError::NotAuthorized(*hub.address()));
        }
        if registry.is_verified(&subject) {
            return Ok(false);
        }
        if !hub.attest(&subject) {
            return Err(VerificationError::AttestationRejected(subject));
        }
        self.verify(registry, hub.address(), subject)
    }
}
