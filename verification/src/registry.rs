//! Cache of verified addresses.

use crate::error::VerificationError;
use serde::{Deserialize, Serialize};
use skillrep_types::Address;
use std::collections::HashSet;

/// The set of addresses a component has seen verified.
///
/// Entries are only ever added; there is no revocation path.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VerificationRegistry {
    verified: HashSet<Address>,
}

impl VerificationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `address` verified. Returns `true` if it was not verified before.
    pub fn verify(&mut self, address: Address) -> bool {
        self.verified.insert(address)
    }

    pub fn is_verified(&self, address: &Address) -> bool {
        self.verified.contains(address)
    }

    /// Gate for reads about `address` itself.
    pub fn require_verified(&self, address: &Address) -> Result<(), VerificationError> {
        if self.is_verified(address) {
            Ok(())
        } else {
            Err(VerificationError::NotVerified(*address))
        }
    }

    /// Gate for the address performing a mutation.
    pub fn require_caller(&self, caller: &Address) -> Result<(), VerificationError> {
        if self.is_verified(caller) {
            Ok(())
        } else {
            Err(VerificationError::CallerNotVerified(*caller))
        }
    }

    /// Gate for the address whose state a mutation touches.
    pub fn require_target(&self, target: &Address) -> Result<(), VerificationError> {
        if self.is_verified(target) {
            Ok(())
        } else {
            Err(VerificationError::TargetNotVerified(*target))
        }
    }

    pub fn len(&self) -> usize {
        self.verified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verified.is_empty()
    }

    /// Verified addresses in ascending order.
    pub fn sorted(&self) -> Vec<Address> {
        let mut out: Vec<Address> = self.verified.iter().copied().collect();
        out.sort();
        out
    }
}

impl FromIterator<Address> for VerificationRegistry {
    fn from_iter<I: IntoIterator<Item = Address>>(iter: I) -> Self {
        Self {
            verified: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillrep_crypto::derive_address;

    fn addr(s: &str) -> Address {
        derive_address(s.as_bytes())
    }

    #[test]
    fn verify_is_idempotent() {
        let mut reg = VerificationRegistry::new();
        assert!(reg.verify(addr("alice")));
        assert!(!reg.verify(addr("alice")));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn gates_report_the_right_role() {
        let mut reg = VerificationRegistry::new();
        reg.verify(addr("alice"));
        let bob = addr("bob");

        assert!(reg.require_verified(&addr("alice")).is_ok());
        assert_eq!(reg.require_verified(&bob), Err(VerificationError::NotVerified(bob)));
        assert_eq!(reg.require_caller(&bob), Err(VerificationError::CallerNotVerified(bob)));
        assert_eq!(reg.require_target(&bob), Err(VerificationError::TargetNotVerified(bob)));
    }

    #[test]
    fn sorted_is_ascending() {
        let reg: VerificationRegistry = ["c", "a", "b"].iter().map(|s| addr(s)).collect();
        let sorted = reg.sorted();
        assert_eq!(sorted.len(), 3);
        assert!(sorted.windows(2).all(|w| w[0] < w[1]));
    }
}
