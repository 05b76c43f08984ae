//! Nullable verification hub: attestations under test control.

use skillrep_types::Address;
use skillrep_verification::VerificationHub;
use std::cell::{Cell, RefCell};
use std::collections::HashSet;

/// A verification hub that attests exactly the subjects it was told to.
///
/// Counts how often it was consulted so tests can check that verdicts are
/// cached rather than re-requested.
pub struct NullHub {
    address: Address,
    attested: RefCell<HashSet<Address>>,
    consultations: Cell<usize>,
}

impl NullHub {
    pub fn new(address: Address) -> Self {
        Self {
            address,
            attested: RefCell::new(HashSet::new()),
            consultations: Cell::new(0),
        }
    }

    /// Make the hub vouch for `subject` from now on.
    pub fn attest_subject(&self, subject: Address) {
        self.attested.borrow_mut().insert(subject);
    }

    /// Number of `attest` calls so far.
    pub fn consultations(&self) -> usize {
        self.consultations.get()
    }
}

impl VerificationHub for NullHub {
    fn address(&self) -> &Address {
        &self.address
    }

    fn attest(&self, subject: &Address) -> bool {
        self.consultations.set(self.consultations.get() + 1);
        self.attested.borrow().contains(subject)
    }
}
