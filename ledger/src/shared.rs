//! Shared ownership of a ledger and the seam the privacy endorser forwards into.

use crate::error::LedgerError;
use crate::ledger::ProfileLedger;
use skillrep_types::{Address, SkillId};
use std::sync::{Arc, Mutex, MutexGuard};

/// Where a privacy endorser delivers its endorsements.
pub trait PrivateEndorsementSink {
    /// Deliver one private endorsement with `caller` as the visible sender.
    fn endorse_skill_privately(
        &mut self,
        caller: &Address,
        target: &Address,
        skill: &SkillId,
    ) -> Result<(), LedgerError>;
}

impl PrivateEndorsementSink for ProfileLedger {
    fn endorse_skill_privately(
        &mut self,
        caller: &Address,
        target: &Address,
        skill: &SkillId,
    ) -> Result<(), LedgerError> {
        ProfileLedger::endorse_skill_privately(self, caller, target, skill)
    }
}

impl<T: PrivateEndorsementSink + ?Sized> PrivateEndorsementSink for &mut T {
    fn endorse_skill_privately(
        &mut self,
        caller: &Address,
        target: &Address,
        skill: &SkillId,
    ) -> Result<(), LedgerError> {
        (**self).endorse_skill_privately(caller, target, skill)
    }
}

/// A clonable handle to one ledger behind a single exclusive lock.
///
/// Every operation runs under the lock, so each stays atomic with respect
/// to all others.
#[derive(Clone)]
pub struct SharedLedger {
    inner: Arc<Mutex<ProfileLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: ProfileLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    pub fn lock(&self) -> Result<MutexGuard<'_, ProfileLedger>, LedgerError> {
        self.inner.lock().map_err(|_| LedgerError::LockPoisoned)
    }

    /// Run `f` with exclusive access to the ledger.
    pub fn with<R>(&self, f: impl FnOnce(&mut ProfileLedger) -> R) -> Result<R, LedgerError> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }
}

impl PrivateEndorsementSink for SharedLedger {
    fn endorse_skill_privately(
        &mut self,
        caller: &Address,
        target: &Address,
        skill: &SkillId,
    ) -> Result<(), LedgerError> {
        self.lock()?.endorse_skill_privately(caller, target, skill)
    }
}
