//! Ledger snapshots: the full ledger state at a point in time.
//!
//! The snapshot hash is computed deterministically from the sorted state so
//! a restored ledger can be checked against the one that produced it.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

use crate::config::LedgerConfig;
use crate::endorsement::{EndorsementBook, EndorsementKey};
use crate::error::LedgerError;
use crate::grid::SuperEndorsementGrid;
use crate::ledger::ProfileLedger;
use crate::profile::Profile;
use serde::{Deserialize, Serialize};
use skillrep_types::{Address, ConfigId, SuperEndorsement};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Everything needed to rebuild a [`ProfileLedger`]. Pending events are not included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Blake2b-256 over the fields below.
    pub hash: [u8; 32],
    pub version: u32,
    pub config: LedgerConfig,
    pub config_id: ConfigId,
    pub privacy_endorser: Option<Address>,
    /// Ascending.
    pub verified: Vec<Address>,
    /// Ascending by address.
    pub profiles: Vec<(Address, Profile)>,
    pub regular_endorsements: Vec<EndorsementKey>,
    pub expert_endorsements: Vec<EndorsementKey>,
    /// Ascending by recipient, then grid index.
    pub super_endorsements: Vec<(Address, SuperEndorsement)>,
}

impl LedgerSnapshot {
    /// Compute the Blake2b-256 hash of this snapshot deterministically.
    fn compute_hash(&self) -> [u8; 32] {
        fn put_str(hasher: &mut Blake2b<U32>, s: &str) {
            hasher.update((s.len() as u64).to_le_bytes());
            hasher.update(s.as_bytes());
        }

        fn put_key(hasher: &mut Blake2b<U32>, key: &EndorsementKey) {
            hasher.update(key.endorser.as_bytes());
            hasher.update(key.target.as_bytes());
            hasher.update(key.skill.as_bytes());
        }

        let mut hasher = Blake2b::<U32>::new();
        hasher.update(self.version.to_le_bytes());
        hasher.update(self.config.admin.as_bytes());
        hasher.update(self.config.hub.as_bytes());
        hasher.update(self.config.scope.as_bytes());
        hasher.update(self.config.params.expert_threshold.to_le_bytes());
        hasher.update(self.config_id.as_bytes());
        hasher.update(self.privacy_endorser.unwrap_or(Address::ZERO).as_bytes());

        hasher.update((self.verified.len() as u64).to_le_bytes());
        for address in &self.verified {
            hasher.update(address.as_bytes());
        }

        hasher.update((self.profiles.len() as u64).to_le_bytes());
        for (address, profile) in &self.profiles {
            hasher.update(address.as_bytes());
            put_str(&mut hasher, &profile.uri);
            for slot in &profile.skills {
                put_str(&mut hasher, &slot.name);
                hasher.update(slot.total_endorsements.to_le_bytes());
                hasher.update(slot.expert_endorsements.to_le_bytes());
                hasher.update([slot.is_expert as u8]);
            }
        }

        hasher.update((self.regular_endorsements.len() as u64).to_le_bytes());
        for key in &self.regular_endorsements {
            put_key(&mut hasher, key);
        }
        hasher.update((self.expert_endorsements.len() as u64).to_le_bytes());
        for key in &self.expert_endorsements {
            put_key(&mut hasher, key);
        }

        hasher.update((self.super_endorsements.len() as u64).to_le_bytes());
        for (recipient, cell) in &self.super_endorsements {
            hasher.update(recipient.as_bytes());
            hasher.update(cell.endorser.as_bytes());
            hasher.update([cell.x, cell.y]);
            put_str(&mut hasher, &cell.message);
        }

        let result = hasher.finalize();
        let mut out = [0u8; 32];
        out.copy_from_slice(&result);
        out
    }

    /// Verify the snapshot hash matches its contents.
    pub fn verify(&self) -> bool {
        self.hash == self.compute_hash()
    }

    /// Serialize the snapshot to bytes (bincode).
    pub fn to_bytes(&self) -> Result<Vec<u8>, LedgerError> {
        bincode::serialize(self).map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    /// Deserialize a snapshot from bytes. The hash is not checked here.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LedgerError> {
        bincode::deserialize(bytes).map_err(|e| LedgerError::Serialization(e.to_string()))
    }
}

impl ProfileLedger {
    /// Capture the current state.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let mut profiles: Vec<(Address, Profile)> = self
            .profiles
            .iter()
            .map(|(address, profile)| (*address, profile.clone()))
            .collect();
        profiles.sort_by_key(|(address, _)| *address);

        let mut snap = LedgerSnapshot {
            hash: [0u8; 32],
            version: SNAPSHOT_VERSION,
            config: self.config(),
            config_id: self.config_id,
            privacy_endorser: self.privacy_endorser,
            verified: self.verified.sorted(),
            profiles,
            regular_endorsements: self.endorsements.sorted_regular(),
            expert_endorsements: self.endorsements.sorted_expert(),
            super_endorsements: self.grid.sorted_cells(),
        };
        snap.hash = snap.compute_hash();
        snap
    }

    /// Rebuild a ledger from a snapshot whose hash checks out.
    pub fn restore(snapshot: LedgerSnapshot) -> Result<Self, LedgerError> {
        if !snapshot.verify() {
            return Err(LedgerError::CorruptSnapshot);
        }
        tracing::info!(
            verified = snapshot.verified.len(),
            profiles = snapshot.profiles.len(),
            "ledger restored from snapshot"
        );
        Ok(Self::from_parts(
            snapshot.config,
            snapshot.config_id,
            snapshot.privacy_endorser,
            snapshot.verified.into_iter().collect(),
            snapshot.profiles.into_iter().collect(),
            EndorsementBook::from_parts(
                snapshot.regular_endorsements,
                snapshot.expert_endorsements,
            ),
            snapshot
                .super_endorsements
                .into_iter()
                .collect::<SuperEndorsementGrid>(),
        ))
    }
}
