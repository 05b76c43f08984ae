//! Events the ledger emits for every successful mutation.

use serde::{Deserialize, Serialize};
use skillrep_types::{Address, ConfigId, SkillId};

/// Which path an endorsement arrived through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndorsementChannel {
    Regular,
    Expert,
    /// Submitted by the privacy endorser; the true endorser is not known here.
    Private,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    Verified {
        address: Address,
    },
    ProfileUriUpdated {
        address: Address,
        uri: String,
    },
    SkillSet {
        by: Address,
        target: Address,
        slot: usize,
        name: String,
    },
    SkillEndorsed {
        channel: EndorsementChannel,
        /// `None` on the private channel.
        endorser: Option<Address>,
        target: Address,
        skill: SkillId,
        total_endorsements: u64,
    },
    ExpertStatusReached {
        address: Address,
        skill: SkillId,
    },
    SuperEndorsementSet {
        endorser: Address,
        target: Address,
        x: u8,
        y: u8,
    },
    ConfigIdSet {
        id: ConfigId,
    },
    PrivacyEndorserSet {
        address: Address,
    },
}
