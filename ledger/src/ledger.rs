//! The profile ledger state machine.

use crate::config::LedgerConfig;
use crate::endorsement::{EndorsementBook, EndorsementKey};
use crate::error::LedgerError;
use crate::event::{EndorsementChannel, LedgerEvent};
use crate::grid::SuperEndorsementGrid;
use crate::profile::Profile;
use serde::{Deserialize, Serialize};
use skillrep_types::{
    Address, ConfigId, LedgerParams, ScopeId, SkillId, SkillSlot, SuperEndorsement, MATRIX_CELLS,
    SKILL_SLOTS,
};
use skillrep_verification::{VerificationHub, VerificationRegistry, VerifierAuthority};
use std::collections::HashMap;

/// The system of record for profiles, skills and endorsements.
///
/// One instance owns all state; there is nothing global. Operations are
/// synchronous and each one either fully applies or returns an error having
/// changed nothing.
pub struct ProfileLedger {
    pub(crate) authority: VerifierAuthority,
    pub(crate) scope: ScopeId,
    pub(crate) params: LedgerParams,
    pub(crate) config_id: ConfigId,
    pub(crate) privacy_endorser: Option<Address>,
    pub(crate) verified: VerificationRegistry,
    pub(crate) profiles: HashMap<Address, Profile>,
    pub(crate) endorsements: EndorsementBook,
    pub(crate) grid: SuperEndorsementGrid,
    pending_events: Vec<LedgerEvent>,
}

/// Summary statistics for the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub verified: usize,
    pub profiles: usize,
    pub regular_endorsements: usize,
    pub expert_endorsements: usize,
    pub super_endorsements: usize,
}

impl ProfileLedger {
    pub fn new(config: LedgerConfig) -> Self {
        let mut params = config.params;
        if params.expert_threshold == 0 {
            tracing::warn!("expert threshold of 0 raised to 1");
            params.expert_threshold = 1;
        }
        Self {
            authority: VerifierAuthority::new(config.admin, config.hub),
            scope: config.scope,
            params,
            config_id: ConfigId::ZERO,
            privacy_endorser: None,
            verified: VerificationRegistry::new(),
            profiles: HashMap::new(),
            endorsements: EndorsementBook::new(),
            grid: SuperEndorsementGrid::new(),
            pending_events: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        config: LedgerConfig,
        config_id: ConfigId,
        privacy_endorser: Option<Address>,
        verified: VerificationRegistry,
        profiles: HashMap<Address, Profile>,
        endorsements: EndorsementBook,
        grid: SuperEndorsementGrid,
    ) -> Self {
        Self {
            config_id,
            privacy_endorser,
            verified,
            profiles,
            endorsements,
            grid,
            ..Self::new(config)
        }
    }

    // ── Configuration ──────────────────────────────────────────────────

    pub fn config(&self) -> LedgerConfig {
        LedgerConfig {
            admin: self.authority.admin,
            hub: self.authority.hub,
            scope: self.scope,
            params: self.params.clone(),
        }
    }

    pub fn admin(&self) -> &Address {
        &self.authority.admin
    }

    pub fn hub(&self) -> &Address {
        &self.authority.hub
    }

    pub fn scope(&self) -> &ScopeId {
        &self.scope
    }

    pub fn params(&self) -> &LedgerParams {
        &self.params
    }

    fn require_admin(&self, caller: &Address) -> Result<(), LedgerError> {
        if *caller == self.authority.admin {
            Ok(())
        } else {
            Err(LedgerError::NotAdmin(*caller))
        }
    }

    pub fn set_config_id(&mut self, caller: &Address, id: ConfigId) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        self.config_id = id;
        tracing::info!(config_id = %id, "config id set");
        self.pending_events.push(LedgerEvent::ConfigIdSet { id });
        Ok(())
    }

    pub fn config_id(&self) -> ConfigId {
        self.config_id
    }

    /// The hub's callback shape. The arguments do not influence the result.
    pub fn config_id_for(
        &self,
        _destination_chain: &[u8; 32],
        _user_identifier: &[u8; 32],
        _user_data: &[u8],
    ) -> ConfigId {
        self.config_id
    }

    /// Point the private endorsement channel at `address`. May be changed any number of times.
    pub fn set_privacy_endorser(
        &mut self,
        caller: &Address,
        address: Address,
    ) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        if let Some(previous) = self.privacy_endorser.replace(address) {
            tracing::info!(%previous, endorser = %address, "privacy endorser replaced");
        } else {
            tracing::info!(endorser = %address, "privacy endorser set");
        }
        self.pending_events
            .push(LedgerEvent::PrivacyEndorserSet { address });
        Ok(())
    }

    pub fn privacy_endorser(&self) -> Option<&Address> {
        self.privacy_endorser.as_ref()
    }

    // ── Verification ───────────────────────────────────────────────────

    /// Record `subject` as verified. `caller` must be the admin or the hub.
    ///
    /// Returns `true` if the address was not verified before; repeat calls
    /// are no-ops.
    pub fn verify(&mut self, caller: &Address, subject: Address) -> Result<bool, LedgerError> {
        let fresh = self.authority.verify(&mut self.verified, caller, subject)?;
        if fresh {
            self.pending_events
                .push(LedgerEvent::Verified { address: subject });
        }
        Ok(fresh)
    }

    /// Consult `hub` once about `subject` and cache a positive attestation.
    pub fn verify_with_hub<H: VerificationHub>(
        &mut self,
        hub: &H,
        subject: Address,
    ) -> Result<bool, LedgerError> {
        let fresh = self
            .authority
            .verify_with_hub(&mut self.verified, hub, subject)?;
        if fresh {
            self.pending_events
                .push(LedgerEvent::Verified { address: subject });
        }
        Ok(fresh)
    }

    pub fn is_verified(&self, address: &Address) -> bool {
        self.verified.is_verified(address)
    }

    // ── Profiles ───────────────────────────────────────────────────────

    pub fn set_profile_uri(
        &mut self,
        caller: &Address,
        uri: impl Into<String>,
    ) -> Result<(), LedgerError> {
        self.verified.require_verified(caller)?;
        let uri = uri.into();
        tracing::debug!(address = %caller, "profile uri updated");
        self.profiles.entry(*caller).or_default().uri = uri.clone();
        self.pending_events.push(LedgerEvent::ProfileUriUpdated {
            address: *caller,
            uri,
        });
        Ok(())
    }

    /// The profile URI of `address`; empty if never set.
    pub fn get_profile_uri(&self, address: &Address) -> Result<&str, LedgerError> {
        self.verified.require_verified(address)?;
        Ok(self
            .profiles
            .get(address)
            .map_or("", |profile| profile.uri.as_str()))
    }

    /// Name slot `slot` of `target`, discarding that slot's counters and
    /// expert flag.
    ///
    /// Any verified caller may write any verified target's slot.
    pub fn set_skill(
        &mut self,
        caller: &Address,
        target: &Address,
        slot: usize,
        name: impl Into<String>,
    ) -> Result<(), LedgerError> {
        self.verified.require_caller(caller)?;
        self.verified.require_target(target)?;
        if slot >= SKILL_SLOTS {
            return Err(LedgerError::InvalidSlot(slot));
        }

        let name = name.into();
        tracing::debug!(by = %caller, %target, slot, name = %name, "skill slot set");
        self.profiles.entry(*target).or_default().skills[slot] = SkillSlot::named(name.clone());
        self.pending_events.push(LedgerEvent::SkillSet {
            by: *caller,
            target: *target,
            slot,
            name,
        });
        Ok(())
    }

    pub fn get_skills(&self, address: &Address) -> Result<[SkillSlot; SKILL_SLOTS], LedgerError> {
        self.verified.require_verified(address)?;
        Ok(self
            .profiles
            .get(address)
            .map(|profile| profile.skills.clone())
            .unwrap_or_default())
    }

    // ── Endorsements ───────────────────────────────────────────────────

    fn find_target_skill(&self, target: &Address, skill: &SkillId) -> Result<usize, LedgerError> {
        self.profiles
            .get(target)
            .and_then(|profile| profile.find_skill(skill))
            .ok_or(LedgerError::SkillNotFound {
                target: *target,
                skill: *skill,
            })
    }

    /// Apply one endorsement to a slot that has already been validated.
    fn credit(
        &mut self,
        target: &Address,
        slot: usize,
        skill: &SkillId,
        channel: EndorsementChannel,
        endorser: Option<Address>,
    ) {
        let threshold = self.params.expert_threshold;
        let Some(profile) = self.profiles.get_mut(target) else {
            return;
        };
        let entry = &mut profile.skills[slot];
        entry.total_endorsements = entry.total_endorsements.saturating_add(1);
        if channel == EndorsementChannel::Expert {
            entry.expert_endorsements = entry.expert_endorsements.saturating_add(1);
        }
        let total = entry.total_endorsements;
        let reached = !entry.is_expert && total >= threshold;
        if reached {
            entry.is_expert = true;
        }

        tracing::debug!(?channel, %target, %skill, total, "skill endorsed");
        self.pending_events.push(LedgerEvent::SkillEndorsed {
            channel,
            endorser,
            target: *target,
            skill: *skill,
            total_endorsements: total,
        });
        if reached {
            tracing::info!(%target, %skill, total, "expert status reached");
            self.pending_events.push(LedgerEvent::ExpertStatusReached {
                address: *target,
                skill: *skill,
            });
        }
    }

    /// Regular endorsement; at most once per `(caller, target, skill)`.
    pub fn endorse_skill(
        &mut self,
        caller: &Address,
        target: &Address,
        skill: &SkillId,
    ) -> Result<(), LedgerError> {
        self.verified.require_caller(caller)?;
        self.verified.require_target(target)?;
        let slot = self.find_target_skill(target, skill)?;
        let key = EndorsementKey::new(*caller, *target, *skill);
        if self.endorsements.has_regular(&key) {
            return Err(already_endorsed(key));
        }

        self.endorsements.record_regular(key);
        self.credit(target, slot, skill, EndorsementChannel::Regular, Some(*caller));
        Ok(())
    }

    /// Expert endorsement: only an expert in `skill` may give one, at most
    /// once per triple, tracked apart from regular endorsements.
    pub fn expert_endorse_skill(
        &mut self,
        caller: &Address,
        target: &Address,
        skill: &SkillId,
    ) -> Result<(), LedgerError> {
        self.verified.require_caller(caller)?;
        self.verified.require_target(target)?;
        let slot = self.find_target_skill(target, skill)?;
        let caller_is_expert = self
            .profiles
            .get(caller)
            .is_some_and(|profile| profile.is_expert_in(skill));
        if !caller_is_expert {
            return Err(LedgerError::NotExpert {
                caller: *caller,
                skill: *skill,
            });
        }
        let key = EndorsementKey::new(*caller, *target, *skill);
        if self.endorsements.has_expert(&key) {
            return Err(already_endorsed(key));
        }

        self.endorsements.record_expert(key);
        self.credit(target, slot, skill, EndorsementChannel::Expert, Some(*caller));
        Ok(())
    }

    /// The private channel. Only the configured privacy endorser may call it.
    ///
    /// No dedup happens here: the real endorser is never visible to the
    /// ledger, so uniqueness is the privacy endorser's job.
    pub fn endorse_skill_privately(
        &mut self,
        caller: &Address,
        target: &Address,
        skill: &SkillId,
    ) -> Result<(), LedgerError> {
        if self.privacy_endorser != Some(*caller) {
            return Err(LedgerError::UnauthorizedEndorser(*caller));
        }
        self.verified.require_target(target)?;
        let slot = self.find_target_skill(target, skill)?;

        self.credit(target, slot, skill, EndorsementChannel::Private, None);
        Ok(())
    }

    // ── Super endorsements ─────────────────────────────────────────────

    /// Pin `message` at `(x, y)` on `target`'s grid, replacing whatever was there.
    pub fn set_super_endorsement(
        &mut self,
        caller: &Address,
        target: &Address,
        x: u8,
        y: u8,
        message: impl Into<String>,
    ) -> Result<(), LedgerError> {
        self.verified.require_caller(caller)?;
        self.verified.require_target(target)?;
        SuperEndorsementGrid::check_position(x, y)?;

        tracing::debug!(endorser = %caller, %target, x, y, "super endorsement set");
        self.grid.set(
            *target,
            SuperEndorsement {
                endorser: *caller,
                x,
                y,
                message: message.into(),
            },
        );
        self.pending_events.push(LedgerEvent::SuperEndorsementSet {
            endorser: *caller,
            target: *target,
            x,
            y,
        });
        Ok(())
    }

    /// The 16 cells of `address`'s grid at `index = y * 4 + x`.
    pub fn get_super_endorsed_matrix(&self, address: &Address) -> [SuperEndorsement; MATRIX_CELLS] {
        self.grid.matrix(address)
    }

    /// Every cell currently authored by `endorser`, as `(recipient, cell)`.
    pub fn super_endorsements_by(&self, endorser: &Address) -> Vec<(Address, SuperEndorsement)> {
        self.grid.authored_by(endorser)
    }

    // ── Events & stats ─────────────────────────────────────────────────

    /// Take all pending events, oldest first.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn pending_events(&self) -> &[LedgerEvent] {
        &self.pending_events
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            verified: self.verified.len(),
            profiles: self.profiles.len(),
            regular_endorsements: self.endorsements.regular_count(),
            expert_endorsements: self.endorsements.expert_count(),
            super_endorsements: self.grid.len(),
        }
    }
}

fn already_endorsed(key: EndorsementKey) -> LedgerError {
    LedgerError::AlreadyEndorsed {
        endorser: key.endorser,
        target: key.target,
        skill: key.skill,
    }
}
