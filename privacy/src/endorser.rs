//! The privacy endorser component.

use crate::error::PrivacyError;
use serde::{Deserialize, Serialize};
use skillrep_ledger::{EndorsementKey, PrivateEndorsementSink};
use skillrep_types::{Address, ConfigId, SkillId};
use skillrep_verification::{VerificationHub, VerificationRegistry, VerifierAuthority};
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyEndorserConfig {
    /// The address the ledger sees on every forwarded endorsement.
    pub address: Address,
    pub admin: Address,
    pub hub: Address,
}

/// The endorser's persistent state, apart from its configuration and sink.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EndorserState {
    pub config_id: ConfigId,
    pub verified: VerificationRegistry,
    pub endorsed: HashSet<EndorsementKey>,
}

/// Forwards verified, deduplicated endorsements into `S` without revealing who sent them.
pub struct PrivacyEndorser<S> {
    address: Address,
    authority: VerifierAuthority,
    state: EndorserState,
    sink: S,
}

impl<S: PrivateEndorsementSink> PrivacyEndorser<S> {
    pub fn new(config: PrivacyEndorserConfig, sink: S) -> Self {
        Self::with_state(config, EndorserState::default(), sink)
    }

    /// Resume from previously saved state.
    pub fn with_state(config: PrivacyEndorserConfig, state: EndorserState, sink: S) -> Self {
        Self {
            address: config.address,
            authority: VerifierAuthority::new(config.admin, config.hub),
            state,
            sink,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn admin(&self) -> &Address {
        &self.authority.admin
    }

    pub fn config(&self) -> PrivacyEndorserConfig {
        PrivacyEndorserConfig {
            address: self.address,
            admin: self.authority.admin,
            hub: self.authority.hub,
        }
    }

    pub fn state(&self) -> &EndorserState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    // ── Verification (independent of the ledger's) ──

    pub fn verify(&mut self, caller: &Address, subject: Address) -> Result<bool, PrivacyError> {
        Ok(self
            .authority
            .verify(&mut self.state.verified, caller, subject)?)
    }

    pub fn verify_with_hub<H: VerificationHub>(
        &mut self,
        hub: &H,
        subject: Address,
    ) -> Result<bool, PrivacyError> {
        Ok(self
            .authority
            .verify_with_hub(&mut self.state.verified, hub, subject)?)
    }

    pub fn is_verified(&self, address: &Address) -> bool {
        self.state.verified.is_verified(address)
    }

    // ── Config id ──

    pub fn set_config_id(&mut self, caller: &Address, id: ConfigId) -> Result<(), PrivacyError> {
        if *caller != self.authority.admin {
            return Err(PrivacyError::NotAdmin(*caller));
        }
        self.state.config_id = id;
        tracing::info!(config_id = %id, "privacy endorser config id set");
        Ok(())
    }

    pub fn config_id(&self) -> ConfigId {
        self.state.config_id
    }

    /// The hub's callback shape. The arguments do not influence the result.
    pub fn config_id_for(
        &self,
        _destination_chain: &[u8; 32],
        _user_identifier: &[u8; 32],
        _user_data: &[u8],
    ) -> ConfigId {
        self.state.config_id
    }

    // ── Endorsing ──

    /// Endorse `target`'s `skill` on behalf of `caller` without revealing `caller`.
    ///
    /// The triple is recorded only once the ledger has accepted it, so a
    /// ledger-side rejection can be retried later.
    pub fn endorse_skill_privately(
        &mut self,
        caller: &Address,
        target: &Address,
        skill: &SkillId,
    ) -> Result<(), PrivacyError> {
        self.state.verified.require_caller(caller)?;
        let key = EndorsementKey::new(*caller, *target, *skill);
        if self.state.endorsed.contains(&key) {
            return Err(PrivacyError::AlreadyEndorsed {
                target: *target,
                skill: *skill,
            });
        }

        self.sink
            .endorse_skill_privately(&self.address, target, skill)?;
        self.state.endorsed.insert(key);
        tracing::debug!(%target, %skill, "private endorsement forwarded");
        Ok(())
    }

    pub fn has_endorsed(&self, caller: &Address, target: &Address, skill: &SkillId) -> bool {
        self.state
            .endorsed
            .contains(&EndorsementKey::new(*caller, *target, *skill))
    }

    pub fn endorsement_count(&self) -> usize {
        self.state.endorsed.len()
    }
}
