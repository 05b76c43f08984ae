//! Batch operations replayed against a deployment.

use serde::{Deserialize, Serialize};
use skillrep_crypto::skill_id;
use skillrep_ledger::{LedgerError, ProfileLedger};
use skillrep_privacy::{PrivacyEndorser, PrivacyError};
use skillrep_types::Address;
use thiserror::Error;

/// One step of an operations file. Skills are named; their identifiers are
/// derived on the fly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    /// Verify with the ledger.
    Verify { caller: Address, subject: Address },
    /// Verify with the privacy endorser.
    VerifyPrivate { caller: Address, subject: Address },
    SetProfileUri { caller: Address, uri: String },
    SetSkill {
        caller: Address,
        target: Address,
        slot: usize,
        name: String,
    },
    EndorseSkill {
        caller: Address,
        target: Address,
        skill: String,
    },
    ExpertEndorseSkill {
        caller: Address,
        target: Address,
        skill: String,
    },
    /// Routed through the privacy endorser.
    EndorseSkillPrivately {
        caller: Address,
        target: Address,
        skill: String,
    },
    SetSuperEndorsement {
        caller: Address,
        target: Address,
        x: u8,
        y: u8,
        message: String,
    },
}

impl Operation {
    /// The operation's tag, safe to log. Operation fields are not: the
    /// caller of a private endorsement must never reach the logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Verify { .. } => "verify",
            Operation::VerifyPrivate { .. } => "verify_private",
            Operation::SetProfileUri { .. } => "set_profile_uri",
            Operation::SetSkill { .. } => "set_skill",
            Operation::EndorseSkill { .. } => "endorse_skill",
            Operation::ExpertEndorseSkill { .. } => "expert_endorse_skill",
            Operation::EndorseSkillPrivately { .. } => "endorse_skill_privately",
            Operation::SetSuperEndorsement { .. } => "set_super_endorsement",
        }
    }
}

#[derive(Debug, Error)]
pub enum OpError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Privacy(#[from] PrivacyError),
}

/// Apply one operation. The ledger is the endorser's sink.
pub fn apply(
    endorser: &mut PrivacyEndorser<ProfileLedger>,
    op: &Operation,
) -> Result<(), OpError> {
    match op {
        Operation::Verify { caller, subject } => {
            endorser.sink_mut().verify(caller, *subject)?;
        }
        Operation::VerifyPrivate { caller, subject } => {
            endorser.verify(caller, *subject)?;
        }
        Operation::SetProfileUri { caller, uri } => {
            endorser.sink_mut().set_profile_uri(caller, uri.clone())?;
        }
        Operation::SetSkill {
            caller,
            target,
            slot,
            name,
        } => {
            endorser
                .sink_mut()
                .set_skill(caller, target, *slot, name.clone())?;
        }
        Operation::EndorseSkill {
            caller,
            target,
            skill,
        } => {
            endorser
                .sink_mut()
                .endorse_skill(caller, target, &skill_id(skill))?;
        }
        Operation::ExpertEndorseSkill {
            caller,
            target,
            skill,
        } => {
            endorser
                .sink_mut()
                .expert_endorse_skill(caller, target, &skill_id(skill))?;
        }
        Operation::EndorseSkillPrivately {
            caller,
            target,
            skill,
        } => {
            endorser.endorse_skill_privately(caller, target, &skill_id(skill))?;
        }
        Operation::SetSuperEndorsement {
            caller,
            target,
            x,
            y,
            message,
        } => {
            endorser
                .sink_mut()
                .set_super_endorsement(caller, target, *x, *y, message.clone())?;
        }
    }
    Ok(())
}

/// Apply `ops` in order, stopping at the first failure.
///
/// Returns the index of the failing operation with its error.
pub fn apply_all(
    endorser: &mut PrivacyEndorser<ProfileLedger>,
    ops: &[Operation],
) -> Result<(), (usize, OpError)> {
    for (idx, op) in ops.iter().enumerate() {
        apply(endorser, op).map_err(|e| (idx, e))?;
        tracing::debug!(idx, kind = op.kind(), "operation applied");
    }
    Ok(())
}
