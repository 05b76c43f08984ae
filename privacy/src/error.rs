use skillrep_ledger::LedgerError;
use skillrep_types::{Address, SkillId};
use skillrep_verification::VerificationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrivacyError {
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error("skill {skill} of {target} already endorsed through this channel by the caller")]
    AlreadyEndorsed { target: Address, skill: SkillId },

    #[error("{0} is not the privacy endorser administrator")]
    NotAdmin(Address),

    #[error("ledger rejected private endorsement: {0}")]
    Ledger(#[from] LedgerError),
}
