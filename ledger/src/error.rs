use skillrep_types::{Address, SkillId};
use skillrep_verification::VerificationError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error("invalid skill slot {0}")]
    InvalidSlot(usize),

    #[error("invalid matrix position ({x}, {y})")]
    InvalidPosition { x: u8, y: u8 },

    #[error("skill {skill} does not exist on {target}")]
    SkillNotFound { target: Address, skill: SkillId },

    #[error("{endorser} already endorsed skill {skill} of {target}")]
    AlreadyEndorsed {
        endorser: Address,
        target: Address,
        skill: SkillId,
    },

    #[error("{caller} is not an expert in skill {skill}")]
    NotExpert { caller: Address, skill: SkillId },

    #[error("{0} is not the configured privacy endorser")]
    UnauthorizedEndorser(Address),

    #[error("{0} is not the ledger administrator")]
    NotAdmin(Address),

    #[error("snapshot hash does not match its contents")]
    CorruptSnapshot,

    #[error("snapshot encoding error: {0}")]
    Serialization(String),

    #[error("ledger lock poisoned")]
    LockPoisoned,
}
