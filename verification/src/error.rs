use skillrep_types::Address;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerificationError {
    #[error("user {0} not verified")]
    NotVerified(Address),

    #[error("caller {0} not verified")]
    CallerNotVerified(Address),

    #[error("target user {0} not verified")]
    TargetNotVerified(Address),

    #[error("{0} may not record verifications")]
    NotAuthorized(Address),

    #[error("verification hub did not attest {0}")]
    AttestationRejected(Address),
}
