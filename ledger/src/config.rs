//! Construction-time ledger configuration.

use serde::{Deserialize, Serialize};
use skillrep_types::{Address, LedgerParams, ScopeId};

/// Everything a [`ProfileLedger`](crate::ProfileLedger) needs at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// May set the config id, rewire the privacy endorser and record verifications.
    pub admin: Address,
    /// The verification hub's callback address.
    pub hub: Address,
    /// Verification scope the hub proofs are bound to.
    #[serde(default)]
    pub scope: ScopeId,
    #[serde(default)]
    pub params: LedgerParams,
}

impl LedgerConfig {
    pub fn new(admin: Address, hub: Address) -> Self {
        Self {
            admin,
            hub,
            scope: ScopeId::ZERO,
            params: LedgerParams::default(),
        }
    }

    pub fn with_scope(mut self, scope: ScopeId) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_params(mut self, params: LedgerParams) -> Self {
        self.params = params;
        self
    }
}
