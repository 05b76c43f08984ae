//! Ledger parameters.

use serde::{de, Deserialize, Deserializer, Serialize};

/// Endorsements a skill must receive before its owner becomes an expert on it.
pub const DEFAULT_EXPERT_THRESHOLD: u64 = 100;

/// Tunable ledger parameters, fixed at construction time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerParams {
    /// Total endorsements (regular, expert and private combined) at which a
    /// skill slot flips to expert. Never zero.
    #[serde(deserialize_with = "nonzero_threshold")]
    pub expert_threshold: u64,
}

fn nonzero_threshold<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match u64::deserialize(deserializer)? {
        0 => Err(de::Error::custom("expert_threshold must be at least 1")),
        threshold => Ok(threshold),
    }
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            expert_threshold: DEFAULT_EXPERT_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_one_hundred() {
        assert_eq!(LedgerParams::default().expert_threshold, 100);
    }

    #[test]
    fn empty_json_uses_defaults() {
        let params: LedgerParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, LedgerParams::default());
    }

    #[test]
    fn zero_threshold_rejected() {
        assert!(serde_json::from_str::<LedgerParams>(r#"{"expert_threshold": 0}"#).is_err());
        let params: LedgerParams = serde_json::from_str(r#"{"expert_threshold": 1}"#).unwrap();
        assert_eq!(params.expert_threshold, 1);
    }
}
