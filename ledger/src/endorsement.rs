//! Endorsement dedup records.
//!
//! Two independent sets keyed by the same triple: one for regular
//! endorsements, one for expert endorsements. An expert who already gave a
//! regular endorsement may still give an expert one on the same triple.

use serde::{Deserialize, Serialize};
use skillrep_types::{Address, SkillId};
use std::collections::HashSet;

/// One counted interaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EndorsementKey {
    pub endorser: Address,
    pub target: Address,
    pub skill: SkillId,
}

impl EndorsementKey {
    pub fn new(endorser: Address, target: Address, skill: SkillId) -> Self {
        Self {
            endorser,
            target,
            skill,
        }
    }
}

/// Monotonic dedup sets; entries are never removed.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EndorsementBook {
    regular: HashSet<EndorsementKey>,
    expert: HashSet<EndorsementKey>,
}

impl EndorsementBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_regular(&self, key: &EndorsementKey) -> bool {
        self.regular.contains(key)
    }

    pub fn has_expert(&self, key: &EndorsementKey) -> bool {
        self.expert.contains(key)
    }

    /// Returns `false` if the triple was already recorded.
    pub fn record_regular(&mut self, key: EndorsementKey) -> bool {
        self.regular.insert(key)
    }

    /// Returns `false` if the triple was already recorded.
    pub fn record_expert(&mut self, key: EndorsementKey) -> bool {
        self.expert.insert(key)
    }

    pub fn regular_count(&self) -> usize {
        self.regular.len()
    }

    pub fn expert_count(&self) -> usize {
        self.expert.len()
    }

    pub(crate) fn sorted_regular(&self) -> Vec<EndorsementKey> {
        sorted(&self.regular)
    }

    pub(crate) fn sorted_expert(&self) -> Vec<EndorsementKey> {
        sorted(&self.expert)
    }

    pub(crate) fn from_parts(regular: Vec<EndorsementKey>, expert: Vec<EndorsementKey>) -> Self {
        Self {
            regular: regular.into_iter().collect(),
            expert: expert.into_iter().collect(),
        }
    }
}

fn sorted(set: &HashSet<EndorsementKey>) -> Vec<EndorsementKey> {
    let mut out: Vec<EndorsementKey> = set.iter().copied().collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillrep_crypto::{derive_address, skill_id};

    fn key(endorser: &str, target: &str, skill: &str) -> EndorsementKey {
        EndorsementKey::new(
            derive_address(endorser.as_bytes()),
            derive_address(target.as_bytes()),
            skill_id(skill),
        )
    }

    #[test]
    fn regular_dedup() {
        let mut book = EndorsementBook::new();
        assert!(book.record_regular(key("a", "b", "Rust")));
        assert!(!book.record_regular(key("a", "b", "Rust")));
        assert!(book.record_regular(key("a", "b", "Go")));
        assert!(book.record_regular(key("c", "b", "Rust")));
        assert_eq!(book.regular_count(), 3);
    }

    #[test]
    fn regular_and_expert_sets_are_independent() {
        let mut book = EndorsementBook::new();
        let k = key("a", "b", "Rust");
        assert!(book.record_regular(k));
        assert!(!book.has_expert(&k));
        assert!(book.record_expert(k));
        assert!(book.has_regular(&k) && book.has_expert(&k));
        assert_eq!((book.regular_count(), book.expert_count()), (1, 1));
    }

    #[test]
    fn direction_matters() {
        let mut book = EndorsementBook::new();
        book.record_regular(key("a", "b", "Rust"));
        assert!(!book.has_regular(&key("b", "a", "Rust")));
    }
}
