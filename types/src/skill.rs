//! Skill slots held on each profile.

use serde::{Deserialize, Serialize};

/// Number of skill slots every profile carries.
pub const SKILL_SLOTS: usize = 4;

/// One named skill and its endorsement counters.
///
/// An empty `name` means the slot is unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSlot {
    pub name: String,
    /// Every endorsement received, whatever the channel.
    pub total_endorsements: u64,
    /// The subset of `total_endorsements` given by experts.
    pub expert_endorsements: u64,
    /// Sticky: once set it stays set until the slot is rewritten.
    pub is_expert: bool,
}

impl SkillSlot {
    /// A freshly named slot with zeroed counters.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}
