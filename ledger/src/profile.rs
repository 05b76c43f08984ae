//! Per-address profile: URI plus four skill slots.

use serde::{Deserialize, Serialize};
use skillrep_crypto::skill_id;
use skillrep_types::{SkillId, SkillSlot, SKILL_SLOTS};

/// A participant's profile. Created zero-valued on first access.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub uri: String,
    pub skills: [SkillSlot; SKILL_SLOTS],
}

impl Profile {
    /// Index of the slot holding `skill`.
    ///
    /// When several slots carry the same name, the lowest index wins; it is
    /// the slot that receives endorsements for that identifier.
    pub fn find_skill(&self, skill: &SkillId) -> Option<usize> {
        self.skills
            .iter()
            .position(|slot| slot.is_named() && skill_id(&slot.name) == *skill)
    }

    pub fn is_expert_in(&self, skill: &SkillId) -> bool {
        self.find_skill(skill)
            .is_some_and(|idx| self.skills[idx].is_expert)
    }
}
