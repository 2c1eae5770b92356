use crate::catalog::{Skill, SkillId};
use crate::tags::normalize_name;

/// Provides access to the host's skill catalog.
///
/// Only needed to resolve name-keyed `skill_loss` overrides; hosts without
/// named skills can wire an empty implementation.
pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: SkillId) -> Option<Skill>;

    /// Returns all skills available in this oracle.
    fn skills(&self) -> Vec<Skill>;

    /// Looks a skill up by display name (normalized matching, first wins).
    fn find_by_name(&self, name: &str) -> Option<Skill> {
        let wanted = normalize_name(name);
        self.skills()
            .into_iter()
            .find(|skill| normalize_name(&skill.name) == wanted)
    }
}
