//! Minimal [`armory_core::SkillOracle`] backed by an in-memory map.
use armory_core::{Skill, SkillId, SkillOracle};
use std::collections::HashMap;

/// SkillOracle implementation with static skill definitions
pub struct SkillOracleImpl {
    skills: HashMap<SkillId, Skill>,
}

impl SkillOracleImpl {
    pub fn new() -> Self {
        Self {
            skills: HashMap::new(),
        }
    }

    /// Add a skill definition
    pub fn add_skill(&mut self, skill: Skill) {
        self.skills.insert(skill.id, skill);
    }

    /// Build an oracle from loader output
    pub fn from_skills(skills: Vec<Skill>) -> Self {
        let mut oracle = Self::new();
        for skill in skills {
            oracle.add_skill(skill);
        }
        oracle
    }
}

impl Default for SkillOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillOracle for SkillOracleImpl {
    fn skill(&self, id: SkillId) -> Option<Skill> {
        self.skills.get(&id).cloned()
    }

    fn skills(&self) -> Vec<Skill> {
        self.skills.values().cloned().collect()
    }
}
