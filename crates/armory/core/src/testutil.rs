//! Shared fixtures for inline tests: in-memory oracles and catalog builders.

use crate::catalog::{EquipKind, Skill, SkillId, TemplateId, TemplateItem};
use crate::config::ArmoryConfig;
use crate::env::{ArmoryEnv, CatalogOracle, ConfigOracle, Env, SkillOracle};
use crate::tags::TagMap;

pub(crate) fn tags(entries: &[(&str, &str)]) -> TagMap {
    entries.iter().map(|(key, value)| (*key, *value)).collect()
}

pub(crate) fn template(
    id: u32,
    kind: EquipKind,
    name: &str,
    tag_entries: &[(&str, &str)],
) -> TemplateItem {
    TemplateItem::new(TemplateId(id), kind, name, tags(tag_entries))
}

pub(crate) fn skill(id: u32, name: &str) -> Skill {
    Skill::new(SkillId(id), name)
}

pub(crate) struct FixtureCatalog {
    templates: Vec<TemplateItem>,
}

impl CatalogOracle for FixtureCatalog {
    fn template(&self, id: TemplateId) -> Option<TemplateItem> {
        self.templates.iter().find(|template| template.id == id).cloned()
    }

    fn templates(&self) -> Vec<TemplateItem> {
        self.templates.clone()
    }
}

pub(crate) struct FixtureSkills {
    skills: Vec<Skill>,
}

impl SkillOracle for FixtureSkills {
    fn skill(&self, id: SkillId) -> Option<Skill> {
        self.skills.iter().find(|skill| skill.id == id).cloned()
    }

    fn skills(&self) -> Vec<Skill> {
        self.skills.clone()
    }
}

pub(crate) struct FixtureConfig {
    config: ArmoryConfig,
}

impl ConfigOracle for FixtureConfig {
    fn config(&self) -> ArmoryConfig {
        self.config.clone()
    }
}

/// Builder-style bundle of the three oracles used across the test suite.
pub(crate) struct TestWorld {
    catalog: FixtureCatalog,
    skills: FixtureSkills,
    config: FixtureConfig,
}

impl TestWorld {
    pub(crate) fn new() -> Self {
        Self {
            catalog: FixtureCatalog {
                templates: Vec::new(),
            },
            skills: FixtureSkills { skills: Vec::new() },
            config: FixtureConfig {
                config: ArmoryConfig::new(),
            },
        }
    }

    pub(crate) fn with_template(mut self, template: TemplateItem) -> Self {
        self.catalog.templates.push(template);
        self
    }

    pub(crate) fn with_skill(mut self, skill: Skill) -> Self {
        self.skills.skills.push(skill);
        self
    }

    pub(crate) fn with_config(mut self, config: ArmoryConfig) -> Self {
        self.config.config = config;
        self
    }

    pub(crate) fn env(&self) -> ArmoryEnv<'_> {
        Env::with_all(&self.catalog, &self.skills, &self.config).into_armory_env()
    }
}
