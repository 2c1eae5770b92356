//! Minimal [`armory_core::CatalogOracle`] backed by an in-memory map.
use armory_core::{CatalogOracle, TemplateId, TemplateItem};
use std::collections::HashMap;

/// CatalogOracle implementation with static equipment templates
pub struct CatalogOracleImpl {
    templates: HashMap<TemplateId, TemplateItem>,
}

impl CatalogOracleImpl {
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    /// Add an equipment template
    pub fn add_template(&mut self, template: TemplateItem) {
        self.templates.insert(template.id, template);
    }

    /// Build an oracle from loader output
    pub fn from_templates(templates: Vec<TemplateItem>) -> Self {
        let mut oracle = Self::new();
        for template in templates {
            oracle.add_template(template);
        }
        oracle
    }
}

impl Default for CatalogOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogOracle for CatalogOracleImpl {
    fn template(&self, id: TemplateId) -> Option<TemplateItem> {
        self.templates.get(&id).cloned()
    }

    fn templates(&self) -> Vec<TemplateItem> {
        self.templates.values().cloned().collect()
    }
}
