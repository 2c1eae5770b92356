//! Equipment catalog loader.

use std::path::Path;

use armory_core::TemplateItem;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Equipment catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipCatalog {
    pub templates: Vec<TemplateItem>,
}

/// Loader for equipment catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load an equipment catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing an EquipCatalog
    ///
    /// # Returns
    ///
    /// Returns a Vec of TemplateItems.
    pub fn load(path: &Path) -> LoadResult<Vec<TemplateItem>> {
        let content = read_file(path)?;
        let catalog: EquipCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse equipment catalog RON: {}", e))?;

        Ok(catalog.templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use armory_core::{EquipKind, TemplateId, tags};

    const CATALOG_RON: &str = r#"
(
    templates: [
        (
            id: 1,
            kind: Weapon,
            name: "Iron Sword",
            tags: {
                "unique": "",
                "Durability": "10",
                "attack": "5",
            },
        ),
        (
            id: 4,
            kind: Armor,
            name: "Traveler Cloak",
            tags: {
                "defense": "1",
            },
        ),
    ],
)
"#;

    #[test]
    fn loads_templates_and_normalizes_tag_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CATALOG_RON.as_bytes()).unwrap();

        let templates = CatalogLoader::load(file.path()).unwrap();
        assert_eq!(templates.len(), 2);

        let sword = &templates[0];
        assert_eq!(sword.id, TemplateId(1));
        assert_eq!(sword.kind, EquipKind::Weapon);
        assert!(sword.is_individuated());
        // Mixed-case keys in the file are readable through the canonical names.
        assert_eq!(sword.tags.get(tags::DURABILITY), Some("10"));

        assert!(!templates[1].is_individuated());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = CatalogLoader::load(Path::new("/nonexistent/catalog.ron")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    #[test]
    fn malformed_ron_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"(templates: [oops").unwrap();

        let err = CatalogLoader::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse equipment catalog RON"));
    }
}
