use crate::catalog::{TemplateId, TemplateItem};
use crate::tags::normalize_name;

/// Provides access to the host's immutable equipment catalog.
///
/// Weapons and armor share one namespace partitioned by
/// [`crate::catalog::EquipKind`]; template ids are unique across both.
pub trait CatalogOracle: Send + Sync {
    fn template(&self, id: TemplateId) -> Option<TemplateItem>;

    /// Returns all templates available in this oracle.
    /// Used for name resolution and content audits.
    fn templates(&self) -> Vec<TemplateItem>;

    /// Looks a template up by display name.
    ///
    /// Matching is case-insensitive with all whitespace stripped, so
    /// `"Iron  Sword"` and `"ironsword"` find the same entry. First match
    /// in template order wins.
    fn find_by_name(&self, name: &str) -> Option<TemplateItem> {
        let wanted = normalize_name(name);
        self.templates()
            .into_iter()
            .find(|template| normalize_name(&template.name) == wanted)
    }
}
