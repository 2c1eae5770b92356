//! Tag vocabulary and parsers.
//!
//! All optional equipment behavior is declared through free-form string tags
//! on catalog templates. This module owns the tag names, the normalized name
//! matching used to resolve skill and template references, and the parsers
//! for the structured tag values (durability numbers and the per-skill loss
//! table). Parsers are lenient: malformed fragments are reported as
//! [`TagIssue`]s and skipped rather than failing the whole item.

use std::collections::BTreeMap;

use crate::catalog::SkillId;
use crate::state::Durability;

/// Marks a template as individuated: acquiring it mints a unique instance.
pub const UNIQUE: &str = "unique";
/// Starting durability. `-1` or `unlimited` means the item never wears.
pub const DURABILITY: &str = "durability";
/// Durability ceiling. Defaults follow the starting durability when absent.
pub const MAX_DURABILITY: &str = "max_durability";
/// Durability lost when the holder uses an action.
pub const USE_LOSS: &str = "use_loss";
/// Durability lost when the holder takes damage.
pub const DAMAGE_LOSS: &str = "damage_loss";
/// Per-skill overrides of the action loss, e.g. `"Fireblast: 3, 12: 2"`.
pub const SKILL_LOSS: &str = "skill_loss";
/// Template that replaces this item when it breaks, by id or by name.
pub const REPLACEMENT: &str = "replacement";
/// Flat attack contribution while equipped.
pub const ATTACK: &str = "attack";
/// Flat defense contribution while equipped.
pub const DEFENSE: &str = "defense";

/// Ordered string tag map attached to templates and copied onto instances.
///
/// Keys are stored trimmed and lowercased so lookups are case-insensitive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagMap {
    entries: BTreeMap<String, String>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) {
        self.entries
            .insert(key.as_ref().trim().to_lowercase(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// True when the tag is present and not explicitly disabled.
    ///
    /// An empty value or `true` counts as set; only a literal `false`
    /// (any case) reads as unset.
    pub fn flag(&self, key: &str) -> bool {
        match self.get(key) {
            Some(value) => !value.trim().eq_ignore_ascii_case("false"),
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for TagMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tags = Self::new();
        for (key, value) in iter {
            tags.insert(key, value);
        }
        tags
    }
}

// Serialized as the bare map. Deserialization goes through `insert` so keys
// read from data files are normalized the same way programmatic ones are.
#[cfg(feature = "serde")]
impl serde::Serialize for TagMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.entries.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TagMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(entries.into_iter().collect())
    }
}

/// Non-fatal problem found while reading tag values.
///
/// Issues never abort an operation: the malformed fragment is skipped and
/// the issue is surfaced on the resulting [`crate::ledger::WearReport`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TagIssue {
    #[error("tag `{tag}` has malformed integer value `{value}`")]
    MalformedInteger { tag: String, value: String },

    #[error("skill loss entry `{segment}` is malformed, expected `skill: amount`")]
    MalformedSkillLossEntry { segment: String },

    #[error("skill loss entry `{segment}` names no known skill")]
    UnknownSkill { segment: String },

    #[error("replacement `{value}` names no known template")]
    UnknownReplacement { value: String },
}

/// Canonical form used for name matching: lowercased, all whitespace removed.
///
/// `"Iron  Sword"` and `"ironsword"` resolve to the same template.
pub fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parses a non-negative integer tag value.
pub fn parse_amount(tag: &str, value: &str) -> Result<u32, TagIssue> {
    value.trim().parse::<u32>().map_err(|_| TagIssue::MalformedInteger {
        tag: tag.to_string(),
        value: value.to_string(),
    })
}

/// Parses a durability tag value.
///
/// `-1` and `unlimited` read as [`Durability::Unlimited`]; any other value
/// must be a non-negative integer.
pub fn parse_durability(tag: &str, value: &str) -> Result<Durability, TagIssue> {
    let trimmed = value.trim();
    if trimmed == "-1" || trimmed.eq_ignore_ascii_case("unlimited") {
        return Ok(Durability::Unlimited);
    }
    parse_amount(tag, trimmed).map(Durability::Finite)
}

/// One skill reference in a `skill_loss` table, by id or by name.
///
/// Names are stored normalized so resolution matches the way the rest of
/// the crate looks items and skills up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkillKey {
    Id(SkillId),
    Name(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillLossEntry {
    pub key: SkillKey,
    pub amount: u32,
}

/// Result of parsing a `skill_loss` tag: every well-formed entry plus the
/// issues for fragments that were skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillLossTable {
    pub entries: Vec<SkillLossEntry>,
    pub issues: Vec<TagIssue>,
}

/// Parses a `skill_loss` value of the form `"Fireblast: 3, 12: 2"`.
///
/// Entries are comma-separated `key: amount` pairs where the key is either
/// a numeric skill id or a skill name. Empty segments are ignored, malformed
/// ones are recorded and skipped.
pub fn parse_skill_loss(raw: &str) -> SkillLossTable {
    let mut table = SkillLossTable::default();
    for segment in raw.split(',') {
        if segment.trim().is_empty() {
            continue;
        }
        let mut parts = segment.splitn(2, ':');
        let (key, amount) = match (parts.next(), parts.next()) {
            (Some(key), Some(amount)) if !key.trim().is_empty() => (key.trim(), amount.trim()),
            _ => {
                table.issues.push(TagIssue::MalformedSkillLossEntry {
                    segment: segment.trim().to_string(),
                });
                continue;
            }
        };
        let amount = match amount.parse::<u32>() {
            Ok(amount) => amount,
            Err(_) => {
                table.issues.push(TagIssue::MalformedSkillLossEntry {
                    segment: segment.trim().to_string(),
                });
                continue;
            }
        };
        let key = match key.parse::<u32>() {
            Ok(id) => SkillKey::Id(SkillId(id)),
            Err(_) => SkillKey::Name(normalize_name(key)),
        };
        table.entries.push(SkillLossEntry { key, amount });
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_reads_presence_and_false() {
        let tags: TagMap = [("unique", ""), ("cursed", "false"), ("blessed", "true")]
            .into_iter()
            .collect();

        assert!(tags.flag(UNIQUE));
        assert!(tags.flag("blessed"));
        assert!(!tags.flag("cursed"));
        assert!(!tags.flag("absent"));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let tags: TagMap = [("Max_Durability", "20")].into_iter().collect();
        assert_eq!(tags.get(MAX_DURABILITY), Some("20"));
    }

    #[test]
    fn normalize_strips_case_and_whitespace() {
        assert_eq!(normalize_name("Iron  Sword"), "ironsword");
        assert_eq!(normalize_name(" FIREBLAST "), "fireblast");
    }

    #[test]
    fn durability_accepts_sentinel_and_word() {
        assert_eq!(parse_durability(DURABILITY, "-1"), Ok(Durability::Unlimited));
        assert_eq!(
            parse_durability(DURABILITY, "Unlimited"),
            Ok(Durability::Unlimited)
        );
        assert_eq!(parse_durability(DURABILITY, "12"), Ok(Durability::Finite(12)));
        assert!(parse_durability(DURABILITY, "soon").is_err());
    }

    #[test]
    fn skill_loss_mixes_ids_and_names() {
        let table = parse_skill_loss("Fireblast: 3, 12: 2");
        assert_eq!(table.issues, vec![]);
        assert_eq!(
            table.entries,
            vec![
                SkillLossEntry {
                    key: SkillKey::Name("fireblast".into()),
                    amount: 3,
                },
                SkillLossEntry {
                    key: SkillKey::Id(SkillId(12)),
                    amount: 2,
                },
            ]
        );
    }

    #[test]
    fn skill_loss_skips_malformed_segments() {
        let table = parse_skill_loss("Cleave: 4, nonsense, : 9, Slam: x, , Bash: 1");
        assert_eq!(table.entries.len(), 2);
        assert_eq!(table.entries[0].amount, 4);
        assert_eq!(table.entries[1].amount, 1);
        assert_eq!(table.issues.len(), 3);
    }

    #[test]
    fn skill_loss_of_empty_string_is_empty() {
        let table = parse_skill_loss("");
        assert!(table.entries.is_empty());
        assert!(table.issues.is_empty());
    }
}
