//! Showcase model
//!
//! The simplified, human-editable résumé document. It is stored as YAML and
//! edited by hand or by the editor UI. Keys starting with `_dyb_` carry
//! DoYouBuzz round-trip data and are not meant to be edited.

use super::ids::{self, SubEntityKind};
use super::metadata::ProfileMetadata;
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Deserialize `null` as the type's default. Hand-edited YAML often leaves
/// fields as `~` or with no value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A YAML scalar read as text.
#[derive(Deserialize)]
#[serde(untagged)]
enum Text {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<Text> for String {
    fn from(text: Text) -> Self {
        match text {
            Text::Str(text) => text,
            Text::Int(n) => n.to_string(),
            Text::Float(n) => n.to_string(),
            Text::Bool(b) => b.to_string(),
        }
    }
}

/// Deserialize a free-text field, accepting YAML numbers and booleans as text.
/// An unquoted `start_date: 2024` is a number to YAML but a date here.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Text>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

/// Like [`lenient_text`] but rejecting null, so that an untagged enum can
/// fall through to its structured variant.
fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Text::deserialize(deserializer)?.into())
}

/// Deserialize a platform identifier or sort index, given as a number or as
/// a numeric string (`_dyb_id: '123'`). Null and empty strings read as absent.
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Int(i64),
        Str(String),
    }

    match Option::<Id>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Id::Int(n)) => Ok(Some(n)),
        Some(Id::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(Id::Str(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid identifier: {:?}", s))),
    }
}

/// A complete showcase document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Showcase {
    #[serde(default, deserialize_with = "null_as_default")]
    pub personal_info: PersonalInfo,
    #[serde(default, deserialize_with = "lenient_text")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<SkillCategory>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<Experience>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certifications: Vec<Certification>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<Language>,
    /// Platform attributes preserved at import time
    #[serde(
        rename = "_dyb_metadata",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<ProfileMetadata>,
    /// Set when the showcase was created as a variant of another one
    #[serde(
        rename = "_variant_info",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub variant_info: Option<VariantInfo>,
    /// Sections this crate does not interpret (`education`, `projects`, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Showcase {
    /// Parse a showcase from YAML
    pub fn from_yaml(yaml_content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml_content)
    }

    /// Export to YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Rewrite every bare-string sub-entity as a tracked entry.
    ///
    /// Identifiers and sorts are the ones the exporter would synthesize, so
    /// canonicalizing before or after an export gives the same platform ids.
    /// Entries that already carry an identifier are left untouched.
    pub fn canonicalize(&mut self) {
        for (exp_idx, experience) in self.experience.iter_mut().enumerate() {
            for kind in SubEntityKind::LISTS {
                for (entry_idx, entry) in experience.entries_mut(kind).iter_mut().enumerate() {
                    entry.track(
                        ids::sub_entity_id(exp_idx, kind, entry_idx),
                        entry_idx as i64,
                    );
                }
            }
        }
    }
}

/// Contact block at the top of the showcase. All free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalInfo {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub linkedin: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub github: String,
}

impl PersonalInfo {
    /// Split `name` on the first space into (firstname, lastname).
    pub fn split_name(&self) -> (String, String) {
        match self.name.split_once(' ') {
            Some((first, last)) => (first.to_string(), last.to_string()),
            None => (self.name.clone(), String::new()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<SkillItem>,
}

/// A skill, written either as `"Rust (90%)"` or as `{name: Rust, level: 90}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SkillItem {
    #[serde(deserialize_with = "scalar_text")]
    Plain(String),
    Rated {
        #[serde(deserialize_with = "lenient_text")]
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<u32>,
    },
}

impl SkillItem {
    /// Display label, with the level appended as a percentage when set.
    pub fn label(&self) -> String {
        match self {
            SkillItem::Plain(text) => text.clone(),
            SkillItem::Rated {
                name,
                level: Some(level),
            } if *level > 0 => format!("{} ({}%)", name, level),
            SkillItem::Rated { name, .. } => name.clone(),
        }
    }
}

/// A mission, result, objective or environment line.
///
/// Entries typed by hand are plain strings. Entries coming from the platform,
/// or canonicalized, carry the platform identifier and sort index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    #[serde(deserialize_with = "scalar_text")]
    Plain(String),
    Tracked(TrackedEntry),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackedEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(
        rename = "_dyb_id",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(
        rename = "_dyb_sort",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub sort: Option<i64>,
}

impl Entry {
    pub fn description(&self) -> &str {
        match self {
            Entry::Plain(text) => text,
            Entry::Tracked(tracked) => &tracked.description,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            Entry::Plain(_) => None,
            Entry::Tracked(tracked) => tracked.id,
        }
    }

    pub fn sort(&self) -> Option<i64> {
        match self {
            Entry::Plain(_) => None,
            Entry::Tracked(tracked) => tracked.sort,
        }
    }

    /// Turn into a tracked entry, filling only what is missing.
    pub fn track(&mut self, id: i64, sort: i64) {
        let tracked = match self {
            Entry::Plain(text) => TrackedEntry {
                description: std::mem::take(text),
                id: Some(id),
                sort: Some(sort),
            },
            Entry::Tracked(tracked) => TrackedEntry {
                description: std::mem::take(&mut tracked.description),
                id: tracked.id.or(Some(id)),
                sort: tracked.sort.or(Some(sort)),
            },
        };
        *self = Entry::Tracked(tracked);
    }
}

impl From<&str> for Entry {
    fn from(text: &str) -> Self {
        Entry::Plain(text.to_string())
    }
}

/// One work experience.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    /// `YYYY-MM` or `YYYY`
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_date: String,
    /// `YYYY-MM` or `YYYY`
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub context: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missions: Vec<Entry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Entry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub objectives: Vec<Entry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub environments: Vec<Entry>,
    #[serde(
        rename = "_dyb_id",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(
        rename = "_dyb_context_id",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub context_id: Option<i64>,
    /// Sort index of that context
    #[serde(
        rename = "_dyb_context_sort",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub context_sort: Option<i64>,
    #[serde(
        rename = "_dyb_sort",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub sort: Option<i64>,
    /// Original platform `range` object
    #[serde(
        rename = "_dyb_range",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub range: Option<Value>,
    /// Remaining platform attributes of the experience (`$views`, `slug`, ...)
    #[serde(rename = "_dyb_extra", default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl Experience {
    /// Entries of one list kind. Context is not a list and yields nothing.
    pub fn entries(&self, kind: SubEntityKind) -> &[Entry] {
        match kind {
            SubEntityKind::Mission => &self.missions,
            SubEntityKind::Result => &self.results,
            SubEntityKind::Objective => &self.objectives,
            SubEntityKind::Environment => &self.environments,
            SubEntityKind::Context => &[],
        }
    }

    pub fn entries_mut(&mut self, kind: SubEntityKind) -> &mut [Entry] {
        match kind {
            SubEntityKind::Mission => &mut self.missions,
            SubEntityKind::Result => &mut self.results,
            SubEntityKind::Objective => &mut self.objectives,
            SubEntityKind::Environment => &mut self.environments,
            SubEntityKind::Context => &mut [],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub issuer: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub credential_url: String,
    #[serde(
        rename = "_dyb_id",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(
        rename = "_dyb_sort",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub sort: Option<i64>,
    /// Original platform certificate
    #[serde(rename = "_dyb_full", default, skip_serializing_if = "Option::is_none")]
    pub full: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Language {
    #[serde(default, deserialize_with = "lenient_text")]
    pub language: String,
    /// `"{details} ({level}%)"`
    #[serde(default, deserialize_with = "lenient_text")]
    pub proficiency: String,
    #[serde(
        rename = "_dyb_id",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(
        rename = "_dyb_culture",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub culture: Option<String>,
    /// Original platform language skill
    #[serde(rename = "_dyb_full", default, skip_serializing_if = "Option::is_none")]
    pub full: Option<Value>,
}

/// Provenance of a showcase variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantInfo {
    #[serde(default)]
    pub created_from: String,
    /// RFC 3339 timestamp
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY_YAML: &str = r#"
personal_info:
  name: Ada Lovelace
  title: Analyst
  email: ada@example.com
  phone: ''
  location: UK
  website: ~
summary: Engines.
skills:
- category: Maths
  items:
  - Analysis (90%)
  - name: Notes
    level: 75
experience:
- title: Translator
  company: Menabrea
  start_date: '1842'
  end_date: 1843-08
  context: ''
  missions:
  - Translate the memoir
  - description: Write note G
    _dyb_id: 123456789
    _dyb_sort: 4
education: []
projects:
- name: Difference engine
"#;

    #[test]
    fn test_parse_legacy_document() {
        let showcase = Showcase::from_yaml(LEGACY_YAML).unwrap();
        assert_eq!(showcase.personal_info.name, "Ada Lovelace");
        assert_eq!(showcase.personal_info.website, "");
        assert_eq!(showcase.personal_info.github, "");
        assert_eq!(showcase.skills[0].items[0].label(), "Analysis (90%)");
        assert_eq!(showcase.skills[0].items[1].label(), "Notes (75%)");

        let missions = &showcase.experience[0].missions;
        assert_eq!(missions[0], Entry::Plain("Translate the memoir".to_string()));
        assert_eq!(missions[1].id(), Some(123456789));
        assert_eq!(missions[1].sort(), Some(4));
        assert_eq!(missions[1].description(), "Write note G");

        assert!(showcase.extra.contains_key("education"));
        assert!(showcase.extra.contains_key("projects"));
        assert!(showcase.metadata.is_none());
    }

    #[test]
    fn test_unknown_sections_survive_yaml() {
        let showcase = Showcase::from_yaml(LEGACY_YAML).unwrap();
        let yaml = showcase.to_yaml().unwrap();
        assert!(yaml.contains("projects:"));
        assert!(yaml.contains("Difference engine"));
        let reparsed = Showcase::from_yaml(&yaml).unwrap();
        assert_eq!(reparsed, showcase);
    }

    #[test]
    fn test_empty_document_defaults() {
        let showcase = Showcase::from_yaml("{}").unwrap();
        assert_eq!(showcase, Showcase::default());
        let nulls = Showcase::from_yaml("personal_info: ~\nsummary: ~\nexperience: ~\n").unwrap();
        assert_eq!(nulls.summary, "");
        assert!(nulls.experience.is_empty());
    }

    #[test]
    fn test_split_name() {
        let info = PersonalInfo {
            name: "Ada Lovelace".to_string(),
            ..Default::default()
        };
        assert_eq!(info.split_name(), ("Ada".to_string(), "Lovelace".to_string()));

        let info = PersonalInfo {
            name: "Prince".to_string(),
            ..Default::default()
        };
        assert_eq!(info.split_name(), ("Prince".to_string(), String::new()));

        let info = PersonalInfo {
            name: "Jean Claude Van Damme".to_string(),
            ..Default::default()
        };
        assert_eq!(
            info.split_name(),
            ("Jean".to_string(), "Claude Van Damme".to_string())
        );
    }

    #[test]
    fn test_canonicalize_tracks_plain_entries() {
        let mut showcase = Showcase::from_yaml(LEGACY_YAML).unwrap();
        showcase.experience[0].results.push(Entry::from("Published"));
        showcase.canonicalize();

        let experience = &showcase.experience[0];
        assert_eq!(experience.missions[0].id(), Some(100_000_000));
        assert_eq!(experience.missions[0].sort(), Some(0));
        // already tracked: untouched
        assert_eq!(experience.missions[1].id(), Some(123456789));
        assert_eq!(experience.missions[1].sort(), Some(4));
        assert_eq!(experience.results[0].id(), Some(100_000_020));
        assert!(matches!(experience.results[0], Entry::Tracked(_)));
    }

    #[test]
    fn test_numeric_list_items_read_as_text() {
        let yaml = r#"
skills:
- category: Numbers
  items:
  - 42
  - true
  - name: 7
    level: 50
experience:
- title: X
  missions:
  - 2024
  - 1.5
"#;
        let showcase = Showcase::from_yaml(yaml).unwrap();
        let labels: Vec<String> = showcase.skills[0]
            .items
            .iter()
            .map(SkillItem::label)
            .collect();
        assert_eq!(labels, vec!["42", "true", "7 (50%)"]);
        let missions = &showcase.experience[0].missions;
        assert_eq!(missions[0], Entry::Plain("2024".to_string()));
        assert_eq!(missions[1], Entry::Plain("1.5".to_string()));
    }

    #[test]
    fn test_string_encoded_ids() {
        let yaml = r#"
experience:
- title: X
  _dyb_id: '19000001'
  _dyb_context_id: ' 55 '
  _dyb_sort: ''
  missions:
  - description: Kept
    _dyb_id: '123'
    _dyb_sort: '4'
certifications:
- name: PMP
  _dyb_id: '301'
languages:
- language: Anglais
  _dyb_id: ~
"#;
        let showcase = Showcase::from_yaml(yaml).unwrap();
        let experience = &showcase.experience[0];
        assert_eq!(experience.id, Some(19_000_001));
        assert_eq!(experience.context_id, Some(55));
        assert_eq!(experience.sort, None);
        assert_eq!(experience.missions[0].id(), Some(123));
        assert_eq!(experience.missions[0].sort(), Some(4));
        assert_eq!(showcase.certifications[0].id, Some(301));
        assert_eq!(showcase.languages[0].id, None);
    }

    #[test]
    fn test_non_numeric_id_rejected() {
        let yaml = "certifications:\n- name: PMP\n  _dyb_id: abc\n";
        let err = Showcase::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("invalid identifier"), "{}", err);
    }

    #[test]
    fn test_canonical_form_serializes_as_triple() {
        let mut entry = Entry::from("Ship it");
        entry.track(42, 1);
        let yaml = serde_yaml::to_string(&entry).unwrap();
        assert!(yaml.contains("description: Ship it"));
        assert!(yaml.contains("_dyb_id: 42"));
        assert!(yaml.contains("_dyb_sort: 1"));
    }
}
