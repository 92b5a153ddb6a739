//! DoYouBuzz profile importer
//!
//! Converts a DoYouBuzz profile export (JSON) into an editable [`Showcase`].
//!
//! The conversion is lossy on the editable side (one context per experience,
//! skill levels folded into labels) but every platform attribute the showcase
//! cannot express is kept in `_dyb_*` keys so that the exporter can rebuild
//! the profile.
//!
//! # Required structure
//!
//! `owner`, `title`, `presentation` and `contacts.address` must be objects.
//! Everything else is optional and defaults to empty.

use super::{ImportError, ImportOutcome};
use crate::models::date::render_range;
use crate::models::{
    Certification, Entry, Experience, Language, PersonalInfo, ProfileMetadata, Showcase,
    SkillCategory, SkillItem, SubEntityKind, TrackedEntry,
};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Separator between certificate name and issuer in the platform `name` field.
pub const ISSUER_SEPARATOR: &str = " - ";

/// Display names for language cultures. Unknown codes are shown uppercased.
pub const LANGUAGE_NAMES: [(&str, &str); 4] = [
    ("en", "Anglais"),
    ("fr", "Français"),
    ("es", "Espagnol"),
    ("de", "Allemand"),
];

/// Experience attributes mapped onto showcase fields. The rest is kept in `_dyb_extra`.
const EXPERIENCE_FIELDS: [&str; 11] = [
    "id",
    "sort",
    "title",
    "company",
    "city",
    "range",
    "missions",
    "results",
    "objectives",
    "contexts",
    "environments",
];

/// Importer for DoYouBuzz profile exports
pub struct DoYouBuzzImporter;

impl Default for DoYouBuzzImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DoYouBuzzImporter {
    /// Create a new DoYouBuzz importer instance
    pub fn new() -> Self {
        Self
    }

    /// Import a profile from JSON content
    ///
    /// # Arguments
    ///
    /// * `json_content` - DoYouBuzz profile export as a string
    ///
    /// # Returns
    ///
    /// The converted showcase and the parsed input as an export template
    ///
    /// # Example
    ///
    /// ```rust
    /// use cv_showcase::import::DoYouBuzzImporter;
    ///
    /// let json = r#"{
    ///   "owner": {"firstname": "Ada", "lastname": "Lovelace", "login": "ada@example.com", "url": ""},
    ///   "title": {"value": "Analyst"},
    ///   "presentation": {"text": "Engines."},
    ///   "contacts": {"address": {"country": "UK"}}
    /// }"#;
    /// let outcome = DoYouBuzzImporter::new().import(json).unwrap();
    /// assert_eq!(outcome.showcase.personal_info.name, "Ada Lovelace");
    /// ```
    pub fn import(&self, json_content: &str) -> Result<ImportOutcome, ImportError> {
        let profile: Value = serde_json::from_str(json_content)
            .map_err(|e| ImportError::ParseError(format!("Failed to parse profile JSON: {}", e)))?;
        let showcase = self.convert(&profile)?;
        Ok(ImportOutcome {
            showcase,
            template: profile,
        })
    }

    /// Convert an already parsed profile
    pub fn convert(&self, profile: &Value) -> Result<Showcase, ImportError> {
        self.convert_profile(profile)
            .map_err(|e| ImportError::ValidationError(format!("{:#}", e)))
    }

    /// Import a profile file and write the showcase YAML
    ///
    /// The input is also copied, re-indented, to `<output stem>.original.json`
    /// for use as an export template. The showcase is written first; nothing
    /// is left behind if the input does not convert or either write fails.
    ///
    /// # Returns
    ///
    /// The path of the written template
    pub fn import_file(&self, input: &Path, output: &Path) -> Result<PathBuf, ImportError> {
        let content = std::fs::read_to_string(input).map_err(|e| {
            ImportError::IoError(format!("Failed to read {}: {}", input.display(), e))
        })?;
        let outcome = self.import(&content)?;

        let yaml = outcome.showcase.to_yaml().map_err(|e| {
            ImportError::SerializationError(format!("Failed to serialize showcase: {}", e))
        })?;
        let template = serde_json::to_string_pretty(&outcome.template).map_err(|e| {
            ImportError::SerializationError(format!("Failed to serialize template: {}", e))
        })?;

        let template_path = template_path_for(output);
        write_file(output, &yaml)?;
        if let Err(e) = write_file(&template_path, &template) {
            // never leave a showcase without its template
            let _ = std::fs::remove_file(output);
            return Err(e);
        }

        info!(
            "Converted {} to {} (template {})",
            input.display(),
            output.display(),
            template_path.display()
        );
        Ok(template_path)
    }

    fn convert_profile(&self, profile: &Value) -> Result<Showcase> {
        let root = profile
            .as_object()
            .context("Profile must be a JSON object")?;

        let owner = required_object(root, "owner", "owner")?;
        let title = required_object(root, "title", "title")?;
        let presentation = required_object(root, "presentation", "presentation")?;
        let contacts = required_object(root, "contacts", "contacts")?;
        let address = required_object(contacts, "address", "contacts.address")?;

        let personal_info = PersonalInfo {
            name: format!(
                "{} {}",
                text(owner.get("firstname")),
                text(owner.get("lastname"))
            ),
            title: text(title.get("value")),
            email: text(owner.get("login")),
            location: text(address.get("country")),
            website: text(owner.get("url")),
            ..Default::default()
        };

        let experience: Vec<Experience> = array(root.get("experiences"))
            .iter()
            .enumerate()
            .map(|(idx, exp)| import_experience(idx, exp))
            .collect();

        let certifications = array(root.get("certificates"))
            .iter()
            .enumerate()
            .map(|(idx, cert)| import_certificate(idx, cert))
            .collect();

        let languages = array(root.get("languageSkills").and_then(|l| l.get("elements")))
            .iter()
            .map(import_language)
            .collect();

        debug!("Imported profile with {} experiences", experience.len());

        Ok(Showcase {
            personal_info,
            summary: text(presentation.get("text")),
            skills: import_skills(array(root.get("skills"))),
            experience,
            certifications,
            languages,
            metadata: Some(ProfileMetadata::capture(root)),
            ..Default::default()
        })
    }
}

/// Path of the template copy written next to a showcase file.
pub fn template_path_for(showcase_path: &Path) -> PathBuf {
    showcase_path.with_extension("original.json")
}

/// Display name of a language culture code (`fr` or `fr_FR`).
pub fn language_name(culture: &str) -> String {
    let code = culture.split('_').next().unwrap_or_default();
    LANGUAGE_NAMES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| code.to_uppercase())
}

fn import_skills(categories: &[Value]) -> Vec<SkillCategory> {
    categories
        .iter()
        .filter_map(|category| {
            let name = text(category.get("description"));
            let items: Vec<SkillItem> = array(category.get("children"))
                .iter()
                .map(|child| {
                    let mut label = text(child.get("description"));
                    if let Some(level) = level_text(child.get("level")) {
                        label.push_str(&format!(" ({}%)", level));
                    }
                    SkillItem::Plain(label)
                })
                .collect();

            if items.is_empty() {
                debug!("Skipping empty skill category '{}'", name);
                None
            } else {
                Some(SkillCategory {
                    category: name,
                    items,
                })
            }
        })
        .collect()
}

fn import_experience(index: usize, exp: &Value) -> Experience {
    let range = exp.get("range").filter(|r| r.is_object());
    let (start_date, end_date) = render_range(range);

    // Only the first context is editable.
    let contexts = array(exp.get("contexts"));
    let first_context = contexts.first();
    if contexts.len() > 1 {
        debug!(
            "Dropping {} extra contexts of experience '{}'",
            contexts.len() - 1,
            text(exp.get("title"))
        );
    }

    let extra = exp
        .as_object()
        .map(|obj| {
            obj.iter()
                .filter(|(key, _)| !EXPERIENCE_FIELDS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default();

    Experience {
        title: text(exp.get("title")),
        company: text(exp.get("company")),
        location: text(exp.get("city")),
        start_date,
        end_date,
        context: first_context
            .map(|c| text(c.get("description")))
            .unwrap_or_default(),
        missions: import_entries(exp, SubEntityKind::Mission),
        results: import_entries(exp, SubEntityKind::Result),
        objectives: import_entries(exp, SubEntityKind::Objective),
        environments: import_entries(exp, SubEntityKind::Environment),
        id: integer(exp.get("id")),
        context_id: first_context.and_then(|c| integer(c.get("id"))),
        context_sort: first_context.and_then(|c| integer(c.get("sort"))),
        sort: Some(integer(exp.get("sort")).unwrap_or(index as i64)),
        range: range.cloned(),
        extra,
    }
}

fn import_entries(exp: &Value, kind: SubEntityKind) -> Vec<Entry> {
    array(exp.get(kind.platform_key()))
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            Entry::Tracked(TrackedEntry {
                description: text(item.get("description")),
                id: integer(item.get("id")),
                sort: Some(integer(item.get("sort")).unwrap_or(idx as i64)),
            })
        })
        .collect()
}

fn import_certificate(index: usize, cert: &Value) -> Certification {
    let full_name = text(cert.get("name"));
    let mut parts = full_name.split(ISSUER_SEPARATOR);
    let name = parts.next().unwrap_or_default().to_string();
    let issuer = parts.next().unwrap_or_default().to_string();

    Certification {
        name,
        issuer,
        date: text(cert.get("obtainedAt")),
        credential_url: String::new(),
        id: integer(cert.get("id")),
        sort: Some(integer(cert.get("sort")).unwrap_or(index as i64)),
        full: Some(cert.clone()),
    }
}

fn import_language(lang: &Value) -> Language {
    let culture = lang.get("culture").and_then(Value::as_str);
    Language {
        language: language_name(culture.unwrap_or_default()),
        proficiency: proficiency(&text(lang.get("details")), &text(lang.get("level"))),
        id: integer(lang.get("id")),
        culture: culture.map(String::from),
        full: Some(lang.clone()),
    }
}

/// `"{details} ({level}%)"`, leaving out whichever part is empty.
fn proficiency(details: &str, level: &str) -> String {
    let details = details.trim();
    let level = level.trim();
    match (details.is_empty(), level.is_empty()) {
        (false, false) => format!("{} ({}%)", details, level),
        (true, false) => format!("({}%)", level),
        (false, true) => details.to_string(),
        (true, true) => String::new(),
    }
}

fn required_object<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a Map<String, Value>> {
    map.get(key)
        .and_then(Value::as_object)
        .with_context(|| format!("Missing or invalid '{}' object", path))
}

fn array(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Scalar as text. Missing, null and structured values read as empty.
fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn integer(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Skill level worth displaying: a nonzero number or a non-empty string.
fn level_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::Number(n)) if n.as_f64().is_some_and(|l| l != 0.0) => Some(n.to_string()),
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), ImportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            ImportError::IoError(format!("Failed to create {}: {}", parent.display(), e))
        })?;
    }
    std::fs::write(path, content)
        .map_err(|e| ImportError::IoError(format!("Failed to write {}: {}", path.display(), e)))
}
