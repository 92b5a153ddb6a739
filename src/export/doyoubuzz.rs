//! DoYouBuzz profile exporter
//!
//! Rebuilds a DoYouBuzz profile from a [`Showcase`].
//!
//! The exporter starts from a base object and overwrites what the showcase
//! edits. The base is, in order of preference:
//! 1. the `_dyb_metadata` block embedded in the showcase
//! 2. a template profile (usually the `.original.json` written at import)
//! 3. a minimal empty profile
//!
//! Skills are never rebuilt from the showcase: they come from the base.
//!
//! Certificates and languages that carry a `_dyb_full` copy are exported from
//! that copy. For certificates only the date is taken from the showcase; for
//! languages nothing is. Name, issuer and proficiency edits on those entries
//! are therefore not exported.

use super::ExportError;
use crate::import::doyoubuzz::{ISSUER_SEPARATOR, LANGUAGE_NAMES};
use crate::models::date::{parse_range, render_range};
use crate::models::ids::{self, SubEntityKind};
use crate::models::{Certification, Entry, Experience, Language, Showcase, SkillItem};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value, json};
use std::path::Path;
use tracing::{debug, info, warn};

/// Level given to language skills created in the showcase without one.
pub const DEFAULT_LANGUAGE_LEVEL: i64 = 95;

/// Culture given to language skills that cannot be mapped to one.
pub const DEFAULT_CULTURE: &str = "en";

/// `"Fluent (90%)"` -> ("Fluent", 90)
static RE_PROFICIENCY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s*\(\s*(\d+)\s*%\s*\)\s*$").expect("Invalid regex"));

/// Exporter producing DoYouBuzz profile JSON
pub struct DoYouBuzzExporter {
    pretty: bool,
}

impl Default for DoYouBuzzExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DoYouBuzzExporter {
    /// Create a new exporter writing indented JSON
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Choose between indented and compact JSON output
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Export a showcase to a DoYouBuzz profile
    ///
    /// # Arguments
    ///
    /// * `showcase` - The showcase to export
    /// * `template` - Base profile used when the showcase has no `_dyb_metadata`
    ///
    /// # Example
    ///
    /// ```rust
    /// use cv_showcase::export::DoYouBuzzExporter;
    /// use cv_showcase::models::Showcase;
    ///
    /// let showcase = Showcase::from_yaml("personal_info:\n  name: Ada Lovelace\n").unwrap();
    /// let profile = DoYouBuzzExporter::new().export(&showcase, None).unwrap();
    /// assert_eq!(profile["owner"]["lastname"], "Lovelace");
    /// ```
    pub fn export(
        &self,
        showcase: &Showcase,
        template: Option<&Value>,
    ) -> Result<Value, ExportError> {
        let mut profile = base_profile(showcase, template)?;
        if !showcase.skills.is_empty() {
            let labels: Vec<String> = showcase
                .skills
                .iter()
                .flat_map(|category| category.items.iter().map(SkillItem::label))
                .collect();
            debug!("Skills are kept from the base profile, not exported: {:?}", labels);
        }

        let info = &showcase.personal_info;
        let (firstname, lastname) = info.split_name();
        let owner = object_entry(&mut profile, "owner");
        owner.insert("firstname".to_string(), json!(firstname));
        owner.insert("lastname".to_string(), json!(lastname));
        owner.insert("login".to_string(), json!(info.email));
        owner.insert("url".to_string(), json!(info.website));
        object_entry(&mut profile, "title").insert("value".to_string(), json!(info.title));
        object_entry(object_entry(&mut profile, "contacts"), "address")
            .insert("country".to_string(), json!(info.location));
        object_entry(&mut profile, "presentation")
            .insert("text".to_string(), json!(showcase.summary));

        let experiences = showcase
            .experience
            .iter()
            .enumerate()
            .map(|(idx, exp)| export_experience(idx, exp))
            .collect();
        profile.insert("experiences".to_string(), Value::Array(experiences));

        let certificates = showcase
            .certifications
            .iter()
            .enumerate()
            .map(|(idx, cert)| export_certificate(idx, cert))
            .collect();
        profile.insert("certificates".to_string(), Value::Array(certificates));

        let elements = showcase
            .languages
            .iter()
            .enumerate()
            .map(|(idx, lang)| export_language(idx, lang))
            .collect();
        object_entry(&mut profile, "languageSkills")
            .insert("elements".to_string(), Value::Array(elements));

        Ok(Value::Object(profile))
    }

    /// Serialize an exported profile
    pub fn to_json(&self, profile: &Value) -> Result<String, ExportError> {
        let result = if self.pretty {
            serde_json::to_string_pretty(profile)
        } else {
            serde_json::to_string(profile)
        };
        result.map_err(|e| {
            ExportError::SerializationError(format!("Failed to serialize profile: {}", e))
        })
    }

    /// Export a showcase YAML file to a profile JSON file
    ///
    /// A template path that does not exist is ignored, as when the showcase
    /// was written by hand and never imported.
    pub fn export_file(
        &self,
        input: &Path,
        output: &Path,
        template: Option<&Path>,
    ) -> Result<(), ExportError> {
        let content = std::fs::read_to_string(input).map_err(|e| {
            ExportError::IoError(format!("Failed to read {}: {}", input.display(), e))
        })?;
        let showcase = Showcase::from_yaml(&content).map_err(|e| {
            ExportError::ParseError(format!("Failed to parse showcase {}: {}", input.display(), e))
        })?;

        let template = match template {
            Some(path) if path.exists() => Some(load_template(path)?),
            Some(path) => {
                warn!("Template {} not found, ignoring", path.display());
                None
            }
            None => None,
        };

        let profile = self.export(&showcase, template.as_ref())?;
        let json = self.to_json(&profile)?;

        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                ExportError::IoError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(output, json).map_err(|e| {
            ExportError::IoError(format!("Failed to write {}: {}", output.display(), e))
        })?;

        info!("Converted {} to {}", input.display(), output.display());
        Ok(())
    }
}

fn load_template(path: &Path) -> Result<Value, ExportError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ExportError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&content).map_err(|e| {
        ExportError::ParseError(format!("Failed to parse template {}: {}", path.display(), e))
    })
}

fn base_profile(
    showcase: &Showcase,
    template: Option<&Value>,
) -> Result<Map<String, Value>, ExportError> {
    if let Some(metadata) = &showcase.metadata {
        debug!("Exporting from embedded metadata");
        return Ok(metadata.base_profile());
    }
    if let Some(template) = template {
        debug!("Exporting from template");
        return template
            .as_object()
            .cloned()
            .ok_or_else(|| ExportError::ExportError("Template must be a JSON object".to_string()));
    }
    debug!("Exporting from an empty profile");
    Ok(minimal_profile())
}

fn minimal_profile() -> Map<String, Value> {
    let mut profile = Map::new();
    profile.insert("experiences".to_string(), json!([]));
    profile.insert("skills".to_string(), json!([]));
    profile.insert("certificates".to_string(), json!([]));
    profile.insert("languageSkills".to_string(), json!({"elements": []}));
    profile.insert("presentation".to_string(), json!({"text": ""}));
    profile.insert("title".to_string(), json!({"value": ""}));
    profile.insert("owner".to_string(), json!({}));
    profile.insert("contacts".to_string(), json!({"address": {}}));
    profile
}

/// Object stored under `key`, created (or replacing a non-object) if needed.
fn object_entry<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let slot = map
        .entry(key)
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(object) => object,
        _ => unreachable!("slot replaced with an object above"),
    }
}

fn export_experience(index: usize, exp: &Experience) -> Value {
    let mut obj = Map::new();
    obj.insert(
        "$views".to_string(),
        exp.extra.get("$views").cloned().unwrap_or_else(|| json!([])),
    );
    obj.insert("range".to_string(), export_range(exp));
    obj.insert(
        "id".to_string(),
        json!(exp.id.unwrap_or_else(|| ids::experience_id(index))),
    );
    obj.insert("company".to_string(), json!(exp.company));
    obj.insert("city".to_string(), json!(exp.location));
    obj.insert(
        "home".to_string(),
        exp.extra.get("home").cloned().unwrap_or(Value::Bool(true)),
    );
    obj.insert("sort".to_string(), json!(exp.sort.unwrap_or(index as i64)));
    obj.insert("title".to_string(), json!(exp.title));
    obj.insert(
        "slug".to_string(),
        exp.extra
            .get("slug")
            .cloned()
            .unwrap_or_else(|| json!(slugify(&exp.company))),
    );
    for kind in [
        SubEntityKind::Mission,
        SubEntityKind::Result,
        SubEntityKind::Objective,
    ] {
        obj.insert(
            kind.platform_key().to_string(),
            Value::Array(export_entries(index, kind, exp.entries(kind))),
        );
    }
    obj.insert("contexts".to_string(), export_context(index, exp));
    obj.insert(
        "environments".to_string(),
        Value::Array(export_entries(
            index,
            SubEntityKind::Environment,
            &exp.environments,
        )),
    );

    for (key, value) in &exp.extra {
        if !obj.contains_key(key) {
            obj.insert(key.clone(), value.clone());
        }
    }
    Value::Object(obj)
}

/// The preserved range when the dates were not edited, otherwise one parsed
/// from the showcase dates.
fn export_range(exp: &Experience) -> Value {
    if let Some(range) = &exp.range {
        let (start, end) = render_range(Some(range));
        if start == exp.start_date && end == exp.end_date {
            return range.clone();
        }
        debug!("Dates of '{}' were edited, rebuilding range", exp.title);
    }
    parse_range(&exp.start_date, &exp.end_date)
}

fn export_entries(experience_index: usize, kind: SubEntityKind, entries: &[Entry]) -> Vec<Value> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(idx, entry)| {
            let description = entry.description();
            if kind.drops_blank() && description.trim().is_empty() {
                return None;
            }
            Some(sub_entity(
                entry
                    .id()
                    .unwrap_or_else(|| ids::sub_entity_id(experience_index, kind, idx)),
                entry.sort().unwrap_or(idx as i64),
                description,
                kind,
            ))
        })
        .collect()
}

fn export_context(experience_index: usize, exp: &Experience) -> Value {
    if exp.context.is_empty() {
        return json!([]);
    }
    let id = exp
        .context_id
        .unwrap_or_else(|| ids::sub_entity_id(experience_index, SubEntityKind::Context, 0));
    let sort = exp.context_sort.unwrap_or(0);
    json!([sub_entity(id, sort, &exp.context, SubEntityKind::Context)])
}

fn sub_entity(id: i64, sort: i64, description: &str, kind: SubEntityKind) -> Value {
    json!({
        "toDel": false,
        "id": id,
        "sort": sort,
        "description": description,
        "type": kind.type_tag(),
    })
}

fn export_certificate(index: usize, cert: &Certification) -> Value {
    if let Some(Value::Object(full)) = &cert.full {
        let mut full = full.clone();
        full.insert("obtainedAt".to_string(), json!(cert.date));
        return Value::Object(full);
    }

    let mut name = cert.name.clone();
    if !cert.issuer.is_empty() && !name.contains(&cert.issuer) {
        name = format!("{}{}{}", name, ISSUER_SEPARATOR, cert.issuer);
    }
    json!({
        "id": cert.id.unwrap_or_else(|| ids::certificate_id(index)),
        "name": name,
        "obtainedAt": cert.date,
        "sort": cert.sort.unwrap_or(index as i64),
    })
}

fn export_language(index: usize, lang: &Language) -> Value {
    if let Some(full) = &lang.full {
        return full.clone();
    }

    let (details, level) = parse_proficiency(&lang.proficiency);
    json!({
        "id": lang.id.unwrap_or_else(|| ids::language_id(index)),
        "culture": culture_for(lang),
        "level": level,
        "details": details,
    })
}

fn culture_for(lang: &Language) -> String {
    if let Some(culture) = &lang.culture {
        return culture.clone();
    }
    let name = lang.language.trim();
    LANGUAGE_NAMES
        .iter()
        .find(|(code, display)| {
            display.eq_ignore_ascii_case(name) || code.eq_ignore_ascii_case(name)
        })
        .map(|(code, _)| code.to_string())
        .unwrap_or_else(|| DEFAULT_CULTURE.to_string())
}

/// Split `"{details} ({level}%)"`. Text without a level keeps the default level.
fn parse_proficiency(proficiency: &str) -> (String, i64) {
    if let Some(caps) = RE_PROFICIENCY.captures(proficiency)
        && let Ok(level) = caps[2].parse()
    {
        return (caps[1].trim().to_string(), level);
    }
    (proficiency.trim().to_string(), DEFAULT_LANGUAGE_LEVEL)
}

fn slugify(company: &str) -> String {
    company.to_lowercase().replace(' ', "-")
}
