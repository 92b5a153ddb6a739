//! Round-trip metadata side-channel
//!
//! Everything in a platform profile that the showcase does not let you edit is
//! kept here verbatim, so that an export reproduces it unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level profile keys rebuilt from the showcase on every export.
///
/// Skills are not rebuilt but are kept separately in `skills_full`.
pub const REBUILT_KEYS: [&str; 3] = ["experiences", "certificates", "skills"];

/// Preserved platform attributes, stored under `_dyb_metadata` in the showcase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileMetadata {
    /// The original skills tree. Skills are read-only after import.
    #[serde(default)]
    pub skills_full: Vec<Value>,
    /// Every other top-level attribute (owner, contacts, completion, tags,
    /// educations, languageSkills, ...).
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl ProfileMetadata {
    /// Capture the non-rebuilt parts of a platform profile.
    pub fn capture(profile: &Map<String, Value>) -> Self {
        let skills_full = profile
            .get("skills")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        let attributes = profile
            .iter()
            .filter(|(key, _)| !REBUILT_KEYS.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Self {
            skills_full,
            attributes,
        }
    }

    /// Platform object to start an export from.
    pub fn base_profile(&self) -> Map<String, Value> {
        let mut profile = self.attributes.clone();
        profile.insert("skills".to_string(), Value::Array(self.skills_full.clone()));
        profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_capture_splits_skills_from_attributes() {
        let profile = json!({
            "completion": 87,
            "skills": [{"description": "Cloud", "children": []}],
            "experiences": [{"id": 1}],
            "certificates": [],
            "tags": ["data"]
        });
        let metadata = ProfileMetadata::capture(profile.as_object().unwrap());

        assert_eq!(metadata.skills_full, vec![json!({"description": "Cloud", "children": []})]);
        assert_eq!(metadata.attributes.get("completion"), Some(&json!(87)));
        assert_eq!(metadata.attributes.get("tags"), Some(&json!(["data"])));
        assert!(!metadata.attributes.contains_key("experiences"));
        assert!(!metadata.attributes.contains_key("skills"));
    }

    #[test]
    fn test_base_profile_restores_skills() {
        let profile = json!({"skills": [{"description": "Data"}], "visible": true});
        let metadata = ProfileMetadata::capture(profile.as_object().unwrap());
        let base = metadata.base_profile();
        assert_eq!(base.get("skills"), Some(&json!([{"description": "Data"}])));
        assert_eq!(base.get("visible"), Some(&json!(true)));
    }

    #[test]
    fn test_survives_yaml() {
        let profile = json!({"skills": [{"description": "Ops", "children": [{"description": "Linux", "level": 80}]}], "owner": {"firstname": "Ada"}});
        let metadata = ProfileMetadata::capture(profile.as_object().unwrap());
        let yaml = serde_yaml::to_string(&metadata).unwrap();
        let parsed: ProfileMetadata = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, metadata);
    }
}
