//! Artifact and program configuration types

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::schema::SchemaNode;

/// One program artifact file.
///
/// String fields default to empty (absent or `null`) and schemas to absent
/// so that the validator, not the JSON parser, reports which field is
/// missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub identifier: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub artifact_type: String,
    #[serde(default)]
    pub data: ArtifactData,
}

/// Program body and its input/output contracts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactData {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub code: String,
    #[serde(default)]
    pub input_schema: Option<SchemaNode>,
    #[serde(default)]
    pub output_schema: Option<SchemaNode>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Configuration for generating the function for one program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramConfiguration {
    /// Mark the function as readonly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readonly: Option<bool>,
    /// Description of the function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The program configuration file.
///
/// Accepts the connector layout `{"$schema": ..., "programs": {...}}`. A
/// document without a `programs` key is read as a flat map of program
/// identifier to configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramConfigs {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Program identifier is the key for each config.
    #[serde(default)]
    pub programs: HashMap<String, ProgramConfiguration>,
}

impl ProgramConfigs {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        let mut doc: Map<String, Value> = serde_json::from_str(content)?;
        let schema = match doc.remove("$schema") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };
        let programs = match doc.remove("programs") {
            Some(programs) => serde_json::from_value(programs)?,
            None => serde_json::from_value(Value::Object(doc))?,
        };
        Ok(Self { schema, programs })
    }

    pub fn get(&self, identifier: &str) -> Option<&ProgramConfiguration> {
        self.programs.get(identifier)
    }
}

/// An artifact merged with its (optional) program configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Automation {
    /// File the artifact was read from
    pub file_name: PathBuf,
    pub artifact: Artifact,
    pub program_config: Option<ProgramConfiguration>,
}

impl Automation {
    pub fn new(
        file_name: impl Into<PathBuf>,
        artifact: Artifact,
        program_config: Option<ProgramConfiguration>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            artifact,
            program_config,
        }
    }

    pub fn title(&self) -> &str {
        &self.artifact.title
    }

    pub fn code(&self) -> &str {
        &self.artifact.data.code
    }

    /// Explicit readonly override, falling back to `default`
    pub fn effective_readonly(&self, default: bool) -> bool {
        self.program_config
            .as_ref()
            .and_then(|c| c.readonly)
            .unwrap_or(default)
    }

    pub fn description(&self) -> Option<&str> {
        self.program_config
            .as_ref()
            .and_then(|c| c.description.as_deref())
            .filter(|d| !d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_layout() {
        let configs = ProgramConfigs::from_json(
            r#"{"$schema": "configuration.schema.json", "programs": {"sum_numbers": {"readonly": false}}}"#,
        )
        .unwrap();
        assert_eq!(configs.schema.as_deref(), Some("configuration.schema.json"));
        assert_eq!(configs.programs.len(), 1);
        assert_eq!(configs.get("sum_numbers").unwrap().readonly, Some(false));
    }

    #[test]
    fn test_flat_layout() {
        let configs = ProgramConfigs::from_json(
            r#"{"sum_numbers": {"readonly": false, "description": "Adds two numbers"}}"#,
        )
        .unwrap();
        assert_eq!(
            configs.get("sum_numbers").unwrap().description.as_deref(),
            Some("Adds two numbers")
        );
    }

    #[test]
    fn test_schema_only_document() {
        let configs = ProgramConfigs::from_json(r#"{"$schema": "configuration.schema.json"}"#).unwrap();
        assert!(configs.programs.is_empty());
    }

    #[test]
    fn test_malformed_program_entry() {
        assert!(ProgramConfigs::from_json(r#"{"programs": {"a": {"readonly": "yes"}}}"#).is_err());
        assert!(ProgramConfigs::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_effective_readonly() {
        let mut automation = Automation::new("a.json", Artifact::default(), None);
        assert!(automation.effective_readonly(true));
        assert!(!automation.effective_readonly(false));

        automation.program_config = Some(ProgramConfiguration {
            readonly: Some(false),
            description: None,
        });
        assert!(!automation.effective_readonly(true));
    }

    #[test]
    fn test_missing_fields_deserialize_empty() {
        let artifact: Artifact = serde_json::from_str(r#"{"title": "x", "data": {}}"#).unwrap();
        assert!(artifact.artifact_type.is_empty());
        assert!(artifact.data.output_schema.is_none());
    }

    #[test]
    fn test_null_strings_deserialize_empty() {
        let artifact: Artifact = serde_json::from_str(
            r#"{"identifier": null, "title": null, "artifact_type": null, "data": {"code": null}}"#,
        )
        .unwrap();
        assert!(artifact.identifier.is_empty());
        assert!(artifact.title.is_empty());
        assert!(artifact.artifact_type.is_empty());
        assert!(artifact.data.code.is_empty());

        assert!(serde_json::from_str::<Artifact>(r#"{"title": 5}"#).is_err());
    }
}
