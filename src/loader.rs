//! Artifact Loading
//!
//! Discovers artifact files under a directory, merges each with its program
//! configuration and validates the whole set before any code is generated.
//!
//! Artifact files fail hard; the configuration file fails soft. A missing or
//! broken configuration file only means no overrides apply.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::automation::{Artifact, Automation, ProgramConfigs};
use crate::codegen::names::function_name;
use crate::error::{CodegenError, Result};

/// Load and validate every artifact under `root_dir`
pub fn load_automations(root_dir: &Path, config_path: Option<&Path>) -> Result<Vec<Automation>> {
    if !root_dir.is_dir() {
        return Err(CodegenError::MissingDirectory(root_dir.to_path_buf()));
    }

    let configs = config_path.map(load_program_configs).unwrap_or_default();

    let mut files = discover_artifacts(root_dir)?;
    if let Some(config_path) = config_path {
        files.retain(|file| file != config_path);
    }
    info!(count = files.len(), dir = %root_dir.display(), "Discovered artifact files");

    let mut automations = Vec::with_capacity(files.len());
    for path in files {
        let artifact = read_artifact(&path)?;
        let program_config = configs.get(&artifact.identifier).cloned();
        debug!(
            file = %path.display(),
            identifier = %artifact.identifier,
            configured = program_config.is_some(),
            "Loaded artifact"
        );
        automations.push(Automation::new(path, artifact, program_config));
    }

    check_unique_names(&automations)?;
    for automation in &automations {
        validate(automation)?;
    }

    Ok(automations)
}

/// Every `*.json` file below `root_dir`, sorted by path
pub fn discover_artifacts(root_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root_dir).sort_by_file_name() {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// Read the program configuration file; absent or broken means no overrides
pub fn load_program_configs(path: &Path) -> ProgramConfigs {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            if path.exists() {
                warn!(file = %path.display(), error = %e, "Failed to read program configuration");
            } else {
                debug!(file = %path.display(), "No program configuration file");
            }
            return ProgramConfigs::default();
        }
    };

    match ProgramConfigs::from_json(&content) {
        Ok(configs) => {
            debug!(file = %path.display(), programs = configs.programs.len(), "Loaded program configuration");
            configs
        }
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Ignoring invalid program configuration");
            ProgramConfigs::default()
        }
    }
}

fn read_artifact(path: &Path) -> Result<Artifact> {
    let content = fs::read_to_string(path).map_err(|e| CodegenError::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| CodegenError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Derived function names must be unique across the set
fn check_unique_names(automations: &[Automation]) -> Result<()> {
    let mut seen: HashMap<String, &Path> = HashMap::with_capacity(automations.len());
    for automation in automations {
        let name = function_name(automation.title());
        if let Some(first) = seen.get(&name) {
            debug!(name = %name, first = %first.display(), "Duplicate function name");
            return Err(CodegenError::DuplicateName {
                title: automation.title().to_string(),
                path: automation.file_name.clone(),
            });
        }
        seen.insert(name, &automation.file_name);
    }
    Ok(())
}

fn validate(automation: &Automation) -> Result<()> {
    let artifact = &automation.artifact;
    let missing = if artifact.title.is_empty() {
        Some("title")
    } else if artifact.artifact_type.is_empty() {
        Some("artifact_type")
    } else if artifact.data.input_schema.is_none() {
        Some("input_schema")
    } else if artifact.data.output_schema.is_none() {
        Some("output_schema")
    } else if artifact.data.code.is_empty() {
        Some("code")
    } else {
        None
    };

    if let Some(field) = missing {
        return Err(CodegenError::MissingField {
            field,
            path: automation.file_name.clone(),
        });
    }

    // Identifiers cannot be empty or start with a digit
    let name = function_name(automation.title());
    if name.is_empty() || name.starts_with(char::is_numeric) {
        return Err(CodegenError::InvalidName {
            title: automation.title().to_string(),
            name,
            path: automation.file_name.clone(),
        });
    }
    Ok(())
}
