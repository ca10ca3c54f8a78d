//! Connector Scaffold
//!
//! The connector project around the generated code (`utils.ts`, the program
//! configuration file and its JSON-Schema, `package.json`) ships inside the
//! binary. Upgrading a project rewrites the runtime helpers and the schema,
//! creates a configuration file only when there is none, and reports the
//! SDK version the bundled scaffold targets.

use std::fmt;
use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};
use semver::Version;
use serde_json::Value;
use tracing::{info, warn};

use crate::checksum::Checksum;
use crate::error::{CodegenError, Result};
use crate::writer::write_output_file;

static CONNECTOR_DEFINITION: Dir<'_> =
    include_dir!("$CARGO_MANIFEST_DIR/templates/connector-definition");

/// npm package providing the connector runtime
pub const SDK_PACKAGE: &str = "@hasura/ndc-lambda-sdk";

/// Scaffold files replaced on every upgrade
pub const MANAGED_FILES: &[&str] = &["utils.ts", "configuration.schema.json"];

/// Scaffold files written only when missing
pub const SEEDED_FILES: &[&str] = &["configuration.json"];

/// What an upgrade did to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Created,
    Updated,
    Unchanged,
    /// Existing user file left alone
    Kept,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileAction::Created => "created",
            FileAction::Updated => "updated",
            FileAction::Unchanged => "unchanged",
            FileAction::Kept => "kept",
        };
        f.write_str(label)
    }
}

/// Outcome of a scaffold upgrade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeReport {
    pub target_sdk_version: String,
    pub current_sdk_version: String,
    pub files: Vec<(PathBuf, FileAction)>,
}

impl UpgradeReport {
    /// Does the project still pin a different SDK than the scaffold?
    pub fn sdk_upgrade_required(&self) -> bool {
        match (
            parse_version(&self.target_sdk_version),
            parse_version(&self.current_sdk_version),
        ) {
            (Some(target), Some(current)) => target != current,
            _ => self.target_sdk_version != self.current_sdk_version,
        }
    }

    pub fn action(&self, file_name: &str) -> Option<FileAction> {
        self.files
            .iter()
            .find(|(path, _)| path.file_name().is_some_and(|n| n == file_name))
            .map(|(_, action)| *action)
    }
}

/// Bundled scaffold file contents
pub fn template(name: &str) -> Result<&'static str> {
    CONNECTOR_DEFINITION
        .get_file(name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| CodegenError::Scaffold(format!("template not bundled: {}", name)))
}

/// SDK dependency version declared by a `package.json` document
pub fn sdk_version(package_json: &str, source: &Path) -> Result<String> {
    let package: Value = serde_json::from_str(package_json).map_err(|e| CodegenError::Parse {
        path: source.to_path_buf(),
        source: e,
    })?;
    package
        .get("dependencies")
        .and_then(|deps| deps.get(SDK_PACKAGE))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            CodegenError::Scaffold(format!(
                "{} not found in dependencies at {}",
                SDK_PACKAGE,
                source.display()
            ))
        })
}

/// Bring the scaffold files of `project_dir` up to the bundled version
pub fn upgrade_scaffold(project_dir: &Path) -> Result<UpgradeReport> {
    let target_sdk_version = sdk_version(template("package.json")?, Path::new("package.json"))?;
    info!(version = %target_sdk_version, "Upgrading SDK to version");

    let project_package = project_dir.join("package.json");
    let content = std::fs::read_to_string(&project_package)
        .map_err(|e| CodegenError::io(&project_package, e))?;
    let current_sdk_version = sdk_version(&content, &project_package)?;
    info!(version = %current_sdk_version, "Current SDK version");

    let mut files = Vec::with_capacity(MANAGED_FILES.len() + SEEDED_FILES.len());
    for name in MANAGED_FILES {
        let path = project_dir.join(name);
        let action = install(template(name)?, &path)?;
        info!(file = %path.display(), action = %action, "Upgraded scaffold file");
        files.push((path, action));
    }
    for name in SEEDED_FILES {
        let path = project_dir.join(name);
        let action = if path.exists() {
            FileAction::Kept
        } else {
            install(template(name)?, &path)?
        };
        info!(file = %path.display(), action = %action, "Upgraded scaffold file");
        files.push((path, action));
    }

    let report = UpgradeReport {
        target_sdk_version,
        current_sdk_version,
        files,
    };
    if report.sdk_upgrade_required() {
        warn!(
            "Please manually upgrade the {} package in your package.json to version {}",
            SDK_PACKAGE, report.target_sdk_version
        );
    }
    info!("Upgrade complete");
    Ok(report)
}

fn install(contents: &str, path: &Path) -> Result<FileAction> {
    let action = match Checksum::of_file(path) {
        None => FileAction::Created,
        Some(existing) if existing.matches(contents.as_bytes()) => FileAction::Unchanged,
        Some(_) => FileAction::Updated,
    };
    // Rewritten even when unchanged so the file mode is reset
    write_output_file(contents, path)?;
    Ok(action)
}

/// `1.13.1`, `^1.13.1` and `=1.13.1` all name version 1.13.1
fn parse_version(requirement: &str) -> Option<Version> {
    Version::parse(requirement.trim_start_matches(['^', '~', '=', 'v'])).ok()
}
