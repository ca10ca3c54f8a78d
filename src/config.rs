//! Generator configuration
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (programs-codegen.toml)
//! - Environment variables (PROGRAMS_CODEGEN__*)
//!
//! ## Example config file (programs-codegen.toml):
//! ```toml
//! root = "/etc/connector"
//! programs_dir = "programs"
//! configuration_file = "configuration.json"
//! output_dir = "."
//!
//! [typescript]
//! indent = "  "
//! additional_properties = false
//!
//! [typescript.types]
//! any = "unknown"
//! ```
//!
//! Relative paths resolve against `root`, which defaults to
//! `$HASURA_CONFIGURATION_DIRECTORY` and then to the working directory.

use std::path::{Path, PathBuf};

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::codegen::TypeScriptProfile;

/// Environment variable naming the mounted connector directory
pub const CONFIGURATION_DIRECTORY_ENV: &str = "HASURA_CONFIGURATION_DIRECTORY";

/// Main configuration for the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Connector project directory
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Directory holding the program artifact files
    #[serde(default = "default_programs_dir")]
    pub programs_dir: PathBuf,

    /// Per-program configuration file
    #[serde(default = "default_configuration_file")]
    pub configuration_file: PathBuf,

    /// Where `types_file` and `functions_file` are written
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_types_file")]
    pub types_file: String,

    #[serde(default = "default_functions_file")]
    pub functions_file: String,

    /// Type rendering settings
    #[serde(default)]
    pub typescript: TypeScriptProfile,
}

// Default value functions
fn default_root() -> PathBuf {
    std::env::var_os(CONFIGURATION_DIRECTORY_ENV)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_programs_dir() -> PathBuf {
    PathBuf::from("programs")
}

fn default_configuration_file() -> PathBuf {
    PathBuf::from("configuration.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_types_file() -> String {
    "types.ts".to_string()
}

fn default_functions_file() -> String {
    "functions.ts".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            programs_dir: default_programs_dir(),
            configuration_file: default_configuration_file(),
            output_dir: default_output_dir(),
            types_file: default_types_file(),
            functions_file: default_functions_file(),
            typescript: TypeScriptProfile::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from the default locations, adding `config_path`
    /// on top when given
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        for location in ["programs-codegen.toml", ".programs-codegen.toml"] {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(dirs) = directories::ProjectDirs::from("io", "hasura", "programs-codegen") {
            let xdg_config = dirs.config_dir().join("programs-codegen.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        // Load from environment variables (PROGRAMS_CODEGEN__*)
        builder = builder.add_source(
            Environment::with_prefix("PROGRAMS_CODEGEN")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn programs_path(&self) -> PathBuf {
        self.resolve(&self.programs_dir)
    }

    pub fn configuration_path(&self) -> PathBuf {
        self.resolve(&self.configuration_file)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.output_dir)
    }

    pub fn types_path(&self) -> PathBuf {
        self.output_path().join(&self.types_file)
    }

    pub fn functions_path(&self) -> PathBuf {
        self.output_path().join(&self.functions_file)
    }
}
