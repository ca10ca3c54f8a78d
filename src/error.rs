//! Error types for program code generation

use std::path::PathBuf;

use thiserror::Error;

/// Result type for codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Codegen errors
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Failed to read or parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Duplicate name found: {title} in {}", path.display())]
    DuplicateName { title: String, path: PathBuf },

    #[error("Missing {field} in {}", path.display())]
    MissingField { field: &'static str, path: PathBuf },

    #[error("Title {title:?} does not give a valid function name ({name:?}) in {}", path.display())]
    InvalidName {
        title: String,
        name: String,
        path: PathBuf,
    },

    #[error("Failed to compile {type_name} for {}: {reason}", path.display())]
    TypeCompile {
        type_name: String,
        path: PathBuf,
        reason: String,
    },

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config_crate::ConfigError),

    #[error("Scaffold error: {0}")]
    Scaffold(String),
}

impl CodegenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
