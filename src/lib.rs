//! Program Functions Generator
//!
//! Turns program ("automation") artifact files into the TypeScript sources of
//! a lambda connector: one type pair and one async wrapper function per
//! program, each wrapper calling the remote execute-program endpoint.
//!
//! ## Layout
//!
//! ```text
//! <root>/
//! ├── programs/              # artifact files, any nesting
//! │   └── sum_numbers.json
//! ├── configuration.json     # optional per-program overrides
//! ├── utils.ts               # runtime helpers (scaffold)
//! ├── types.ts               # generated
//! └── functions.ts           # generated
//! ```
//!
//! ## Pipeline
//!
//! - [`loader`]: discover, parse, merge configuration, validate
//! - [`codegen::annotate`]: title anonymous objects inside arrays
//! - [`codegen::typescript`]: compile JSON-Schema into declarations
//! - [`codegen::functions`]: render the wrapper functions
//! - [`writer`]: persist with fixed permissions

pub mod automation;
pub mod checksum;
pub mod codegen;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod scaffold;
pub mod schema;
pub mod writer;

pub use automation::{Artifact, ArtifactData, Automation, ProgramConfigs, ProgramConfiguration};
pub use checksum::Checksum;
pub use codegen::{FunctionOptions, GeneratedOutput, TypeScriptProfile};
pub use config::GeneratorConfig;
pub use error::{CodegenError, Result};
pub use loader::load_automations;
pub use pipeline::{run_update, UpdateSummary};
pub use scaffold::{upgrade_scaffold, UpgradeReport};
pub use schema::SchemaNode;
pub use writer::write_output_file;
