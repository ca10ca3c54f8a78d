//! The `update` pipeline: Load -> Annotate -> Compile -> Render -> Write

use std::path::PathBuf;

use tracing::info;

use crate::codegen::{self, FunctionOptions};
use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::loader::load_automations;
use crate::writer::write_output_file;

/// Files written by one update run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    pub program_count: usize,
    pub types_path: PathBuf,
    pub functions_path: PathBuf,
}

/// Regenerate `types.ts` and `functions.ts` for the configured project.
///
/// Both outputs are fully generated before either is written.
pub fn run_update(config: &GeneratorConfig, options: FunctionOptions) -> Result<UpdateSummary> {
    let programs_dir = config.programs_path();
    let configuration_file = config.configuration_path();
    info!(
        programs = %programs_dir.display(),
        configuration = %configuration_file.display(),
        "Reading program artifacts"
    );

    let automations = load_automations(&programs_dir, Some(&configuration_file))?;
    let output = codegen::generate(&automations, &config.typescript, options)?;

    let summary = UpdateSummary {
        program_count: output.program_count,
        types_path: config.types_path(),
        functions_path: config.functions_path(),
    };
    write_output_file(&output.types, &summary.types_path)?;
    write_output_file(&output.functions, &summary.functions_path)?;

    info!(
        programs = summary.program_count,
        types = %summary.types_path.display(),
        functions = %summary.functions_path.display(),
        "Generated program functions"
    );
    Ok(summary)
}
