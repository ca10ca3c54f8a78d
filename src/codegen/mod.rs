//! Code Generation
//!
//! Turns validated automations into the two TypeScript modules of the
//! connector.
//!
//! Pipeline per automation:
//! - Annotate: give anonymous objects inside arrays a path-derived title
//! - Compile: input and output schemas become declarations named after the
//!   program (`<Name>Input`, `<Name>Output`)
//! - Render: one async wrapper function per program
//!
//! Generation runs only after the loader has validated every artifact, so a
//! failure here never leaves partial output behind.

pub mod annotate;
pub mod config;
pub mod functions;
pub mod names;
pub mod typescript;

pub use config::{FunctionOptions, TypeMappings, TypeScriptProfile};
pub use names::DerivedNames;
pub use typescript::{compile_type, CompileError};

use tracing::debug;

use crate::automation::Automation;
use crate::error::{CodegenError, Result};
use crate::schema::SchemaNode;

// =============================================================================
// Generated Output
// =============================================================================

/// Output from code generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedOutput {
    /// Contents of `types.ts`
    pub types: String,
    /// Contents of `functions.ts`
    pub functions: String,
    /// Number of programs generated
    pub program_count: usize,
}

// =============================================================================
// Public API
// =============================================================================

/// Compile the input and output types of every automation
pub fn generate_types(automations: &[Automation], profile: &TypeScriptProfile) -> Result<String> {
    let mut blocks = Vec::with_capacity(automations.len() * 2);

    for automation in automations {
        let names = DerivedNames::from_title(automation.title());
        let data = &automation.artifact.data;

        let input = data.input_schema.as_ref().ok_or_else(|| CodegenError::MissingField {
            field: "input_schema",
            path: automation.file_name.clone(),
        })?;
        let output = data.output_schema.as_ref().ok_or_else(|| CodegenError::MissingField {
            field: "output_schema",
            path: automation.file_name.clone(),
        })?;

        blocks.push(compile_schema(automation, input, &names.input_type, profile)?);
        blocks.push(compile_schema(automation, output, &names.output_type, profile)?);
        debug!(program = %names.function, "Compiled types");
    }

    Ok(blocks.join("\n"))
}

/// Render the wrapper functions of every automation
pub fn generate_functions(automations: &[Automation], options: FunctionOptions) -> String {
    functions::render_functions(automations, options)
}

/// Generate both modules
pub fn generate(
    automations: &[Automation],
    profile: &TypeScriptProfile,
    options: FunctionOptions,
) -> Result<GeneratedOutput> {
    Ok(GeneratedOutput {
        types: generate_types(automations, profile)?,
        functions: generate_functions(automations, options),
        program_count: automations.len(),
    })
}

fn compile_schema(
    automation: &Automation,
    schema: &SchemaNode,
    type_name: &str,
    profile: &TypeScriptProfile,
) -> Result<String> {
    let annotated = annotate::annotate(schema, type_name);
    compile_type(&annotated, type_name, profile).map_err(|e| CodegenError::TypeCompile {
        type_name: type_name.to_string(),
        path: automation.file_name.clone(),
        reason: e.to_string(),
    })
}
