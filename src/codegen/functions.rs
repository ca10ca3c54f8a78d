//! Function Synthesizer
//!
//! Renders one async TypeScript function per program. Each function embeds
//! the program code and forwards `(headers, input)` to the execute-program
//! endpoint through the runtime helpers in `utils.ts`.

use super::config::FunctionOptions;
use super::names::DerivedNames;
use crate::automation::Automation;

const FUNCTIONS_HEADER: &str = r#"import * as sdk from "@hasura/ndc-lambda-sdk";
import * as types from "./types";
import * as utils from "./utils";

const buildVersion = process.env["PROMPTQL_BUILD_VERSION"];
const apiKey = utils.mustEnv("PROMPTQL_API_KEY");
const executeProgramEndpoint = utils.mustEnv(
  "PROMPTQL_EXECUTE_PROGRAM_ENDPOINT"
);

"#;

/// Escape program code for a template literal
pub fn escape_code(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    for c in code.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}

/// JSDoc block for a function, or nothing when there is nothing to say
fn doc_block(automation: &Automation, options: FunctionOptions) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(description) = automation.description() {
        for line in description.replace("*/", "*\\/").lines() {
            lines.push(line.trim_end().to_string());
        }
    }
    if automation.effective_readonly(options.readonly_default) {
        lines.push("@readonly".to_string());
    }
    if options.allow_relaxed_types {
        lines.push("@allowrelaxedtypes".to_string());
    }

    if lines.is_empty() {
        return String::new();
    }

    let mut out = String::from("/**\n");
    for line in lines {
        if line.is_empty() {
            out.push_str(" *\n");
        } else {
            out.push_str(&format!(" * {}\n", line));
        }
    }
    out.push_str(" */\n");
    out
}

/// Render the wrapper function for one program
pub fn render_function(automation: &Automation, options: FunctionOptions) -> String {
    let names = DerivedNames::from_title(automation.title());
    let input = &names.input_type;
    let output = &names.output_type;

    format!(
        "{doc}export async function {function}(
  headers: sdk.JSONValue,
  input: types.{input}
): Promise<utils.ProgramOutput<types.{output}>> {{
  const code = `{code}`;
  const body = utils.prepareExecuteProgramBody(
    headers,
    input,
    code,
    buildVersion
  );
  const response = await utils.makeExecuteProgramRequest<
    types.{input},
    types.{output}
  >(body, apiKey, executeProgramEndpoint);
  return response;
}}
",
        doc = doc_block(automation, options),
        function = names.function,
        input = input,
        output = output,
        code = escape_code(automation.code()),
    )
}

/// Render `functions.ts`: the fixed header followed by every function
pub fn render_functions(automations: &[Automation], options: FunctionOptions) -> String {
    let functions: Vec<String> = automations
        .iter()
        .map(|automation| render_function(automation, options))
        .collect();
    format!("{}{}", FUNCTIONS_HEADER, functions.join("\n"))
}
