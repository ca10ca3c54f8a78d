//! TypeScript Type Compiler
//!
//! Compiles one JSON-Schema document into a block of TypeScript declarations.
//!
//! - The root is always declared under the caller's type name.
//! - Every other titled schema is hoisted into its own declaration named after
//!   its title; untitled objects render inline.
//! - Object roots become `export interface`, everything else `export type`.
//! - Declarations appear root first, then in depth-first discovery order,
//!   separated by a blank line.

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use thiserror::Error;

use super::config::TypeScriptProfile;
use super::names::{is_ident_char, is_ident_start, safe_type_name};
use crate::schema::{AdditionalProperties, Items, SchemaNode, SchemaObject, TypeTags};

/// Schema compilation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("cannot resolve $ref '{0}'")]
    UnresolvedRef(String),

    #[error("invalid '{keyword}': {reason}")]
    InvalidKeyword { keyword: String, reason: String },
}

// =============================================================================
// Public API
// =============================================================================

/// Compile `schema` into TypeScript declarations rooted at `type_name`
pub fn compile_type(
    schema: &SchemaNode,
    type_name: &str,
    profile: &TypeScriptProfile,
) -> Result<String, CompileError> {
    let mut compiler = Compiler::new(schema, type_name, profile);
    compiler.declare_root(schema)?;
    Ok(compiler.render())
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Debug)]
enum DeclarationBody {
    Pending,
    Interface(String),
    Alias(String),
}

#[derive(Debug)]
struct Declaration {
    name: String,
    description: Option<String>,
    body: DeclarationBody,
}

struct Compiler<'a> {
    profile: &'a TypeScriptProfile,
    root_name: String,
    /// Root document, for `$ref` lookups
    root_value: Value,
    declarations: Vec<Declaration>,
    used_names: HashSet<String>,
    /// Titled schemas already hoisted, with their declared names
    hoisted: Vec<(SchemaObject, String)>,
    /// `$ref` target -> declared name
    refs: HashMap<String, String>,
}

impl<'a> Compiler<'a> {
    fn new(schema: &SchemaNode, root_name: &str, profile: &'a TypeScriptProfile) -> Self {
        Self {
            profile,
            root_name: root_name.to_string(),
            root_value: schema.to_value(),
            declarations: Vec::new(),
            used_names: HashSet::new(),
            hoisted: Vec::new(),
            refs: HashMap::new(),
        }
    }

    fn declare_root(&mut self, schema: &SchemaNode) -> Result<(), CompileError> {
        self.used_names.insert(self.root_name.clone());
        let description = schema
            .as_object()
            .and_then(|o| o.description())
            .map(str::to_string);
        let index = self.push_pending(self.root_name.clone(), description);
        let body = self.declaration_body(schema)?;
        self.declarations[index].body = body;
        Ok(())
    }

    fn push_pending(&mut self, name: String, description: Option<String>) -> usize {
        self.declarations.push(Declaration {
            name,
            description,
            body: DeclarationBody::Pending,
        });
        self.declarations.len() - 1
    }

    fn unique_name(&mut self, base: &str) -> String {
        let base = if base.is_empty() { "Type" } else { base };
        let mut candidate = base.to_string();
        let mut suffix = 1;
        while self.used_names.contains(&candidate) {
            candidate = format!("{}{}", base, suffix);
            suffix += 1;
        }
        self.used_names.insert(candidate.clone());
        candidate
    }

    fn declaration_body(&mut self, node: &SchemaNode) -> Result<DeclarationBody, CompileError> {
        match node {
            SchemaNode::Bool(allowed) => Ok(DeclarationBody::Alias(self.bool_type(*allowed))),
            SchemaNode::Object(obj) if is_interface_like(obj) => {
                Ok(DeclarationBody::Interface(self.members(obj, 1)?))
            }
            SchemaNode::Object(obj) => Ok(DeclarationBody::Alias(self.inline_expr(obj, 0)?)),
        }
    }

    /// Declare a titled schema, reusing the declaration of an identical one
    fn hoist(&mut self, obj: &SchemaObject) -> Result<String, CompileError> {
        if let Some((_, name)) = self.hoisted.iter().find(|(schema, _)| schema == obj) {
            return Ok(name.clone());
        }

        let title = obj.title.as_deref().unwrap_or_default();
        let name = self.unique_name(&safe_type_name(title));
        self.hoisted.push((obj.clone(), name.clone()));

        let index = self.push_pending(name.clone(), obj.description().map(str::to_string));
        let body = if is_interface_like(obj) {
            DeclarationBody::Interface(self.members(obj, 1)?)
        } else {
            DeclarationBody::Alias(self.inline_expr(obj, 0)?)
        };
        self.declarations[index].body = body;
        Ok(name)
    }

    fn resolve_ref(&mut self, reference: &str) -> Result<String, CompileError> {
        if reference == "#" {
            return Ok(self.root_name.clone());
        }
        if let Some(name) = self.refs.get(reference) {
            return Ok(name.clone());
        }

        let pointer = reference
            .strip_prefix('#')
            .ok_or_else(|| CompileError::UnresolvedRef(reference.to_string()))?;
        let target = self
            .root_value
            .pointer(pointer)
            .cloned()
            .ok_or_else(|| CompileError::UnresolvedRef(reference.to_string()))?;
        let node = SchemaNode::from_value(target).map_err(|e| CompileError::InvalidKeyword {
            keyword: "$ref".to_string(),
            reason: format!("{}: {}", reference, e),
        })?;

        let base = match node.title() {
            Some(title) => title.to_string(),
            None => pointer.rsplit('/').next().unwrap_or_default().to_string(),
        };
        let name = self.unique_name(&safe_type_name(&base));
        self.refs.insert(reference.to_string(), name.clone());

        let description = node
            .as_object()
            .and_then(|o| o.description())
            .map(str::to_string);
        let index = self.push_pending(name.clone(), description);
        let body = self.declaration_body(&node)?;
        self.declarations[index].body = body;
        Ok(name)
    }

    // =========================================================================
    // Type Expressions
    // =========================================================================

    fn bool_type(&self, allowed: bool) -> String {
        if allowed {
            self.profile.types.any.clone()
        } else {
            "never".to_string()
        }
    }

    fn type_expr(&mut self, node: &SchemaNode, level: usize) -> Result<String, CompileError> {
        match node {
            SchemaNode::Bool(allowed) => Ok(self.bool_type(*allowed)),
            SchemaNode::Object(obj) if obj.title.is_some() => self.hoist(obj),
            SchemaNode::Object(obj) => self.inline_expr(obj, level),
        }
    }

    fn inline_expr(&mut self, obj: &SchemaObject, level: usize) -> Result<String, CompileError> {
        if let Some(reference) = obj.keyword("$ref") {
            let reference = reference.as_str().ok_or_else(|| CompileError::InvalidKeyword {
                keyword: "$ref".to_string(),
                reason: "expected a string".to_string(),
            })?;
            return self.resolve_ref(reference);
        }

        if let Some(value) = obj.keyword("const") {
            return Ok(literal(value, &self.profile.types.any));
        }

        if let Some(values) = obj.keyword("enum") {
            let values = values.as_array().ok_or_else(|| CompileError::InvalidKeyword {
                keyword: "enum".to_string(),
                reason: "expected an array".to_string(),
            })?;
            if values.is_empty() {
                return Ok("never".to_string());
            }
            let mut parts: Vec<String> = Vec::with_capacity(values.len());
            for value in values {
                push_unique(&mut parts, literal(value, &self.profile.types.any));
            }
            return Ok(parts.join(" | "));
        }

        for (keyword, separator) in [("anyOf", " | "), ("oneOf", " | "), ("allOf", " & ")] {
            if let Some(members) = obj.keyword(keyword) {
                return self.combine(keyword, members, separator, level);
            }
        }

        let tags: Vec<&str> = match &obj.type_tags {
            Some(tags) => tags.tags(),
            None if obj.properties.is_some()
                || matches!(obj.additional_properties, Some(AdditionalProperties::Schema(_))) =>
            {
                vec!["object"]
            }
            None if obj.items.is_some() => vec!["array"],
            None => Vec::new(),
        };

        let mut parts: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            let part = match tag {
                "object" => self.object_literal(obj, level)?,
                "array" => self.array_expr(obj, level)?,
                scalar => self.profile.scalar_type(scalar).to_string(),
            };
            push_unique(&mut parts, part);
        }

        if parts.is_empty() {
            return Ok(self.profile.types.any.clone());
        }
        Ok(parts.join(" | "))
    }

    fn combine(
        &mut self,
        keyword: &str,
        members: &Value,
        separator: &str,
        level: usize,
    ) -> Result<String, CompileError> {
        let members = members.as_array().ok_or_else(|| CompileError::InvalidKeyword {
            keyword: keyword.to_string(),
            reason: "expected an array of schemas".to_string(),
        })?;

        let mut parts: Vec<String> = Vec::with_capacity(members.len());
        for member in members {
            let node = SchemaNode::from_value(member.clone()).map_err(|e| {
                CompileError::InvalidKeyword {
                    keyword: keyword.to_string(),
                    reason: e.to_string(),
                }
            })?;
            let expr = self.type_expr(&node, level)?;
            push_unique(&mut parts, parenthesize(expr));
        }

        if parts.is_empty() {
            return Ok(self.profile.types.any.clone());
        }
        Ok(parts.join(separator))
    }

    fn object_literal(&mut self, obj: &SchemaObject, level: usize) -> Result<String, CompileError> {
        let members = self.members(obj, level + 1)?;
        if members.is_empty() {
            return Ok("{}".to_string());
        }
        Ok(format!("{{\n{}{}}}", members, self.profile.pad(level)))
    }

    fn array_expr(&mut self, obj: &SchemaObject, level: usize) -> Result<String, CompileError> {
        match &obj.items {
            Some(Items::Single(item)) => {
                let element = self.type_expr(item, level)?;
                Ok(format!("{}[]", parenthesize(element)))
            }
            Some(Items::Tuple(items)) => {
                let mut elements = Vec::with_capacity(items.len());
                for item in items {
                    elements.push(self.type_expr(item, level)?);
                }
                Ok(format!("[{}]", elements.join(", ")))
            }
            None => Ok(format!("{}[]", self.profile.types.any)),
        }
    }

    /// Property and index-signature lines for an object, at `level`
    fn members(&mut self, obj: &SchemaObject, level: usize) -> Result<String, CompileError> {
        let pad = self.profile.pad(level);
        let required = obj.required();
        let mut out = String::new();

        if let Some(properties) = &obj.properties {
            for (name, property) in properties {
                let property_type = self.type_expr(property, level)?;

                let description = property
                    .as_object()
                    .filter(|p| p.title.is_none())
                    .and_then(|p| p.description());
                if let Some(description) = description {
                    out.push_str(&doc_comment(description, &pad));
                }

                let optional = if required.contains(&name.as_str()) { "" } else { "?" };
                out.push_str(&format!(
                    "{}{}{}: {};\n",
                    pad,
                    property_key(name),
                    optional,
                    property_type
                ));
            }
        }

        let index_type = match &obj.additional_properties {
            Some(AdditionalProperties::Schema(extra)) => Some(self.type_expr(extra, level)?),
            Some(AdditionalProperties::Allowed(true)) => Some(self.profile.types.any.clone()),
            Some(AdditionalProperties::Allowed(false)) => None,
            None if self.profile.additional_properties => Some(self.profile.types.any.clone()),
            None => None,
        };
        if let Some(index_type) = index_type {
            out.push_str(&format!("{}[k: string]: {};\n", pad, index_type));
        }

        Ok(out)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render(&self) -> String {
        let mut blocks: Vec<String> = Vec::with_capacity(self.declarations.len());

        for declaration in &self.declarations {
            let mut block = String::new();
            if let Some(description) = &declaration.description {
                block.push_str(&doc_comment(description, ""));
            }
            match &declaration.body {
                DeclarationBody::Interface(members) if members.is_empty() => {
                    block.push_str(&format!("export interface {} {{}}\n", declaration.name));
                }
                DeclarationBody::Interface(members) => {
                    block.push_str(&format!(
                        "export interface {} {{\n{}}}\n",
                        declaration.name, members
                    ));
                }
                DeclarationBody::Alias(expr) => {
                    block.push_str(&format!("export type {} = {};\n", declaration.name, expr));
                }
                DeclarationBody::Pending => continue,
            }
            blocks.push(block);
        }

        let out = blocks.join("\n");
        match &self.profile.banner_comment {
            Some(banner) => format!("{}\n{}", banner, out),
            None => out,
        }
    }
}

// =============================================================================
// Helper Utilities
// =============================================================================

/// Plain objects (no combinators, only the `object` tag) become interfaces
fn is_interface_like(obj: &SchemaObject) -> bool {
    let has_combinator = ["$ref", "const", "enum", "anyOf", "oneOf", "allOf"]
        .iter()
        .any(|k| obj.keywords.contains_key(*k));
    if has_combinator {
        return false;
    }
    match &obj.type_tags {
        Some(TypeTags::One(tag)) => tag == "object",
        Some(TypeTags::Many(tags)) => tags.len() == 1 && tags[0] == "object",
        None => obj.properties.is_some(),
    }
}

fn literal(value: &Value, fallback: &str) -> String {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => value.to_string(),
        Value::Array(_) | Value::Object(_) => fallback.to_string(),
    }
}

fn push_unique(parts: &mut Vec<String>, part: String) {
    if !parts.contains(&part) {
        parts.push(part);
    }
}

/// Quote property names that are not plain identifiers
fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let is_identifier = chars.next().is_some_and(is_ident_start) && chars.all(is_ident_char);
    if is_identifier {
        name.to_string()
    } else {
        Value::String(name.to_string()).to_string()
    }
}

/// Wrap unions/intersections so they bind correctly inside `T[]` or `A & B`
fn parenthesize(expr: String) -> String {
    if is_compound(&expr) {
        format!("({})", expr)
    } else {
        expr
    }
}

/// Does the expression contain a top-level `|` or `&`?
fn is_compound(expr: &str) -> bool {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for c in expr.chars() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' | '[' | '(' | '<' => depth += 1,
            '}' | ']' | ')' | '>' => depth = depth.saturating_sub(1),
            '|' | '&' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

fn doc_comment(text: &str, pad: &str) -> String {
    let mut out = format!("{}/**\n", pad);
    for line in text.replace("*/", "*\\/").lines() {
        if line.trim().is_empty() {
            out.push_str(&format!("{} *\n", pad));
        } else {
            out.push_str(&format!("{} * {}\n", pad, line.trim_end()));
        }
    }
    out.push_str(&format!("{} */\n", pad));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::annotate::annotate;
    use serde_json::json;

    fn compile(schema: Value, name: &str) -> String {
        let node = SchemaNode::from_value(schema).unwrap();
        let annotated = annotate(&node, name);
        compile_type(&annotated, name, &TypeScriptProfile::default()).unwrap()
    }

    #[test]
    fn test_array_of_objects() {
        let out = compile(
            json!({
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "number1": {"type": "number"},
                        "number2": {"type": "number"}
                    }
                }
            }),
            "SumNumbersFrom1To5Input",
        );
        assert_eq!(
            out,
            "export type SumNumbersFrom1To5Input = SumNumbersFrom1To5InputItem[];\n\
             \n\
             export interface SumNumbersFrom1To5InputItem {\n  number1?: number;\n  number2?: number;\n}\n"
        );
    }

    #[test]
    fn test_object_root_with_required_and_nested_inline() {
        let out = compile(
            json!({
                "type": "object",
                "required": ["id"],
                "properties": {
                    "id": {"type": "integer"},
                    "meta": {
                        "type": ["object", "null"],
                        "properties": {"tags": {"type": "array", "items": {"type": "string"}}}
                    }
                }
            }),
            "Record",
        );
        assert_eq!(
            out,
            "export interface Record {\n  id: number;\n  meta?: {\n    tags?: string[];\n  } | null;\n}\n"
        );
    }

    #[test]
    fn test_root_title_does_not_rename_root() {
        let node = SchemaNode::from_value(json!({"type": "string", "title": "Other"})).unwrap();
        let out = compile_type(&node, "Wanted", &TypeScriptProfile::default()).unwrap();
        assert_eq!(out, "export type Wanted = string;\n");
    }

    #[test]
    fn test_enum_const_and_unions() {
        let out = compile(
            json!({
                "type": "object",
                "properties": {
                    "status": {"enum": ["open", "closed", null]},
                    "kind": {"const": "fixed"},
                    "value": {"anyOf": [{"type": "string"}, {"type": "integer"}]},
                    "list": {"type": "array", "items": {"type": ["string", "null"]}}
                }
            }),
            "Thing",
        );
        assert!(out.contains("  status?: \"open\" | \"closed\" | null;\n"));
        assert!(out.contains("  kind?: \"fixed\";\n"));
        assert!(out.contains("  value?: string | number;\n"));
        assert!(out.contains("  list?: (string | null)[];\n"));
    }

    #[test]
    fn test_additional_properties() {
        let out = compile(
            json!({
                "type": "object",
                "properties": {
                    "closed": {"type": "object"},
                    "open": {"type": "object", "additionalProperties": true},
                    "map": {"type": "object", "additionalProperties": {"type": "number"}}
                }
            }),
            "Maps",
        );
        assert!(out.contains("  closed?: {};\n"));
        assert!(out.contains("  open?: {\n    [k: string]: unknown;\n  };\n"));
        assert!(out.contains("  map?: {\n    [k: string]: number;\n  };\n"));
    }

    #[test]
    fn test_quoted_keys_and_descriptions() {
        let out = compile(
            json!({
                "type": "object",
                "description": "A row",
                "properties": {
                    "first-name": {"type": "string", "description": "Given name"}
                }
            }),
            "Row",
        );
        assert_eq!(
            out,
            "/**\n * A row\n */\nexport interface Row {\n  /**\n   * Given name\n   */\n  \"first-name\"?: string;\n}\n"
        );
    }

    #[test]
    fn test_tuple_items() {
        let out = compile(
            json!({"type": "array", "items": [{"type": "string"}, {"type": "object", "properties": {"n": {"type": "number"}}}]}),
            "Pair",
        );
        assert_eq!(
            out,
            "export type Pair = [string, PairItem1];\n\nexport interface PairItem1 {\n  n?: number;\n}\n"
        );
    }

    #[test]
    fn test_definitions_ref() {
        let out = compile(
            json!({
                "type": "object",
                "properties": {"owner": {"$ref": "#/definitions/user"}},
                "definitions": {
                    "user": {"type": "object", "properties": {"name": {"type": "string"}}}
                }
            }),
            "Doc",
        );
        assert_eq!(
            out,
            "export interface Doc {\n  owner?: User;\n}\n\nexport interface User {\n  name?: string;\n}\n"
        );
    }

    #[test]
    fn test_unresolved_ref_is_an_error() {
        let node = SchemaNode::from_value(json!({"$ref": "https://example.com/schema.json"})).unwrap();
        let err = compile_type(&node, "Remote", &TypeScriptProfile::default()).unwrap_err();
        assert_eq!(
            err,
            CompileError::UnresolvedRef("https://example.com/schema.json".to_string())
        );
    }

    #[test]
    fn test_name_clash_gets_suffix() {
        let out = compile(
            json!({
                "type": "object",
                "properties": {
                    "a": {"type": "object", "title": "Part", "properties": {"x": {"type": "string"}}},
                    "b": {"type": "object", "title": "Part", "properties": {"y": {"type": "string"}}}
                }
            }),
            "Whole",
        );
        assert!(out.contains("  a?: Part;\n  b?: Part1;\n"));
        assert!(out.contains("export interface Part1 {\n  y?: string;\n}\n"));
    }

    #[test]
    fn test_unknown_and_empty_schemas() {
        let out = compile(json!({}), "Anything");
        assert_eq!(out, "export type Anything = unknown;\n");

        let out = compile_type(&SchemaNode::Bool(false), "Nothing", &TypeScriptProfile::default()).unwrap();
        assert_eq!(out, "export type Nothing = never;\n");
    }

    #[test]
    fn test_is_compound() {
        assert!(is_compound("string | null"));
        assert!(!is_compound("{\n  a?: string | null;\n}"));
        assert!(!is_compound("\"a|b\""));
        assert!(is_compound("A & B"));
    }
}
