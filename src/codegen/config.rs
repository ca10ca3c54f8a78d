//! Codegen Configuration
//!
//! - TypeScriptProfile: how JSON-Schema scalars and objects render as types
//! - FunctionOptions: switches that shape the generated wrapper functions

use serde::{Deserialize, Serialize};

// =============================================================================
// Type Rendering
// =============================================================================

/// Type mappings for JSON scalar types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeMappings {
    pub string: String,
    pub integer: String,
    pub number: String,
    pub boolean: String,
    pub null: String,
    /// Unknown/any type
    pub any: String,
}

impl Default for TypeMappings {
    fn default() -> Self {
        Self {
            string: "string".to_string(),
            integer: "number".to_string(),
            number: "number".to_string(),
            boolean: "boolean".to_string(),
            null: "null".to_string(),
            any: "unknown".to_string(),
        }
    }
}

/// TypeScript rendering configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeScriptProfile {
    pub types: TypeMappings,

    /// Whether objects without an explicit `additionalProperties` accept
    /// extra keys (rendered as an index signature)
    pub additional_properties: bool,

    /// Comment placed above every compiled block
    pub banner_comment: Option<String>,

    /// One indentation level
    pub indent: String,
}

impl Default for TypeScriptProfile {
    fn default() -> Self {
        Self {
            types: TypeMappings::default(),
            additional_properties: false,
            banner_comment: None,
            indent: "  ".to_string(),
        }
    }
}

impl TypeScriptProfile {
    /// Get the type string for a JSON scalar
    pub fn scalar_type(&self, scalar: &str) -> &str {
        match scalar {
            "string" => &self.types.string,
            "integer" => &self.types.integer,
            "number" => &self.types.number,
            "boolean" => &self.types.boolean,
            "null" => &self.types.null,
            _ => &self.types.any,
        }
    }

    /// Indentation for a nesting level
    pub fn pad(&self, level: usize) -> String {
        self.indent.repeat(level)
    }
}

// =============================================================================
// Function Rendering
// =============================================================================

/// Options for the generated wrapper functions
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionOptions {
    /// Tag every function with `@allowrelaxedtypes`
    pub allow_relaxed_types: bool,

    /// Readonly flag for programs without an explicit override
    pub readonly_default: bool,
}

impl Default for FunctionOptions {
    fn default() -> Self {
        Self {
            allow_relaxed_types: false,
            readonly_default: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typescript_profile_defaults() {
        let profile = TypeScriptProfile::default();
        assert_eq!(profile.scalar_type("integer"), "number");
        assert_eq!(profile.scalar_type("null"), "null");
        assert_eq!(profile.scalar_type("something-else"), "unknown");
        assert!(!profile.additional_properties);
        assert!(profile.banner_comment.is_none());
    }

    #[test]
    fn test_profile_equality_tracks_overrides() {
        let mut profile = TypeScriptProfile::default();
        assert_eq!(profile, TypeScriptProfile::default());

        profile.types.integer = "bigint".to_string();
        assert_ne!(profile, TypeScriptProfile::default());
    }

    #[test]
    fn test_pad() {
        let profile = TypeScriptProfile::default();
        assert_eq!(profile.pad(0), "");
        assert_eq!(profile.pad(2), "    ");
    }

    #[test]
    fn test_function_option_defaults() {
        let options = FunctionOptions::default();
        assert!(!options.allow_relaxed_types);
        assert!(options.readonly_default);
    }
}
