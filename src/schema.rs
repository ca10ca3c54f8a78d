//! JSON-Schema node model
//!
//! A schema node is either a boolean schema or a schema object. The keywords
//! that drive annotation and type compilation (`type`, `title`, `properties`,
//! `items`, `additionalProperties`) are typed; every other keyword is kept
//! verbatim in `keywords` so a node round-trips without losing information.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON-Schema fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaNode {
    /// `true` / `false` schema
    Bool(bool),
    /// Regular schema object
    Object(Box<SchemaObject>),
}

/// A schema object with its structural keywords broken out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaObject {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_tags: Option<TypeTags>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,

    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,

    /// Every keyword not modelled above (`required`, `enum`, `$ref`, ...)
    #[serde(flatten)]
    pub keywords: Map<String, Value>,
}

/// The `type` keyword: a single tag or a set of tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeTags {
    One(String),
    Many(Vec<String>),
}

/// The `items` keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Items {
    /// Tuple form: one schema per position
    Tuple(Vec<SchemaNode>),
    /// Every element shares one schema
    Single(Box<SchemaNode>),
}

/// The `additionalProperties` keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<SchemaNode>),
}

impl TypeTags {
    pub fn contains(&self, tag: &str) -> bool {
        match self {
            TypeTags::One(t) => t == tag,
            TypeTags::Many(tags) => tags.iter().any(|t| t == tag),
        }
    }

    /// Tags in declaration order
    pub fn tags(&self) -> Vec<&str> {
        match self {
            TypeTags::One(t) => vec![t.as_str()],
            TypeTags::Many(tags) => tags.iter().map(String::as_str).collect(),
        }
    }
}

impl SchemaObject {
    /// Does `type` declare (or include) this tag?
    pub fn has_type(&self, tag: &str) -> bool {
        self.type_tags.as_ref().is_some_and(|t| t.contains(tag))
    }

    /// Raw access to an unmodelled keyword
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keywords.get(name)
    }

    /// Names listed in `required`
    pub fn required(&self) -> Vec<&str> {
        self.keyword("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn description(&self) -> Option<&str> {
        self.keyword("description").and_then(Value::as_str)
    }
}

impl SchemaNode {
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    pub fn to_value(&self) -> Value {
        // Serializing plain data into a Value cannot fail
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    pub fn as_object(&self) -> Option<&SchemaObject> {
        match self {
            SchemaNode::Object(obj) => Some(obj),
            SchemaNode::Bool(_) => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.as_object().and_then(|o| o.title.as_deref())
    }
}

impl From<SchemaObject> for SchemaNode {
    fn from(obj: SchemaObject) -> Self {
        SchemaNode::Object(Box::new(obj))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_structural_keywords() {
        let node = SchemaNode::from_value(json!({
            "type": ["object", "null"],
            "properties": {"a": {"type": "string"}},
            "additionalProperties": false,
            "required": ["a"]
        }))
        .unwrap();

        let obj = node.as_object().unwrap();
        assert!(obj.has_type("object"));
        assert!(obj.has_type("null"));
        assert_eq!(obj.required(), vec!["a"]);
        assert_eq!(
            obj.additional_properties,
            Some(AdditionalProperties::Allowed(false))
        );
    }

    #[test]
    fn test_items_forms() {
        let single = SchemaNode::from_value(json!({"type": "array", "items": {"type": "string"}})).unwrap();
        assert!(matches!(single.as_object().unwrap().items, Some(Items::Single(_))));

        let tuple = SchemaNode::from_value(json!({"type": "array", "items": [{"type": "string"}, true]})).unwrap();
        match &tuple.as_object().unwrap().items {
            Some(Items::Tuple(items)) => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[1], SchemaNode::Bool(true));
            }
            other => panic!("Expected tuple items, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_keywords_round_trip() {
        let value = json!({
            "type": "string",
            "description": "A name",
            "minLength": 1,
            "x-custom": {"nested": [1, 2]}
        });
        let node = SchemaNode::from_value(value.clone()).unwrap();
        assert_eq!(node.to_value(), value);
    }
}
