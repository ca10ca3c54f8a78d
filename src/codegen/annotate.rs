//! Schema Annotation Pass
//!
//! The type compiler names a generated type after its schema's `title`. An
//! anonymous object inside an array would otherwise collapse into an inline
//! type, so this pass gives every such object a title derived from its
//! location: `<root>_<segment>_<segment>...`, where segments are property
//! names, `item` for a single `items` schema and `item<N>` for tuple items.
//!
//! Objects reached through object properties (or `additionalProperties`) are
//! not "in an array" even when an ancestor was, and never get a synthetic
//! title.

use crate::schema::{AdditionalProperties, Items, SchemaNode, SchemaObject};

/// Annotate a copy of `schema`, using `root_title` as the root title (when
/// the root has none) and as the prefix for every synthetic title.
pub fn annotate(schema: &SchemaNode, root_title: &str) -> SchemaNode {
    let mut annotated = schema.clone();
    if let SchemaNode::Object(root) = &mut annotated {
        if root.title.is_none() {
            root.title = Some(root_title.to_string());
        }
        let mut path = Vec::new();
        walk_children(root, root_title, &mut path);
    }
    annotated
}

/// `<root>_<path>`, with an empty path standing for the array's own item
pub fn synthetic_title(root_title: &str, path: &[String]) -> String {
    if path.is_empty() {
        format!("{}_item", root_title)
    } else {
        format!("{}_{}", root_title, path.join("_"))
    }
}

fn visit(node: &mut SchemaNode, root_title: &str, path: &mut Vec<String>, in_array: bool) {
    let SchemaNode::Object(obj) = node else {
        return;
    };

    if in_array && obj.has_type("object") {
        let synthetic = synthetic_title(root_title, path);
        obj.title = Some(match obj.title.take() {
            Some(existing) => format!("{}_{}", synthetic, existing),
            None => synthetic,
        });
    }

    walk_children(obj, root_title, path);
}

fn walk_children(obj: &mut SchemaObject, root_title: &str, path: &mut Vec<String>) {
    if obj.has_type("array") {
        match &mut obj.items {
            Some(Items::Single(item)) => {
                path.push("item".to_string());
                visit(item, root_title, path, true);
                path.pop();
            }
            Some(Items::Tuple(items)) => {
                for (index, item) in items.iter_mut().enumerate() {
                    path.push(format!("item{}", index));
                    visit(item, root_title, path, true);
                    path.pop();
                }
            }
            None => {}
        }
    }

    if obj.has_type("object") {
        if let Some(properties) = &mut obj.properties {
            for (name, property) in properties.iter_mut() {
                path.push(name.clone());
                visit(property, root_title, path, false);
                path.pop();
            }
        }
        if let Some(AdditionalProperties::Schema(extra)) = &mut obj.additional_properties {
            path.push("additionalProperties".to_string());
            visit(extra, root_title, path, false);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn annotate_json(schema: Value, root: &str) -> Value {
        let node = SchemaNode::from_value(schema).unwrap();
        annotate(&node, root).to_value()
    }

    fn assignment_schema() -> Value {
        json!({
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "orderId": {"type": "integer"},
                    "assignment": {
                        "type": "object",
                        "properties": {
                            "selected": {
                                "type": ["object", "null"],
                                "properties": {
                                    "rvu": {"type": "number"},
                                    "radId": {"type": "integer"},
                                    "preferenceRules": {
                                        "type": "array",
                                        "items": {
                                            "type": "object",
                                            "properties": {
                                                "ruleId": {"type": "integer"},
                                                "ruleText": {"type": "string"}
                                            }
                                        }
                                    }
                                }
                            },
                            "matchedRads": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {"radName": {"type": "string"}}
                                }
                            }
                        }
                    },
                    "auditTrail": {
                        "type": "object",
                        "properties": {
                            "steps": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {"step_name": {"type": "string"}}
                                }
                            },
                            "result_code": {"type": "string"}
                        }
                    }
                }
            }
        })
    }

    #[test]
    fn test_titles_objects_in_arrays_at_all_levels() {
        let result = annotate_json(assignment_schema(), "Program");
        let item = &result["items"];

        assert_eq!(result["title"], "Program");
        assert_eq!(item["title"], "Program_item");
        assert_eq!(
            item["properties"]["assignment"]["properties"]["selected"]["properties"]["preferenceRules"]["items"]["title"],
            "Program_item_assignment_selected_preferenceRules_item"
        );
        assert_eq!(
            item["properties"]["assignment"]["properties"]["matchedRads"]["items"]["title"],
            "Program_item_assignment_matchedRads_item"
        );
        assert_eq!(
            item["properties"]["auditTrail"]["properties"]["steps"]["items"]["title"],
            "Program_item_auditTrail_steps_item"
        );

        // Plain object properties stay anonymous
        assert!(item["properties"]["assignment"].get("title").is_none());
        assert!(item["properties"]["assignment"]["properties"]["selected"].get("title").is_none());
        assert!(item["properties"]["auditTrail"].get("title").is_none());
    }

    #[test]
    fn test_input_is_not_mutated() {
        let node = SchemaNode::from_value(assignment_schema()).unwrap();
        let before = node.clone();
        let _ = annotate(&node, "Program");
        assert_eq!(node, before);
    }

    #[test]
    fn test_root_title_is_idempotent() {
        let node = SchemaNode::from_value(json!({"type": "object", "properties": {}})).unwrap();
        let once = annotate(&node, "Root");
        let twice = annotate(&once, "Root");
        assert_eq!(twice.title(), Some("Root"));
    }

    #[test]
    fn test_existing_root_title_is_kept() {
        let result = annotate_json(json!({"type": "object", "title": "Named"}), "Root");
        assert_eq!(result["title"], "Named");
    }

    #[test]
    fn test_existing_item_title_is_prefixed() {
        let result = annotate_json(
            json!({"type": "array", "items": {"type": "object", "title": "Row"}}),
            "Root",
        );
        assert_eq!(result["items"]["title"], "Root_item_Row");
    }

    #[test]
    fn test_tuple_items() {
        let result = annotate_json(
            json!({
                "type": "array",
                "items": [
                    {"type": "object", "properties": {"a": {"type": "string"}}},
                    {"type": "string"},
                    {"type": "object"}
                ]
            }),
            "Pair",
        );
        assert_eq!(result["items"][0]["title"], "Pair_item0");
        assert!(result["items"][1].get("title").is_none());
        assert_eq!(result["items"][2]["title"], "Pair_item2");
    }

    #[test]
    fn test_additional_properties_schema() {
        let result = annotate_json(
            json!({
                "type": "object",
                "additionalProperties": {
                    "type": "array",
                    "items": {"type": "object"}
                }
            }),
            "Map",
        );
        assert_eq!(
            result["additionalProperties"]["items"]["title"],
            "Map_additionalProperties_item"
        );
    }

    #[test]
    fn test_boolean_schemas_pass_through() {
        let result = annotate_json(
            json!({
                "type": "object",
                "properties": {"anything": true},
                "additionalProperties": false
            }),
            "Root",
        );
        assert_eq!(result["properties"]["anything"], json!(true));
        assert_eq!(result["additionalProperties"], json!(false));

        let bare = annotate(&SchemaNode::Bool(true), "Root");
        assert_eq!(bare, SchemaNode::Bool(true));
    }

    #[test]
    fn test_nested_arrays() {
        let result = annotate_json(
            json!({
                "type": "array",
                "items": {"type": "array", "items": {"type": "object"}}
            }),
            "Grid",
        );
        assert!(result["items"].get("title").is_none());
        assert_eq!(result["items"]["items"]["title"], "Grid_item_item");
    }

    #[test]
    fn test_synthetic_title_empty_path() {
        assert_eq!(synthetic_title("Root", &[]), "Root_item");
        assert_eq!(
            synthetic_title("Root", &["item".to_string(), "rows".to_string()]),
            "Root_item_rows"
        );
    }
}
