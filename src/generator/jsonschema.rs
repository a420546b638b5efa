//! JSON Schema emitter (draft-07).
//!
//! Enums and interfaces become entries under `definitions`. A parent is
//! expressed with `allOf` + `$ref` rather than by copying inherited fields.

use serde_json::{json, Map, Value};

use super::Generator;
use crate::model::{Config, Enum, Interface};
use crate::types::{Primitive, TypeDescriptor};

pub const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaGenerator;

impl JsonSchemaGenerator {
    /// Build the document as a JSON value
    pub fn document(&self, interfaces: &[Interface], enums: &[Enum], config: &Config) -> Value {
        let mut root = Map::new();
        root.insert("$schema".into(), json!(DRAFT_07));
        if !config.title().is_empty() {
            root.insert("title".into(), json!(config.title()));
        }
        if !config.description().is_empty() {
            root.insert("description".into(), json!(config.description()));
        }

        let mut definitions = Map::new();
        for e in enums {
            definitions.insert(e.name.clone(), json!({ "type": "string", "enum": e.values }));
        }
        for iface in interfaces {
            definitions.insert(iface.name.clone(), interface_definition(iface));
        }
        root.insert("definitions".into(), Value::Object(definitions));

        Value::Object(root)
    }
}

impl Generator for JsonSchemaGenerator {
    fn generate(&self, interfaces: &[Interface], enums: &[Enum], config: &Config) -> String {
        let doc = self.document(interfaces, enums, config);
        // Value serialization cannot fail: all keys are strings
        serde_json::to_string_pretty(&doc).unwrap_or_default()
    }
}

fn interface_definition(iface: &Interface) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for f in &iface.fields {
        let mut prop = type_schema(&f.ty);
        match &f.default {
            Some(default) => {
                if let Value::Object(obj) = &mut prop {
                    obj.insert("default".into(), convert_default(default));
                }
            }
            None if !f.ty.is_optional() => required.push(f.name.clone()),
            None => {}
        }
        properties.insert(f.name.clone(), prop);
    }

    let mut definition = Map::new();
    definition.insert("type".into(), json!("object"));
    definition.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        definition.insert("required".into(), json!(required));
    }

    match &iface.parent {
        Some(parent) => json!({
            "allOf": [
                { "$ref": format!("#/definitions/{parent}") },
                Value::Object(definition),
            ]
        }),
        None => Value::Object(definition),
    }
}

fn type_schema(ty: &TypeDescriptor) -> Value {
    match ty {
        TypeDescriptor::Primitive(p) => {
            let name = match p {
                Primitive::String => "string",
                Primitive::Int => "integer",
                Primitive::Float => "number",
                Primitive::Bool => "boolean",
            };
            json!({ "type": name })
        }
        TypeDescriptor::Named(name) => json!({ "$ref": format!("#/definitions/{name}") }),
        TypeDescriptor::List(inner) => json!({ "type": "array", "items": type_schema(inner) }),
        TypeDescriptor::Optional(inner) => {
            json!({ "oneOf": [type_schema(inner), { "type": "null" }] })
        }
        // JSON object keys are always strings, so the key type is dropped
        TypeDescriptor::Dict(_, value) => {
            json!({ "type": "object", "additionalProperties": type_schema(value) })
        }
    }
}

fn convert_default(raw: &str) -> Value {
    match raw.to_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        "none" | "null" => return Value::Null,
        "[]" => return json!([]),
        "{}" => return json!({}),
        _ => {}
    }
    if let Ok(n) = raw.parse::<i64>() {
        return json!(n);
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => json!(n),
        _ => json!(raw),
    }
}
