//! Code Generation
//!
//! Output targets driven off a finished [`Schema`].
//!
//! Architecture:
//! - Generator: pure function of (interfaces, enums, config) to text
//! - Target: registry of the built-in generators, selectable by name
//!
//! The key constraint: generators NEVER reparse source text. Field types
//! are consumed through the shared [`TypeDescriptor`], one recursive match
//! per target.

pub mod jsonschema;
pub mod python;
pub mod typescript;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Config, Enum, Interface, Schema};
use crate::types::{Primitive, TypeDescriptor};

pub use self::jsonschema::JsonSchemaGenerator;
pub use self::python::PythonGenerator;
pub use self::typescript::TypeScriptGenerator;

// =============================================================================
// Generator Contract
// =============================================================================

/// Every output target implements this.
///
/// Implementations must not fail on a validated model and must not keep
/// references to it beyond the call. Missing annotations or config keys
/// fall back to documented defaults.
pub trait Generator {
    fn generate(&self, interfaces: &[Interface], enums: &[Enum], config: &Config) -> String;

    /// Convenience wrapper over [`Generator::generate`]
    fn render(&self, schema: &Schema) -> String {
        self.generate(&schema.interfaces, &schema.enums, &schema.config)
    }
}

/// Target-specific spelling of each descriptor shape.
///
/// [`TypeSyntax::render_type`] does the recursion so each target only supplies
/// the leaves and wrappers.
pub trait TypeSyntax {
    fn primitive(&self, primitive: Primitive) -> String;

    fn named(&self, name: &str) -> String {
        name.to_string()
    }

    fn list(&self, inner: String) -> String;

    fn optional(&self, inner: String) -> String;

    fn dict(&self, key: String, value: String) -> String;

    fn render_type(&self, ty: &TypeDescriptor) -> String {
        match ty {
            TypeDescriptor::Primitive(p) => self.primitive(*p),
            TypeDescriptor::Named(name) => self.named(name),
            TypeDescriptor::List(inner) => {
                let inner = self.render_type(inner);
                self.list(inner)
            }
            TypeDescriptor::Optional(inner) => {
                let inner = self.render_type(inner);
                self.optional(inner)
            }
            TypeDescriptor::Dict(key, value) => {
                let (key, value) = (self.render_type(key), self.render_type(value));
                self.dict(key, value)
            }
        }
    }
}

// =============================================================================
// Target Registry
// =============================================================================

/// Built-in output targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Python,
    Typescript,
    Jsonschema,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Python, Target::Typescript, Target::Jsonschema];

    pub fn generator(self) -> Box<dyn Generator> {
        match self {
            Target::Python => Box::new(PythonGenerator),
            Target::Typescript => Box::new(TypeScriptGenerator),
            Target::Jsonschema => Box::new(JsonSchemaGenerator),
        }
    }

    /// File extension (with dot) for generated output
    pub fn extension(self) -> &'static str {
        match self {
            Target::Python => ".py",
            Target::Typescript => ".ts",
            Target::Jsonschema => ".json",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Target::Python => "python",
            Target::Typescript => "typescript",
            Target::Jsonschema => "jsonschema",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_every_target_renders_without_panicking() {
        let schema = parse(
            "[enum Role]\nadmin, guest\n[interface Base]\nid: int\n[interface User extends Base]\n\
             tags: dict[string, list[Role]]\nnick: optional[string]\n",
        )
        .unwrap();
        for target in Target::ALL {
            let out = target.generator().render(&schema);
            assert!(out.contains("User"), "{target} output missing User");
        }
    }

    #[test]
    fn test_target_serde_names() {
        let t: Target = serde_json::from_str("\"jsonschema\"").unwrap();
        assert_eq!(t, Target::Jsonschema);
        assert_eq!(Target::Typescript.to_string(), "typescript");
        assert_eq!(Target::Python.extension(), ".py");
    }
}
