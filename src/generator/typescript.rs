//! TypeScript emitter: `export enum` and `export interface` declarations.

use super::{Generator, TypeSyntax};
use crate::model::{Config, Enum, Interface};
use crate::types::Primitive;

#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScriptGenerator;

impl TypeSyntax for TypeScriptGenerator {
    fn primitive(&self, primitive: Primitive) -> String {
        match primitive {
            Primitive::String => "string",
            Primitive::Int | Primitive::Float => "number",
            Primitive::Bool => "boolean",
        }
        .to_string()
    }

    fn list(&self, inner: String) -> String {
        format!("{inner}[]")
    }

    fn optional(&self, inner: String) -> String {
        format!("{inner} | null")
    }

    fn dict(&self, key: String, value: String) -> String {
        format!("Record<{key}, {value}>")
    }
}

impl Generator for TypeScriptGenerator {
    fn generate(&self, interfaces: &[Interface], enums: &[Enum], _config: &Config) -> String {
        let mut lines: Vec<String> = Vec::new();

        for e in enums {
            lines.push(format!("export enum {} {{", e.name));
            for value in &e.values {
                lines.push(format!("  {value} = \"{value}\","));
            }
            lines.push("}".to_string());
            lines.push(String::new());
        }

        for iface in interfaces {
            let ext = iface
                .parent
                .as_ref()
                .map(|p| format!(" extends {p}"))
                .unwrap_or_default();
            lines.push(format!("export interface {}{} {{", iface.name, ext));
            for f in &iface.fields {
                let optional = if f.ty.is_optional() { "?" } else { "" };
                lines.push(format!("  {}{}: {};", f.name, optional, self.render_type(&f.ty)));
            }
            lines.push("}".to_string());
            lines.push(String::new());
        }

        lines.join("\n")
    }
}
