//! Python emitter: dataclasses and `Enum` classes.
//!
//! Annotations are ignored. `description` from the config block becomes the
//! module docstring.

use super::{Generator, TypeSyntax};
use crate::model::{Config, Enum, Interface};
use crate::types::Primitive;

#[derive(Debug, Clone, Copy, Default)]
pub struct PythonGenerator;

impl TypeSyntax for PythonGenerator {
    fn primitive(&self, primitive: Primitive) -> String {
        match primitive {
            Primitive::String => "str",
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::Bool => "bool",
        }
        .to_string()
    }

    fn list(&self, inner: String) -> String {
        format!("list[{inner}]")
    }

    fn optional(&self, inner: String) -> String {
        format!("Optional[{inner}]")
    }

    fn dict(&self, key: String, value: String) -> String {
        format!("dict[{key}, {value}]")
    }
}

impl Generator for PythonGenerator {
    fn generate(&self, interfaces: &[Interface], enums: &[Enum], config: &Config) -> String {
        let mut lines: Vec<String> = Vec::new();

        let description = config.description();
        if !description.is_empty() {
            lines.push(format!("\"\"\"{description}\"\"\""));
            lines.push(String::new());
        }
        lines.extend(
            [
                "from __future__ import annotations",
                "from dataclasses import dataclass, field",
                "from enum import Enum",
                "from typing import Optional",
                "",
            ]
            .map(String::from),
        );

        for e in enums {
            lines.push(format!("class {}(Enum):", e.name));
            for value in &e.values {
                lines.push(format!("    {} = \"{}\"", value.to_uppercase(), value));
            }
            lines.push(String::new());
        }

        for iface in interfaces {
            let parent = iface
                .parent
                .as_ref()
                .map(|p| format!("({p})"))
                .unwrap_or_default();
            lines.push("@dataclass".to_string());
            lines.push(format!("class {}{}:", iface.name, parent));

            let ordered = iface.fields_reordered();
            if ordered.is_empty() {
                lines.push("    pass".to_string());
            }
            for f in ordered {
                let ty = self.render_type(&f.ty);
                match f.default.as_deref().map(convert_default) {
                    Some(default) => lines.push(format!("    {}: {} = {}", f.name, ty, default)),
                    None => lines.push(format!("    {}: {}", f.name, ty)),
                }
            }
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

fn convert_default(raw: &str) -> String {
    match raw.to_lowercase().as_str() {
        "true" => "True".to_string(),
        "false" => "False".to_string(),
        "none" | "null" => "None".to_string(),
        "[]" => "field(default_factory=list)".to_string(),
        "{}" => "field(default_factory=dict)".to_string(),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn test_dataclass_output() {
        let schema = parse(
            "[config]\ndescription: Shop models\n[enum Role]\nadmin, guest\n\
             [interface User]\nactive: bool = true\nname: string\ntags: list[string] = []\n\
             meta: optional[dict[string, Role]]\n[interface Empty extends User]\n",
        )
        .unwrap();
        let out = PythonGenerator.render(&schema);

        assert!(out.starts_with("\"\"\"Shop models\"\"\"\n"));
        assert!(out.contains("class Role(Enum):\n    ADMIN = \"admin\"\n    GUEST = \"guest\"\n"));
        assert!(out.contains(
            "@dataclass\nclass User:\n    name: str\n    meta: Optional[dict[str, Role]]\n    \
             active: bool = True\n    tags: list[str] = field(default_factory=list)\n"
        ));
        assert!(out.contains("class Empty(User):\n    pass\n"));
    }

    #[test]
    fn test_convert_default() {
        assert_eq!(convert_default("NULL"), "None");
        assert_eq!(convert_default("{}"), "field(default_factory=dict)");
        assert_eq!(convert_default("\"x\""), "\"x\"");
    }
}
