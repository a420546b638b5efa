//! Schema model
//!
//! The entity graph produced by a single parse. Everything here is built once
//! by the parser and never mutated afterwards; re-parsing is the only way to
//! get a changed model. Generators borrow it read-only.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Serialize, Serializer};

use crate::annotation::{AnnotationValue, Annotations};
use crate::types::TypeDescriptor;

/// A named attribute of an interface
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    /// Validated descriptor
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    /// Type exactly as written in the source
    pub type_text: String,
    /// Raw default text; interpretation is up to each generator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: Annotations,
}

impl Field {
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Annotation lookup by key
    pub fn annotation(&self, key: &str) -> Option<&AnnotationValue> {
        self.annotations.get(key)
    }

    /// Display label: `@label` text, falling back to the field name
    pub fn label(&self) -> &str {
        self.annotation("label")
            .and_then(AnnotationValue::as_text)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.name.as_str())
    }

    /// `@hidden` set (and not spelled false)
    pub fn is_hidden(&self) -> bool {
        self.annotation("hidden").is_some_and(AnnotationValue::is_truthy)
    }
}

/// A named record type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interface {
    pub name: String,
    /// Own fields in declaration order (inherited fields are not copied in)
    pub fields: Vec<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Interface {
    pub fn new(name: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            parent,
        }
    }

    /// Fields without a default first, then defaulted ones, each group in
    /// declaration order. Targets like Python dataclasses need this order.
    pub fn fields_reordered(&self) -> Vec<&Field> {
        let (plain, defaulted): (Vec<&Field>, Vec<&Field>) =
            self.fields.iter().partition(|f| !f.has_default());
        plain.into_iter().chain(defaulted).collect()
    }
}

/// A named closed set of string values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Enum {
    pub name: String,
    /// Declaration order; duplicates are kept
    pub values: Vec<String>,
}

impl Enum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }
}

/// The flat `[config]` block.
///
/// Keys are interpreted by convention; every accessor takes a fallback so
/// consumers never fail on a missing key. Entries keep declaration order and
/// a repeated key overwrites the value in its first position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    entries: Vec<(String, String)>,
}

impl Config {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let (key, value) = (key.into(), value.into());
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn get_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.get(key).unwrap_or(fallback)
    }

    /// `true`, `1` or `yes` (any case) are true; anything else is false
    pub fn get_bool(&self, key: &str, fallback: bool) -> bool {
        match self.get(key) {
            Some(v) => matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
            None => fallback,
        }
    }

    pub fn title(&self) -> &str {
        self.get_or("title", "YAIF App")
    }

    pub fn description(&self) -> &str {
        self.get_or("description", "")
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// A fully parsed and validated schema
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    pub interfaces: Vec<Interface>,
    pub enums: Vec<Enum>,
    pub config: Config,
}

impl Schema {
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    pub fn enumeration(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Inherited fields followed by the interface's own, root ancestor first.
    ///
    /// Shadowed names are not deduplicated. The walk stops at an unknown
    /// parent or on revisiting a name, which a validated schema never has.
    pub fn inherited_fields<'a>(&'a self, iface: &'a Interface) -> Vec<&'a Field> {
        let by_name: HashMap<&str, &Interface> =
            self.interfaces.iter().map(|i| (i.name.as_str(), i)).collect();

        let mut chain = vec![iface];
        let mut seen = HashSet::from([iface.name.as_str()]);
        let mut current = iface;
        while let Some(parent) = current.parent.as_deref().and_then(|p| by_name.get(p).copied()) {
            if !seen.insert(parent.name.as_str()) {
                break;
            }
            chain.push(parent);
            current = parent;
        }

        chain.iter().rev().flat_map(|i| i.fields.iter()).collect()
    }

    /// Human-readable parse summary, one line per entry
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Parsed {} interface(s), {} enum(s)",
            self.interfaces.len(),
            self.enums.len()
        )];

        if !self.config.is_empty() {
            let pairs: Vec<String> = self
                .config
                .iter()
                .map(|(k, v)| format!("{k}={v:?}"))
                .collect();
            lines.push(format!("  Config: {}", pairs.join(", ")));
        }
        for iface in &self.interfaces {
            let ext = iface
                .parent
                .as_ref()
                .map(|p| format!(" (extends {p})"))
                .unwrap_or_default();
            lines.push(format!("  - {}{} ({} fields)", iface.name, ext, iface.fields.len()));
        }
        for e in &self.enums {
            lines.push(format!("  - {} (enum: {} values)", e.name, e.values.len()));
        }

        lines
    }
}
