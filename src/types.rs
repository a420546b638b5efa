//! Type Grammar
//!
//! ```text
//! type      := primitive | named | "list[" type "]" | "optional[" type "]"
//!            | "dict[" type "," type "]"
//! primitive := "string" | "int" | "float" | "bool"      (case-insensitive)
//! named     := a declared interface or enum name          (case-sensitive)
//! ```
//!
//! Parsing and validation are the same step: [`parse_type`] only ever
//! returns descriptors whose named leaves are declared.

use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Deepest generic nesting accepted in a single type expression
pub const MAX_NESTING: usize = 64;

/// Built-in scalar kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Int,
    Float,
    Bool,
}

impl Primitive {
    /// Look up a keyword, ignoring case
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "string" => Some(Primitive::String),
            "int" => Some(Primitive::Int),
            "float" => Some(Primitive::Float),
            "bool" => Some(Primitive::Bool),
            _ => None,
        }
    }

    /// Canonical lowercase keyword
    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Int => "int",
            Primitive::Float => "float",
            Primitive::Bool => "bool",
        }
    }
}

/// Recursive, validated representation of a field's declared type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Primitive(Primitive),
    /// Reference to a declared interface or enum
    Named(String),
    List(Box<TypeDescriptor>),
    Optional(Box<TypeDescriptor>),
    Dict(Box<TypeDescriptor>, Box<TypeDescriptor>),
}

impl TypeDescriptor {
    /// Whether the outermost wrapper is `optional[...]`
    pub fn is_optional(&self) -> bool {
        matches!(self, TypeDescriptor::Optional(_))
    }

    /// Every `Named` leaf, depth-first, left to right
    pub fn named_refs(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_named(&mut out);
        out
    }

    fn collect_named<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeDescriptor::Primitive(_) => {}
            TypeDescriptor::Named(name) => out.push(name),
            TypeDescriptor::List(inner) | TypeDescriptor::Optional(inner) => {
                inner.collect_named(out);
            }
            TypeDescriptor::Dict(key, value) => {
                key.collect_named(out);
                value.collect_named(out);
            }
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(p) => f.write_str(p.keyword()),
            TypeDescriptor::Named(name) => f.write_str(name),
            TypeDescriptor::List(inner) => write!(f, "list[{inner}]"),
            TypeDescriptor::Optional(inner) => write!(f, "optional[{inner}]"),
            TypeDescriptor::Dict(key, value) => write!(f, "dict[{key}, {value}]"),
        }
    }
}

impl Serialize for TypeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Why a type expression was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Empty type expression")]
    Empty,

    #[error("Unknown type: '{0}'")]
    Unknown(String),

    #[error("dict expects 2 type params, got {found}: {params}")]
    DictArity { found: usize, params: String },

    #[error("Type nesting deeper than {} levels", MAX_NESTING)]
    TooDeep,
}

/// Parse and validate `text` against the set of declared names.
pub fn parse_type(text: &str, known: &HashSet<String>) -> Result<TypeDescriptor, TypeError> {
    parse_nested(text, known, 0)
}

fn parse_nested(
    text: &str,
    known: &HashSet<String>,
    depth: usize,
) -> Result<TypeDescriptor, TypeError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TypeError::Empty);
    }

    if let Some((head, inner)) = split_generic(text) {
        if depth >= MAX_NESTING {
            return Err(TypeError::TooDeep);
        }
        let parse = |part: &str| parse_nested(part, known, depth + 1).map(Box::new);
        return match head.as_str() {
            "list" => Ok(TypeDescriptor::List(parse(inner)?)),
            "optional" => Ok(TypeDescriptor::Optional(parse(inner)?)),
            _ => {
                let params = split_params(inner);
                let [key, value] = params.as_slice() else {
                    return Err(TypeError::DictArity {
                        found: params.len(),
                        params: inner.to_string(),
                    });
                };
                Ok(TypeDescriptor::Dict(parse(*key)?, parse(*value)?))
            }
        };
    }

    if let Some(p) = Primitive::from_keyword(text) {
        return Ok(TypeDescriptor::Primitive(p));
    }
    if known.contains(text) {
        return Ok(TypeDescriptor::Named(text.to_string()));
    }

    Err(TypeError::Unknown(text.to_string()))
}

/// `list[...]`, `optional[...]` or `dict[...]` (keyword in any case), split
/// into the lowercased keyword and everything between the first `[` and the
/// final `]`
fn split_generic(text: &str) -> Option<(String, &str)> {
    let open = text.find('[')?;
    let head = text[..open].to_ascii_lowercase();
    if !matches!(head.as_str(), "list" | "optional" | "dict") {
        return None;
    }
    let inner = text[open + 1..].strip_suffix(']')?;
    if inner.is_empty() {
        return None;
    }
    Some((head, inner))
}

/// Split generic parameters on commas at bracket depth zero
fn split_params(inner: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in inner.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&inner[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&inner[start..]);
    parts
}
