//! Schema Parser
//!
//! Compiles `.yaif` source text into a [`Schema`]:
//!
//! 1. [`scan`] splits the text into logical lines (headers, body text,
//!    block scalars).
//! 2. A pre-pass collects every declared interface and enum name, so field
//!    types may reference names declared further down the file.
//! 3. The block state machine builds the model line by line.
//! 4. [`crate::validate`] checks the finished inheritance graph.
//!
//! A `Parser` holds only compiled patterns. All per-parse state lives in
//! locals threaded through [`Parser::step`], so one parser can be shared
//! across threads and reused.

pub mod scan;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use regex::Regex;

use crate::annotation::{self, AnnotationValue};
use crate::error::{Error, Result, SyntaxError};
use crate::model::{Config, Enum, Field, Interface, Schema};
use crate::types::parse_type;
use crate::validate;

use self::scan::{Header, LineKind, Scanner, SourceLine};

/// Required file suffix for [`Parser::parse_file`]
pub const FILE_EXTENSION: &str = "yaif";

/// Which block the current line belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Before the first header
    None,
    Config,
    /// Index into the interfaces being built
    Interface(usize),
    /// Index into the enums being built
    Enum(usize),
}

/// Names declared anywhere in the source
#[derive(Debug, Default)]
struct DeclaredNames {
    interfaces: HashSet<String>,
    /// Interfaces and enums together, for type references
    all: HashSet<String>,
}

impl DeclaredNames {
    fn collect(lines: &[SourceLine]) -> Self {
        let mut names = Self::default();
        for line in lines {
            match &line.kind {
                LineKind::Header(Header::Interface { name, .. }) => {
                    names.interfaces.insert(name.clone());
                    names.all.insert(name.clone());
                }
                LineKind::Header(Header::Enum { name }) => {
                    names.all.insert(name.clone());
                }
                _ => {}
            }
        }
        names
    }
}

/// Model under construction
#[derive(Debug, Default)]
struct Builder {
    interfaces: Vec<Interface>,
    enums: Vec<Enum>,
    config: Config,
    /// Header line of each interface, for validator diagnostics
    header_lines: HashMap<String, usize>,
}

impl Builder {
    fn finish(self) -> std::result::Result<Schema, SyntaxError> {
        validate::check_inheritance(&self.interfaces, &self.header_lines)?;
        Ok(Schema {
            interfaces: self.interfaces,
            enums: self.enums,
            config: self.config,
        })
    }
}

/// The schema compiler
pub struct Parser {
    scanner: Scanner,
    key_value: Regex,
    enum_values: Regex,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            scanner: Scanner::new(),
            key_value: Regex::new(r"^(\w+)\s*:\s*(.+)$").unwrap(),
            enum_values: Regex::new(r"^[\w\s,]+$").unwrap(),
        }
    }

    /// Parse source text into a validated schema
    pub fn parse(&self, source: &str) -> std::result::Result<Schema, SyntaxError> {
        let lines = self.scanner.scan(source);
        let names = DeclaredNames::collect(&lines);

        let mut builder = Builder::default();
        let mut state = State::None;
        for line in &lines {
            state = self.step(state, line, &names, &mut builder)?;
        }

        builder.finish()
    }

    /// Read and parse a `.yaif` file
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Schema> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
            let found = path
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();
            return Err(Error::InvalidExtension {
                path: path.to_path_buf(),
                found,
            });
        }

        let source = std::fs::read_to_string(path)?;
        Ok(self.parse(&source)?)
    }

    /// Process one logical line and return the next state
    fn step(
        &self,
        state: State,
        line: &SourceLine,
        names: &DeclaredNames,
        builder: &mut Builder,
    ) -> std::result::Result<State, SyntaxError> {
        match &line.kind {
            LineKind::Header(header) => self.enter(header, line.number, names, builder),
            LineKind::Block { key, value } => {
                builder.config.insert(key.clone(), value.clone());
                Ok(state)
            }
            LineKind::Text(text) => {
                match state {
                    State::Config => self.config_line(text, line.number, &mut builder.config)?,
                    State::Enum(idx) => {
                        self.enum_line(text, line.number, &mut builder.enums[idx])?;
                    }
                    State::Interface(idx) => {
                        let field = self.field_line(text, line.number, names)?;
                        builder.interfaces[idx].fields.push(field);
                    }
                    State::None => {
                        let message = if self.key_value.is_match(text) {
                            "Field defined outside of an interface block".to_string()
                        } else {
                            format!("Unexpected syntax: '{text}'")
                        };
                        return Err(SyntaxError::at(line.number, message));
                    }
                }
                Ok(state)
            }
        }
    }

    fn enter(
        &self,
        header: &Header,
        number: usize,
        names: &DeclaredNames,
        builder: &mut Builder,
    ) -> std::result::Result<State, SyntaxError> {
        match header {
            Header::Config => Ok(State::Config),
            Header::Interface { name, parent } => {
                if let Some(parent) = parent {
                    if !names.interfaces.contains(parent) {
                        return Err(SyntaxError::at(
                            number,
                            format!("Unknown parent interface: '{parent}'"),
                        ));
                    }
                }
                builder.header_lines.insert(name.clone(), number);
                builder.interfaces.push(Interface::new(name.clone(), parent.clone()));
                Ok(State::Interface(builder.interfaces.len() - 1))
            }
            Header::Enum { name } => {
                builder.enums.push(Enum::new(name.clone()));
                Ok(State::Enum(builder.enums.len() - 1))
            }
        }
    }

    fn config_line(
        &self,
        text: &str,
        number: usize,
        config: &mut Config,
    ) -> std::result::Result<(), SyntaxError> {
        let caps = self
            .key_value
            .captures(text)
            .ok_or_else(|| SyntaxError::at(number, format!("Invalid config syntax: '{text}'")))?;

        let value = strip_outer_quotes(caps[2].trim());
        config.insert(&caps[1], value);
        Ok(())
    }

    fn enum_line(
        &self,
        text: &str,
        number: usize,
        target: &mut Enum,
    ) -> std::result::Result<(), SyntaxError> {
        if !self.enum_values.is_match(text) {
            return Err(SyntaxError::at(
                number,
                format!("Invalid enum value syntax: '{text}'"),
            ));
        }

        target.values.extend(
            text.split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string),
        );
        Ok(())
    }

    fn field_line(
        &self,
        text: &str,
        number: usize,
        names: &DeclaredNames,
    ) -> std::result::Result<Field, SyntaxError> {
        let caps = self
            .key_value
            .captures(text)
            .ok_or_else(|| SyntaxError::at(number, format!("Unexpected syntax: '{text}'")))?;

        let (clean, mut annotations) = annotation::extract(&caps[2]);

        let (type_text, mut default) = match clean.split_once('=') {
            Some((ty, default)) => (ty.trim().to_string(), Some(default.trim().to_string())),
            None => (clean, None),
        };
        if default.is_none() {
            default = annotations.remove("default").map(|v| match v {
                AnnotationValue::Flag => "True".to_string(),
                AnnotationValue::Text(text) => text,
            });
        }

        let ty = parse_type(&type_text, &names.all)
            .map_err(|e| SyntaxError::at(number, e.to_string()))?;

        Ok(Field {
            name: caps[1].to_string(),
            ty,
            type_text,
            default,
            annotations,
        })
    }
}

/// Strip one pair of matching outer quotes, keeping any inner quoting intact
/// (`"'Fraunces', serif"` becomes `'Fraunces', serif`)
fn strip_outer_quotes(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|&q| {
            value
                .strip_prefix(q)
                .and_then(|v| v.strip_suffix(q))
        })
        .unwrap_or(value)
}

/// Parse source text with a default [`Parser`]
pub fn parse(source: &str) -> std::result::Result<Schema, SyntaxError> {
    Parser::new().parse(source)
}

/// Read and parse a `.yaif` file with a default [`Parser`]
pub fn parse_file(path: impl AsRef<Path>) -> Result<Schema> {
    Parser::new().parse_file(path)
}
