//! YAIF schema compiler
//!
//! Compiles `.yaif` interface files into an immutable in-memory model and
//! renders that model through pluggable output generators.
//!
//! ## Source format
//!
//! ```text
//! [config]
//! title: My App
//! accent: "#e05c2a"        # hex colors survive comment stripping
//! description: |
//!   Multi-line text,
//!   kept verbatim.
//!
//! [enum Role]
//! admin, member, guest
//!
//! [interface User]
//! name: string @label="Full name"
//! age: optional[int] = 0
//! roles: list[Role]
//!
//! [interface Admin extends User]
//! level: int @hidden
//! ```
//!
//! ## Pipeline
//!
//! ```text
//! text ─▶ scan (sanitize, block scalars) ─▶ name pre-pass ─▶ block state machine
//!      ─▶ inheritance validation ─▶ Schema ─▶ Generator
//! ```
//!
//! Parsing is synchronous and keeps no global state. A [`Schema`] is never
//! mutated after it is returned, so it can be shared freely between threads.

pub mod annotation;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod sanitize;
pub mod types;
pub mod validate;

pub use annotation::{AnnotationValue, Annotations};
pub use config::ToolConfig;
pub use error::{Error, Result, SyntaxError};
pub use generator::{Generator, Target};
pub use model::{Config, Enum, Field, Interface, Schema};
pub use parser::{parse, parse_file, Parser};
pub use types::{parse_type, Primitive, TypeDescriptor};
