//! Error types for the schema compiler

use std::path::PathBuf;

use thiserror::Error;

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, Error>;

/// A malformed schema source.
///
/// This is the only error a parse of in-memory text can produce. Any
/// malformed line aborts the whole parse; no partial model is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}{message}", line_prefix(.line))]
pub struct SyntaxError {
    /// Human-readable description of the problem
    pub message: String,
    /// 1-based source line, when the problem is tied to one
    pub line: Option<usize>,
}

impl SyntaxError {
    /// Create an error pinned to a source line
    pub fn at(line: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
        }
    }

    /// Create an error with no line information
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }
}

fn line_prefix(line: &Option<usize>) -> String {
    line.map(|n| format!("Line {n}: ")).unwrap_or_default()
}

/// Errors surfaced to callers that hand the compiler a file path
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Expected a .yaif file, got: {found} ({})", .path.display())]
    InvalidExtension { path: PathBuf, found: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display_with_line() {
        let err = SyntaxError::at(7, "Unknown type: 'Bar'");
        assert_eq!(err.to_string(), "Line 7: Unknown type: 'Bar'");
    }

    #[test]
    fn test_syntax_error_display_without_line() {
        let err = SyntaxError::new("Circular inheritance detected: A -> A");
        assert_eq!(err.to_string(), "Circular inheritance detected: A -> A");
    }

    #[test]
    fn test_syntax_error_is_transparent() {
        let err: Error = SyntaxError::at(2, "Unexpected syntax: 'x'").into();
        assert_eq!(err.to_string(), "Line 2: Unexpected syntax: 'x'");
    }
}
