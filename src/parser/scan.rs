//! Lexical pass
//!
//! Turns raw source text into numbered logical lines: section headers, body
//! text (comment-stripped and trimmed), and config block scalars collected
//! verbatim. Blank and comment-only lines are dropped here.

use regex::Regex;

use crate::sanitize::strip_comment;

/// A bracketed section header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    Config,
    Interface { name: String, parent: Option<String> },
    Enum { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Header(Header),
    /// Sanitized, trimmed body line
    Text(String),
    /// `key: |` plus its collected body, already dedented and joined
    Block { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number of the first physical line
    pub number: usize,
    pub kind: LineKind,
}

pub struct Scanner {
    interface_header: Regex,
    enum_header: Regex,
    config_header: Regex,
    block_key: Regex,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            interface_header: Regex::new(
                r"^\[interface\s+([A-Z][A-Za-z0-9_]*)(?:\s+extends\s+([A-Z][A-Za-z0-9_]*))?\]$",
            )
            .unwrap(),
            enum_header: Regex::new(r"^\[enum\s+([A-Z][A-Za-z0-9_]*)\]$").unwrap(),
            config_header: Regex::new(r"(?i)^\[config\]$").unwrap(),
            block_key: Regex::new(r"^(\w+)\s*:\s*\|$").unwrap(),
        }
    }

    /// Recognize a section header on an already sanitized, trimmed line
    pub fn header(&self, line: &str) -> Option<Header> {
        if self.config_header.is_match(line) {
            return Some(Header::Config);
        }
        if let Some(caps) = self.interface_header.captures(line) {
            return Some(Header::Interface {
                name: caps[1].to_string(),
                parent: caps.get(2).map(|m| m.as_str().to_string()),
            });
        }
        self.enum_header.captures(line).map(|caps| Header::Enum {
            name: caps[1].to_string(),
        })
    }

    pub fn scan(&self, source: &str) -> Vec<SourceLine> {
        let raw: Vec<&str> = source.lines().collect();
        let mut out = Vec::new();
        let mut in_config = false;
        let mut i = 0;

        while i < raw.len() {
            let number = i + 1;
            let physical = raw[i];
            let line = strip_comment(physical).trim();
            i += 1;

            if line.is_empty() {
                continue;
            }

            if let Some(header) = self.header(line) {
                in_config = header == Header::Config;
                out.push(SourceLine {
                    number,
                    kind: LineKind::Header(header),
                });
                continue;
            }

            if in_config {
                if let Some(caps) = self.block_key.captures(line) {
                    let (value, consumed) = self.collect_block(&raw[i..], indent_of(physical));
                    i += consumed;
                    out.push(SourceLine {
                        number,
                        kind: LineKind::Block {
                            key: caps[1].to_string(),
                            value,
                        },
                    });
                    continue;
                }
            }

            out.push(SourceLine {
                number,
                kind: LineKind::Text(line.to_string()),
            });
        }

        out
    }

    /// Collect a block scalar body following a `key: |` line.
    ///
    /// Body lines must be indented deeper than the key. The first non-blank
    /// body line fixes the base indentation; the block ends at the first
    /// non-blank line indented less than that, or at a section header.
    /// Returns the joined value and the number of physical lines consumed.
    fn collect_block(&self, rest: &[&str], key_indent: usize) -> (String, usize) {
        let mut body: Vec<&str> = Vec::new();
        let mut base: Option<usize> = None;
        let mut consumed = 0;

        for line in rest {
            if line.trim().is_empty() {
                body.push("");
                consumed += 1;
                continue;
            }

            let indent = indent_of(line);
            if indent < base.unwrap_or(key_indent + 1)
                || self.header(strip_comment(line).trim()).is_some()
            {
                break;
            }

            let base = *base.get_or_insert(indent);
            body.push(line[base..].trim_end());
            consumed += 1;
        }

        while body.last() == Some(&"") {
            body.pop();
        }

        (body.join("\n"), consumed)
    }
}

fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start_matches([' ', '\t']).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<LineKind> {
        Scanner::new().scan(source).into_iter().map(|l| l.kind).collect()
    }

    #[test]
    fn test_headers() {
        let scanner = Scanner::new();
        assert_eq!(scanner.header("[CONFIG]"), Some(Header::Config));
        assert_eq!(
            scanner.header("[interface Admin extends User]"),
            Some(Header::Interface {
                name: "Admin".into(),
                parent: Some("User".into())
            })
        );
        assert_eq!(
            scanner.header("[enum Role]"),
            Some(Header::Enum { name: "Role".into() })
        );
        assert_eq!(scanner.header("[interface user]"), None);
        assert_eq!(scanner.header("[enum Role extends X]"), None);
    }

    #[test]
    fn test_blank_and_comment_lines_dropped() {
        let lines = Scanner::new().scan("# top\n\n[interface A]  # trailing\n  id: int # pk\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].number, 3);
        assert_eq!(lines[1].number, 4);
        assert_eq!(lines[1].kind, LineKind::Text("id: int".into()));
    }

    #[test]
    fn test_block_scalar() {
        let source = "[config]\ndescription: |\n  first # not a comment\n\n    indented\n\ntitle: Shop\n";
        assert_eq!(
            kinds(source),
            vec![
                LineKind::Header(Header::Config),
                LineKind::Block {
                    key: "description".into(),
                    value: "first # not a comment\n\n  indented".into()
                },
                LineKind::Text("title: Shop".into()),
            ]
        );
    }

    #[test]
    fn test_block_scalar_line_numbers_advance() {
        let lines = Scanner::new().scan("[config]\nnotes: |\n  a\n  b\nnext: 1\n");
        assert_eq!(lines[2].number, 5);
    }

    #[test]
    fn test_block_scalar_ends_at_header_and_eof() {
        let source = "[config]\nnotes: |\n  only line\n[interface A]\n";
        let ks = kinds(source);
        assert_eq!(
            ks[1],
            LineKind::Block {
                key: "notes".into(),
                value: "only line".into()
            }
        );
        assert!(matches!(ks[2], LineKind::Header(Header::Interface { .. })));

        let ks = kinds("[config]\nnotes: |\n    tail\n");
        assert_eq!(
            ks[1],
            LineKind::Block {
                key: "notes".into(),
                value: "tail".into()
            }
        );
    }

    #[test]
    fn test_block_scalar_without_body_is_empty() {
        let ks = kinds("[config]\nnotes: |\ntitle: x\n");
        assert_eq!(
            ks[1],
            LineKind::Block {
                key: "notes".into(),
                value: String::new()
            }
        );
        assert_eq!(ks[2], LineKind::Text("title: x".into()));
    }

    #[test]
    fn test_pipe_outside_config_is_text() {
        let ks = kinds("[interface A]\nnotes: |\n");
        assert_eq!(ks[1], LineKind::Text("notes: |".into()));
    }
}
