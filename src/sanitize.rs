//! Line Sanitizer
//!
//! Strips trailing `#` comments from a source line. A `#` is kept when it
//! sits inside a quoted run or starts a short hex color literal such as
//! `#fff` or `#e05c2a`.

use std::sync::LazyLock;

use regex::Regex;

/// 3 to 6 hex digits followed by a word boundary
static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-fA-F]{3,6}\b").unwrap());

/// Remove comment text from `line`, trimming trailing whitespace.
///
/// Quote tracking remembers which quote character opened the run, so a `'`
/// inside `"..."` does not close it (and vice versa). There are no error
/// cases: an unterminated quote simply protects the rest of the line.
pub fn strip_comment(line: &str) -> &str {
    let mut in_quote: Option<char> = None;

    for (idx, ch) in line.char_indices() {
        match in_quote {
            Some(q) if ch == q => in_quote = None,
            Some(_) => {}
            None if ch == '"' || ch == '\'' => in_quote = Some(ch),
            None if ch == '#' => {
                if !HEX_COLOR.is_match(&line[idx + 1..]) {
                    return line[..idx].trim_end();
                }
            }
            None => {}
        }
    }

    line.trim_end()
}
