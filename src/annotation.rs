//! Annotation Extractor
//!
//! Field lines may carry rendering hints after the type:
//!
//! ```text
//! bio: string @label="About me" @hidden @rows=4
//! ```
//!
//! Annotations never affect type validity; generators read them by key.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// `@key`, `@key="quoted value"` or `@key=bare.token`
static ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"@(\w+)(?:=(?:"([^"]*)"|([\w.#-]+)))?"#).unwrap());

/// Value attached to an annotation key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationValue {
    /// Flag-style `@hidden`, serialized as `true`
    Flag,
    /// `@key=value` or `@key="value"`, kept verbatim
    Text(String),
}

impl AnnotationValue {
    /// Text payload, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnnotationValue::Flag => None,
            AnnotationValue::Text(s) => Some(s),
        }
    }

    /// Truthiness: a flag is set, text is set unless it spells false
    pub fn is_truthy(&self) -> bool {
        match self {
            AnnotationValue::Flag => true,
            AnnotationValue::Text(s) => !matches!(s.to_lowercase().as_str(), "false" | "0" | "no" | ""),
        }
    }
}

/// Annotation key to value; later tokens with the same key win
pub type Annotations = BTreeMap<String, AnnotationValue>;

/// Split `text` into the remaining text and its annotations.
///
/// Matches are removed in a single non-overlapping pass, so removing one
/// token can never corrupt another. The remaining text is trimmed.
pub fn extract(text: &str) -> (String, Annotations) {
    let mut annotations = Annotations::new();
    let mut clean = String::with_capacity(text.len());
    let mut last = 0;

    for caps in ANNOTATION.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        clean.push_str(&text[last..whole.start()]);
        last = whole.end();

        let value = match caps.get(2).or_else(|| caps.get(3)) {
            Some(v) => AnnotationValue::Text(v.as_str().to_string()),
            None => AnnotationValue::Flag,
        };
        annotations.insert(caps[1].to_string(), value);
    }
    clean.push_str(&text[last..]);

    (clean.trim().to_string(), annotations)
}

impl Serialize for AnnotationValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AnnotationValue::Flag => serializer.serialize_bool(true),
            AnnotationValue::Text(s) => serializer.serialize_str(s),
        }
    }
}
