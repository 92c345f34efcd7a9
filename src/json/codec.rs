//! Purpose: Convert between JSON text and the ordered key/value tree.
//! Exports: `parse`, `serialize`, `serialize_pretty`, `ParseFailureCategory`.
//! Role: Codec collaborator for `Document`; wraps serde_json failures.
//! Invariants: Top-level text must be a JSON object; anything else is a decode error.
//! Invariants: Key order of the input is preserved (serde_json `preserve_order`).
//! Notes: Unknown fields are irrelevant for a generic tree; list promotion lives in accessors.

use serde_json::{Map, Value};

use crate::core::error::{Error, ErrorKind};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    Io,
}

impl ParseFailureCategory {
    pub fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Io => "io",
        }
    }
}

pub fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    use serde_json::error::Category;
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Eof => ParseFailureCategory::Eof,
        Category::Data => ParseFailureCategory::Data,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    format!(
        "parse category: {}; line {} column {}; context: {context}",
        categorize_error(err).label(),
        err.line(),
        err.column()
    )
}

/// Parses a JSON object into an ordered map.
pub fn parse(text: &str) -> Result<Map<String, Value>, Error> {
    parse_with_context(text, "document")
}

pub fn parse_with_context(text: &str, context: &str) -> Result<Map<String, Value>, Error> {
    serde_json::from_str::<Map<String, Value>>(text).map_err(|err| {
        tracing::debug!(
            category = categorize_error(&err).label(),
            context,
            "json decode failed"
        );
        let message = match categorize_error(&err) {
            ParseFailureCategory::Data => "expected a JSON object",
            _ => "invalid JSON",
        };
        Error::new(ErrorKind::Decode)
            .with_message(message)
            .with_hint(hint_for_error(&err, context))
            .with_source(err)
    })
}

pub fn serialize(map: &Map<String, Value>) -> Result<String, Error> {
    serde_json::to_string(map).map_err(encode_error)
}

pub fn serialize_pretty(map: &Map<String, Value>) -> Result<String, Error> {
    serde_json::to_string_pretty(map).map_err(encode_error)
}

fn encode_error(err: serde_json::Error) -> Error {
    Error::new(ErrorKind::Encode)
        .with_message("failed to encode document")
        .with_source(err)
}

#[cfg(test)]
mod tests {
    use super::{ParseFailureCategory, categorize_error, hint_for_error, parse, serialize};
    use crate::core::error::ErrorKind;
    use serde_json::Value;

    #[test]
    fn parse_keeps_key_order() {
        let map = parse(r#"{"z":1,"a":2,"m":3}"#).expect("parse");
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
        assert_eq!(serialize(&map).expect("serialize"), r#"{"z":1,"a":2,"m":3}"#);
    }

    #[test]
    fn syntax_errors_map_to_decode() {
        let err = parse(r#"{"a":}"#).expect_err("syntax error");
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.message(), Some("invalid JSON"));
        assert!(err.hint().unwrap_or_default().contains("parse category: syntax"));
    }

    #[test]
    fn non_object_top_level_is_rejected() {
        let err = parse("[1,2,3]").expect_err("array is not a document");
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.message(), Some("expected a JSON object"));
    }

    #[test]
    fn category_mapping_covers_eof() {
        let err = serde_json::from_str::<Value>(r#"{"a":[1,2"#).unwrap_err();
        assert_eq!(categorize_error(&err), ParseFailureCategory::Eof);
        let hint = hint_for_error(&err, "test.context");
        assert!(hint.contains("parse category: eof"));
        assert!(hint.contains("context: test.context"));
    }
}
