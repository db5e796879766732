//! # Input Decoding
//!
//! Turns raw input bytes into a [`Document`]. Two steps:
//!
//! 1. [`decode_text`] strips a UTF-8 byte order mark and decodes the rest,
//!    replacing invalid sequences instead of failing.
//! 2. [`parse_document`] parses YAML text with `serde_yaml` and converts the
//!    result into the closed [`Document`] tree.

use std::borrow::Cow;

use crate::document::Document;
use crate::error::DocumentError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode raw bytes as UTF-8 text, dropping a leading byte order mark.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    String::from_utf8_lossy(body)
}

/// Parse YAML text into a [`Document`].
///
/// Blank input is a valid, empty YAML stream and yields [`Document::Null`].
///
/// # Errors
///
/// Returns [`DocumentError::Yaml`] for malformed YAML and
/// [`DocumentError::UnsupportedKey`] for mapping keys that have no string form.
pub fn parse_document(text: &str) -> Result<Document, DocumentError> {
    if text.trim().is_empty() {
        return Ok(Document::Null);
    }
    let value: serde_yaml::Value = serde_yaml::from_str(text)?;
    Document::from_yaml(value)
}

/// Decode then parse raw input bytes.
pub fn parse_bytes(bytes: &[u8]) -> Result<Document, DocumentError> {
    parse_document(&decode_text(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bom_is_stripped() {
        let text = decode_text(b"\xEF\xBB\xBFkey: value");
        assert_eq!(text, "key: value");
    }

    #[test]
    fn text_without_bom_is_unchanged() {
        assert_eq!(decode_text(b"key: value"), "key: value");
    }

    #[test]
    fn multibyte_utf8_decodes() {
        let text = decode_text("NodeName: Zürich – 東京".as_bytes());
        assert_eq!(text, "NodeName: Zürich – 東京");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        let text = decode_text(b"a: \xFF\xFE");
        assert!(text.starts_with("a: "));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn parse_bytes_with_bom() {
        let doc = parse_bytes(b"\xEF\xBB\xBFOrgContents:\n  Branch: []\n").unwrap();
        assert!(doc.get_path(&["OrgContents", "Branch"]).is_some());
    }

    #[test]
    fn blank_input_is_null() {
        assert_eq!(parse_document("").unwrap(), Document::Null);
        assert_eq!(parse_document("  \n\n").unwrap(), Document::Null);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = parse_document("a: [1, 2\nb: }").unwrap_err();
        assert!(matches!(err, DocumentError::Yaml(_)), "got: {err}");
    }
}
