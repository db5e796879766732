//! # Decoded Document
//!
//! The generic tree produced by parsing YAML input, before any schema is
//! applied. Validation only ever reads it.
//!
//! ## Ordering Invariant
//!
//! [`Document::Mapping`] is backed by an [`IndexMap`], so keys iterate in
//! the order the source declared them. Tree validation depends on this for
//! its per-level field walk and for the line-hint arithmetic.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::DocumentError;

/// Numeric scalar as produced by the YAML parser.
pub use serde_yaml::Number;

/// A decoded YAML value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    /// YAML `null`, `~` or an empty scalar.
    Null,
    /// YAML `true` / `false`.
    Bool(bool),
    /// Unquoted integer or float.
    Number(Number),
    /// Quoted or plain text.
    String(String),
    /// Ordered sequence.
    Sequence(Vec<Document>),
    /// String-keyed mapping in source order.
    Mapping(IndexMap<String, Document>),
}

impl Document {
    /// Convert a parsed `serde_yaml::Value` into a [`Document`].
    ///
    /// String keys are kept as-is; numeric and boolean keys are stringified.
    /// YAML tags are dropped and their inner value kept.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::UnsupportedKey`] for null, sequence or
    /// mapping keys.
    pub fn from_yaml(value: serde_yaml::Value) -> Result<Self, DocumentError> {
        convert(value, &mut Vec::new())
    }

    /// Human name of this value's variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Null => "null",
            Document::Bool(_) => "boolean",
            Document::Number(_) => "number",
            Document::String(_) => "string",
            Document::Sequence(_) => "sequence",
            Document::Mapping(_) => "mapping",
        }
    }

    /// True for sequences and mappings, the values tree validation descends into.
    pub fn is_structured(&self) -> bool {
        matches!(self, Document::Sequence(_) | Document::Mapping(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    pub fn as_sequence(&self) -> Option<&[Document]> {
        match self {
            Document::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Document>> {
        match self {
            Document::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a key in a mapping. Returns `None` for every other variant.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Follow a chain of mapping keys from this value.
    pub fn get_path(&self, path: &[&str]) -> Option<&Document> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Number of own keys: mapping entries or sequence items. Scalars have none.
    pub fn len(&self) -> usize {
        match self {
            Document::Sequence(items) => items.len(),
            Document::Mapping(map) => map.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `key` is one of this value's own keys.
    ///
    /// Sequence keys are the decimal indices `"0"`, `"1"`, ...
    pub fn has_key(&self, key: &str) -> bool {
        match self {
            Document::Mapping(map) => map.contains_key(key),
            Document::Sequence(items) => key.parse::<usize>().is_ok_and(|i| i < items.len()),
            _ => false,
        }
    }

    /// Own key/value pairs in enumeration order.
    ///
    /// Mappings yield their keys in source order. Sequences yield their
    /// indices rendered as decimal strings. Scalars yield nothing.
    pub fn entries(&self) -> Vec<(Cow<'_, str>, &Document)> {
        match self {
            Document::Mapping(map) => map
                .iter()
                .map(|(k, v)| (Cow::Borrowed(k.as_str()), v))
                .collect(),
            Document::Sequence(items) => items
                .iter()
                .enumerate()
                .map(|(i, v)| (Cow::Owned(i.to_string()), v))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Render this value back to YAML text.
    pub fn to_yaml_string(&self) -> Result<String, DocumentError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Document::Null => f.write_str("null"),
            Document::Bool(b) => write!(f, "{b}"),
            Document::Number(n) => write!(f, "{n}"),
            Document::String(s) => f.write_str(s),
            Document::Sequence(items) => write!(f, "[{} items]", items.len()),
            Document::Mapping(map) => write!(f, "{{{} keys}}", map.len()),
        }
    }
}

fn convert(value: serde_yaml::Value, path: &mut Vec<String>) -> Result<Document, DocumentError> {
    use serde_yaml::Value;

    match value {
        Value::Null => Ok(Document::Null),
        Value::Bool(b) => Ok(Document::Bool(b)),
        Value::Number(n) => Ok(Document::Number(n)),
        Value::String(s) => Ok(Document::String(s)),
        Value::Sequence(seq) => {
            let mut items = Vec::with_capacity(seq.len());
            for (i, item) in seq.into_iter().enumerate() {
                path.push(i.to_string());
                items.push(convert(item, path)?);
                path.pop();
            }
            Ok(Document::Sequence(items))
        }
        Value::Mapping(mapping) => {
            let mut map = IndexMap::with_capacity(mapping.len());
            for (k, v) in mapping {
                let key = match k {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(DocumentError::UnsupportedKey {
                            key: format!("{other:?}"),
                            path: render_path(path),
                        })
                    }
                };
                path.push(key.clone());
                let converted = convert(v, path)?;
                path.pop();
                map.insert(key, converted);
            }
            Ok(Document::Mapping(map))
        }
        Value::Tagged(tagged) => convert(tagged.value, path),
    }
}

fn render_path(path: &[String]) -> String {
    if path.is_empty() {
        "(root)".to_string()
    } else {
        path.join(".")
    }
}
