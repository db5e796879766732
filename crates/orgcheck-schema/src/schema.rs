//! # Branch Schema
//!
//! One flat record shape applied at every level of the branch tree.
//! The schema is built before validation starts and never changes during
//! a run.
//!
//! ## Built-in Shape
//!
//! | Field | Tag |
//! |-------|-----|
//! | `Branch` | `array` |
//! | `Level` | `number` |
//! | `NodeID` | `string` |
//! | `RefNodeID` | `null` |
//! | `NodeName` | `string` |
//! | `DoAAuthlevel` | `number` |
//!
//! `Branch` holds the child nodes. It is reached by recursion and is never
//! reported as missing.
//!
//! ## Overrides
//!
//! [`Schema::load`] reads a YAML mapping of field name to tag text:
//!
//! ```yaml
//! Branch: array
//! Level: number
//! NodeID: string
//! ```

use std::path::Path;

use indexmap::IndexMap;
use orgcheck_core::Document;
use thiserror::Error;

use crate::tag::TypeTag;

/// Field that holds a node's children.
pub const BRANCH_FIELD: &str = "Branch";

/// Error while building a schema from configuration.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read.
    #[error("cannot read schema file '{path}': {source}")]
    Read {
        /// Path that failed.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The schema text is not a YAML mapping of field name to tag text.
    #[error("invalid schema: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The schema declares no fields.
    #[error("schema declares no fields")]
    Empty,

    /// A field was declared with an empty tag.
    #[error("field '{field}' has an empty type tag")]
    EmptyTag {
        /// Offending field name.
        field: String,
    },

    /// A field's tag is neither text nor null.
    #[error("field '{field}' has a non-text type tag")]
    InvalidTag {
        /// Offending field name.
        field: String,
    },
}

/// Ordered mapping from field name to expected [`TypeTag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    fields: IndexMap<String, TypeTag>,
}

impl Schema {
    /// The built-in branch record schema.
    pub fn branch() -> Self {
        Self::from_fields([
            (BRANCH_FIELD, TypeTag::Array),
            ("Level", TypeTag::Number),
            ("NodeID", TypeTag::String),
            ("RefNodeID", TypeTag::Null),
            ("NodeName", TypeTag::String),
            ("DoAAuthlevel", TypeTag::Number),
        ])
    }

    /// Build a schema from `(field, tag)` pairs, keeping their order.
    pub fn from_fields<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, TypeTag)>,
        K: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(|(k, t)| (k.into(), t)).collect(),
        }
    }

    /// Parse a schema from YAML text.
    ///
    /// Tags are written as text. A bare YAML `null` is read as the `null` tag.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Parse`] if the text is not a string-keyed
    /// mapping, [`SchemaError::Empty`] for an empty mapping,
    /// [`SchemaError::EmptyTag`] for blank tag text and
    /// [`SchemaError::InvalidTag`] for any other tag value.
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaError> {
        let raw: IndexMap<String, serde_yaml::Value> = serde_yaml::from_str(text)?;
        if raw.is_empty() {
            return Err(SchemaError::Empty);
        }
        let mut fields = IndexMap::with_capacity(raw.len());
        for (field, value) in raw {
            let tag = match value {
                serde_yaml::Value::Null => TypeTag::Null,
                serde_yaml::Value::String(text) if text.trim().is_empty() => {
                    return Err(SchemaError::EmptyTag { field });
                }
                serde_yaml::Value::String(text) => TypeTag::from(text.trim().to_owned()),
                _ => return Err(SchemaError::InvalidTag { field }),
            };
            fields.insert(field, tag);
        }
        Ok(Self { fields })
    }

    /// Load a schema override from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Declared tag for `field`, or `None` if the schema does not declare it.
    pub fn tag(&self, field: &str) -> Option<&TypeTag> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of declared fields, including the recursive one.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Declared field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Declared `(field, tag)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeTag)> {
        self.fields.iter().map(|(k, t)| (k.as_str(), t))
    }

    /// Declared fields that `node` does not have, in declaration order.
    pub fn absent_fields<'a>(&'a self, node: &'a Document) -> impl Iterator<Item = &'a str> + 'a {
        self.field_names().filter(move |f| !node.has_key(f))
    }

    /// One-line `Field: value` rendering of a node's declared record fields.
    ///
    /// The recursive field is skipped. Absent and null values render as
    /// `(missing)`.
    pub fn summarize(&self, node: &Document) -> String {
        self.field_names()
            .filter(|f| *f != BRANCH_FIELD)
            .map(|f| match node.get(f) {
                Some(v) if !v.is_null() => format!("{f}: {v}"),
                _ => format!("{f}: (missing)"),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::branch()
    }
}
