//! # Type Tags and Classification
//!
//! A [`TypeTag`] names the primitive shape a schema field expects.
//! [`matches_type`] is the classifier: a total function from
//! (value, optional tag) to bool.
//!
//! Only `array`, `number`/`int`, `null` and `string` can ever match.
//! `boolean`, `object` and `dict` are accepted as tag names but no value
//! satisfies them, so a field declared with one of those tags always
//! produces a type mismatch. Unknown tag text behaves the same way.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use orgcheck_core::Document;
use serde::{Deserialize, Serialize};

/// Expected type of a schema field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeTag {
    String,
    Array,
    Object,
    Boolean,
    Number,
    /// Same matching rule as [`TypeTag::Number`].
    Int,
    Null,
    Dict,
    /// Tag text outside the known set. Never matches.
    Unrecognized(String),
}

impl TypeTag {
    /// Literal tag text as written in a schema.
    pub fn as_str(&self) -> &str {
        match self {
            TypeTag::String => "string",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::Int => "int",
            TypeTag::Null => "null",
            TypeTag::Dict => "dict",
            TypeTag::Unrecognized(s) => s,
        }
    }
}

impl FromStr for TypeTag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "string" => TypeTag::String,
            "array" => TypeTag::Array,
            "object" => TypeTag::Object,
            "boolean" => TypeTag::Boolean,
            "number" => TypeTag::Number,
            "int" => TypeTag::Int,
            "null" => TypeTag::Null,
            "dict" => TypeTag::Dict,
            other => TypeTag::Unrecognized(other.to_owned()),
        })
    }
}

impl From<String> for TypeTag {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(tag) => tag,
            Err(never) => match never {},
        }
    }
}

impl From<TypeTag> for String {
    fn from(tag: TypeTag) -> Self {
        tag.as_str().to_owned()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Does `value` satisfy `expected`?
///
/// `None` means the field declares no constraint and always matches.
pub fn matches_type(value: &Document, expected: Option<&TypeTag>) -> bool {
    let Some(tag) = expected else {
        return true;
    };
    match tag {
        TypeTag::Array => matches!(value, Document::Sequence(_)),
        TypeTag::Number | TypeTag::Int => matches!(value, Document::Number(_)),
        TypeTag::Null => matches!(value, Document::Null),
        TypeTag::String => matches!(value, Document::String(_)),
        TypeTag::Boolean | TypeTag::Object | TypeTag::Dict | TypeTag::Unrecognized(_) => false,
    }
}
