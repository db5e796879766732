//! # Diagnostics
//!
//! A [`Diagnostic`] is one finding from a validation run: a row reference
//! and a render-ready message. There are no error codes; the message text
//! is the contract. Exactly three message shapes exist:
//!
//! | Constructor | Message |
//! |-------------|---------|
//! | [`Diagnostic::type_mismatch`] | `<field> Should be <tag>` |
//! | [`Diagnostic::exceed`] | `Exceed attribute '<field>'` |
//! | [`Diagnostic::missing`] | `Missing attritube <a, b, ...>` |
//!
//! The spelling `attritube` is intentional: downstream consumers match on
//! the exact text.

use std::fmt;

use serde::{Serialize, Serializer};

/// Row reference attached to a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Row {
    /// No source line is known. Renders as `n/a`.
    #[default]
    NotApplicable,
    /// Approximate source line.
    Line(usize),
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Row::NotApplicable => f.write_str("n/a"),
            Row::Line(line) => write!(f, "{line}"),
        }
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Row::NotApplicable => serializer.serialize_str("n/a"),
            Row::Line(line) => serializer.serialize_u64(*line as u64),
        }
    }
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Where the finding applies.
    pub row: Row,
    /// Human-readable message.
    pub error: String,
}

impl Diagnostic {
    /// A leaf value whose type does not satisfy the declared tag.
    pub fn type_mismatch(field: &str, tag: impl fmt::Display) -> Self {
        Self::unplaced(format!("{field} Should be {tag}"))
    }

    /// A leaf field the schema does not declare.
    pub fn exceed(field: &str) -> Self {
        Self::unplaced(format!("Exceed attribute '{field}'"))
    }

    /// Declared fields absent from one node, consolidated into one finding.
    pub fn missing<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = names
            .into_iter()
            .map(|n| n.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(", ");
        Self::unplaced(format!("Missing attritube {joined}"))
    }

    fn unplaced(error: String) -> Self {
        Self {
            row: Row::NotApplicable,
            error,
        }
    }

    /// The message text.
    pub fn message(&self) -> &str {
        &self.error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[row {}] {}", self.row, self.error)
    }
}
