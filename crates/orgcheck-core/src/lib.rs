//! # orgcheck-core — Foundational Types for orgcheck
//!
//! Defines the data that flows into and out of branch validation:
//!
//! - [`Document`] — the decoded YAML tree. A closed enum over null, booleans,
//!   numbers, strings, sequences and string-keyed mappings. Mappings keep
//!   source key order; every consumer may rely on it.
//! - [`decode`] — raw bytes to text (BOM stripping, lossy UTF-8) and text
//!   to [`Document`] via `serde_yaml`.
//! - [`Diagnostic`] — one render-ready validation finding. Messages are
//!   built only through the constructors in [`diagnostic`] so that the three
//!   observable formats cannot drift.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `orgcheck-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod decode;
pub mod diagnostic;
pub mod document;
pub mod error;

// Re-export primary types for ergonomic imports.
pub use decode::{decode_text, parse_bytes, parse_document};
pub use diagnostic::{Diagnostic, Row};
pub use document::{Document, Number};
pub use error::DocumentError;
