//! # orgcheck-schema — Branch Schema Validation
//!
//! Checks every branch node of an organizational hierarchy against one flat
//! record shape and reports what does not fit.
//!
//! ## Type Classification (`tag`)
//!
//! [`TypeTag`] is the closed set of expected-type labels. [`matches_type`]
//! decides whether a [`Document`](orgcheck_core::Document) value satisfies a
//! tag. Fields with no declared tag are unconstrained.
//!
//! ## Schema (`schema`)
//!
//! [`Schema`] is an ordered field → tag mapping plus the name of the
//! recursive child field. [`Schema::branch`] is the built-in branch record;
//! [`Schema::load`] reads an override from a YAML file.
//!
//! ## Tree Validation (`validate`)
//!
//! [`TreeValidator::validate`] walks `OrgContents.Branch` recursively and
//! returns a [`ValidationReport`]. Every run gets its own context; the
//! validator holds no mutable state and can be shared across threads.
//!
//! ## Crate Policy
//!
//! - Depends only on `orgcheck-core` internally.
//! - Diagnostic wording is observable output and must not change.
//! - Validation never fails: structural problems are diagnostics,
//!   an absent root is an empty report.

pub mod schema;
pub mod tag;
pub mod validate;

pub use schema::{Schema, SchemaError, BRANCH_FIELD};
pub use tag::{matches_type, TypeTag};
pub use validate::{
    try_validate_source, validate_source, TreeValidator, ValidationReport, INITIAL_LINE_HINT,
    ROOT_PATH,
};
