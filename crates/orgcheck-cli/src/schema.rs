//! # Schema Subcommand
//!
//! Prints the branch schema that `validate` will apply, after any
//! `--schema` override.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use orgcheck_schema::{Schema, BRANCH_FIELD};

/// Arguments for the schema subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {}

/// Execute the schema subcommand.
pub fn run_schema(_args: &SchemaArgs, schema: &Schema, out: &mut dyn Write) -> Result<u8> {
    let width = schema.field_names().map(str::len).max().unwrap_or(0).max(5);
    writeln!(out, "{:<width$}  TYPE", "FIELD")?;
    for (field, tag) in schema.iter() {
        if field == BRANCH_FIELD {
            writeln!(out, "{field:<width$}  {tag}  (children)")?;
        } else {
            writeln!(out, "{field:<width$}  {tag}")?;
        }
    }
    Ok(0)
}
