//! # Show Subcommand
//!
//! Decodes and parses the input, then prints it back as normalized YAML.
//! Useful to see exactly what the validator walks: key order, nulls and
//! how scalars were typed.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use orgcheck_core::parse_bytes;

use crate::read_input;

/// Arguments for the show subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// YAML document to show, or `-` for standard input.
    pub input: PathBuf,
}

/// Execute the show subcommand.
pub fn run_show(args: &ShowArgs, out: &mut dyn Write) -> Result<u8> {
    let bytes = read_input(&args.input)?;
    let document = parse_bytes(&bytes)
        .with_context(|| format!("cannot parse {}", args.input.display()))?;
    tracing::debug!(kind = document.kind(), keys = document.len(), "decoded document");
    out.write_all(document.to_yaml_string()?.as_bytes())?;
    Ok(0)
}
