//! # Validate Subcommand
//!
//! Reads a YAML organization document, validates its branch tree and
//! prints the diagnostics.
//!
//! ```bash
//! orgcheck validate org.yaml
//! orgcheck validate --format json org.yaml
//! cat org.yaml | orgcheck validate -
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use orgcheck_schema::{Schema, TreeValidator, ValidationReport};

use crate::{read_input, EXIT_DIAGNOSTICS};

/// Output rendering for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Aligned `row  error` table.
    #[default]
    Text,
    /// Pretty-printed JSON report.
    Json,
}

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// YAML document to validate, or `-` for standard input.
    pub input: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Fail when the input cannot be parsed instead of reporting nothing.
    #[arg(long)]
    pub strict: bool,

    /// Report approximate line hints in the row column instead of `n/a`.
    #[arg(long)]
    pub line_rows: bool,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, schema: &Schema, out: &mut dyn Write) -> Result<u8> {
    let bytes = read_input(&args.input)?;
    let validator = TreeValidator::new(schema.clone()).with_line_rows(args.line_rows);

    let report = if args.strict {
        validator
            .try_validate_source(&bytes)
            .with_context(|| format!("cannot validate {}", args.input.display()))?
    } else {
        validator.validate_source(&bytes)
    };

    match args.format {
        OutputFormat::Text => write_text(&report, out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }

    Ok(if report.is_empty() { 0 } else { EXIT_DIAGNOSTICS })
}

fn write_text(report: &ValidationReport, out: &mut dyn Write) -> Result<()> {
    if report.is_empty() {
        writeln!(out, "OK: no diagnostics")?;
        return Ok(());
    }
    writeln!(out, "{:<6} ERROR", "ROW")?;
    for d in &report.diagnostics {
        writeln!(out, "{:<6} {}", d.row.to_string(), d.error)?;
    }
    writeln!(out)?;
    writeln!(out, "{} diagnostic(s)", report.len())?;
    Ok(())
}
