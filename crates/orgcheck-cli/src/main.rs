//! # orgcheck CLI entry point
//!
//! Parses command-line arguments, installs logging, resolves the active
//! schema and dispatches to subcommand handlers.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use orgcheck_cli::schema::{run_schema, SchemaArgs};
use orgcheck_cli::show::{run_show, ShowArgs};
use orgcheck_cli::validate::{run_validate, ValidateArgs};
use orgcheck_cli::{load_schema, EXIT_FAILURE};

/// orgcheck — organization branch hierarchy validator.
///
/// Checks every branch node of a YAML organization document against a flat
/// record schema and reports type mismatches, undeclared fields and
/// missing fields.
#[derive(Parser, Debug)]
#[command(name = "orgcheck", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML file overriding the built-in branch schema.
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the branch hierarchy of a YAML document.
    Validate(ValidateArgs),

    /// Print the active branch schema.
    Schema(SchemaArgs),

    /// Print the decoded document as normalized YAML.
    Show(ShowArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level.
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("orgcheck v{} starting", env!("CARGO_PKG_VERSION"));

    let schema = match load_schema(cli.schema.as_deref()) {
        Ok(schema) => schema,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, &schema, &mut out),
        Commands::Schema(args) => run_schema(args, &schema, &mut out),
        Commands::Show(args) => run_show(args, &mut out),
    };

    let _ = out.flush();

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
