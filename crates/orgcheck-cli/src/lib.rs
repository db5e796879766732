//! # orgcheck-cli — Command-Line Interface
//!
//! Provides the `orgcheck` binary. Argument parsing lives in `main.rs`;
//! each subcommand module owns its `Args` struct and a `run_*` handler that
//! writes to a caller-supplied sink and returns the process exit code.
//!
//! ## Subcommands
//!
//! - `orgcheck validate <FILE|->` — validate the branch hierarchy.
//! - `orgcheck schema` — print the active branch schema.
//! - `orgcheck show <FILE|->` — print the decoded document as normalized YAML.
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Validated, no diagnostics |
//! | 1 | Validated, diagnostics reported |
//! | 2 | Input or configuration could not be used |

pub mod schema;
pub mod show;
pub mod validate;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use orgcheck_schema::Schema;

/// Path argument that selects standard input.
pub const STDIN_PATH: &str = "-";

/// Exit code for a run that produced diagnostics.
pub const EXIT_DIAGNOSTICS: u8 = 1;

/// Exit code for unusable input or configuration.
pub const EXIT_FAILURE: u8 = 2;

/// Read raw input bytes from a file, or from stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new(STDIN_PATH) {
        let mut buf = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("failed to read standard input")?;
        return Ok(buf);
    }
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// The schema selected by `--schema`, or the built-in branch schema.
pub fn load_schema(path: Option<&Path>) -> Result<Schema> {
    match path {
        Some(p) => {
            let schema = Schema::load(p)
                .with_context(|| format!("failed to load schema {}", p.display()))?;
            tracing::info!(path = %p.display(), fields = schema.len(), "loaded schema override");
            Ok(schema)
        }
        None => Ok(Schema::branch()),
    }
}
