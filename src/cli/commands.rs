//! Command dispatch: maps parsed arguments onto the tagger.

use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::cli::args::Cli;
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::tagger::tag_file;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.file {
        Some(file) => tag(file),
        None => {
            // No file given: show usage, touch nothing.
            Cli::command()
                .print_help()
                .map_err(|e| crate::errors::TagError::operation("Cannot print help", e))?;
            Ok(())
        }
    }
}

#[instrument(level = "debug")]
fn tag(file: &Path) -> CliResult<()> {
    debug!("tagging {}", file.display());
    let assigned = tag_file(file)?;
    if assigned == 0 {
        output::success(&format!(
            "All nodes in {} already have UUIDs, nothing to do.",
            file.display()
        ));
    } else {
        output::success(&format!(
            "Assigned {} UUID(s) to nodes in {}.",
            assigned,
            file.display()
        ));
    }
    Ok(())
}
