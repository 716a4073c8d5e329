//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, ValueHint};
use clap_complete::Shell;

/// Assign stable UUID attributes to every element of an XML document
#[derive(Parser, Debug)]
#[command(name = "xmluuid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// XML file to process (rewritten in place)
    #[arg(value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,

    /// Enable debug output (-d, -dd, -ddd for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Generate shell completions
    #[arg(long = "generate", value_enum)]
    pub generator: Option<Shell>,

    /// Print author and version information
    #[arg(long)]
    pub info: bool,
}
