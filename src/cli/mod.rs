pub mod check;
pub mod completions;
pub mod dump;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::config::ParserConfig;
use crate::error::Result;

/// rigdef - Permissive parser for rig definition files
#[derive(Parser, Debug)]
#[command(name = "rigdef")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log parser activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse rig files and report diagnostics
    Check(check::CheckArgs),

    /// Parse a rig file and print the document as JSON
    Dump(dump::DumpArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// `--config` if given, otherwise `rigdef.yaml` next to `file`.
pub(crate) fn load_config(config: Option<&PathBuf>, file: &Path) -> Result<ParserConfig> {
    match config {
        Some(path) => ParserConfig::load(path),
        None => {
            let dir = file
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            ParserConfig::discover(dir)
        }
    }
}
