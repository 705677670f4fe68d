//! Dump command implementation.
//!
//! Prints the parsed document as JSON on stdout.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use super::load_config;
use crate::diagnostics::Diagnostics;
use crate::error::{Result, RigError};
use crate::output::{display_path, plural, Printer};
use crate::parser::{parse_file, ImportMode, ParseOutcome};
use crate::types::Document;

/// Parse a rig file and print the document as JSON
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Rig file to dump
    pub file: PathBuf,

    /// Pretty-print the JSON
    #[arg(long)]
    pub pretty: bool,

    /// Config file (default: rigdef.yaml next to the rig file)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Serialize)]
struct DumpView<'a> {
    import_mode: ImportMode,
    document: &'a Document,
    diagnostics: &'a Diagnostics,
}

/// Serialize a parse outcome to JSON.
pub fn to_json(outcome: &ParseOutcome, pretty: bool) -> Result<String> {
    let view = DumpView {
        import_mode: outcome.import_mode,
        document: &outcome.document,
        diagnostics: &outcome.diagnostics,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&view)
    } else {
        serde_json::to_string(&view)
    };
    json.map_err(|e| RigError::Output {
        message: format!("Failed to serialize document: {}", e),
        help: None,
    })
}

pub fn run(args: DumpArgs, printer: &Printer) -> Result<()> {
    let config = load_config(args.config.as_ref(), &args.file)?;
    let outcome = parse_file(&args.file, &config)?;
    let json = to_json(&outcome, args.pretty)?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json).map_err(|e| RigError::Output {
        message: format!("Failed to write JSON: {}", e),
        help: Some("Is stdout closed?".to_string()),
    })?;

    if let Some(err) = &outcome.read_error {
        printer.error("Failed", &err.to_string());
    }
    printer.info(
        "Dumped",
        &format!(
            "{} ({})",
            display_path(&args.file),
            plural(outcome.diagnostics.len(), "diagnostic", "diagnostics")
        ),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::parser::parse_str;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dump_shape() {
        let outcome = parse_str(
            "dumper\nnodes\n0, 0, 0, 0\n1, 1, 0, 0\nbeams\n0, 1\n0\n",
            &ParserConfig::default(),
        );
        let json = to_json(&outcome, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["document"]["name"], "dumper");
        assert_eq!(value["document"]["root"]["nodes"].as_array().map(Vec::len), Some(2));
        assert_eq!(value["diagnostics"][0]["kind"], "ArgumentCount");
        assert_eq!(value["diagnostics"][0]["line"], 7);
    }
}
