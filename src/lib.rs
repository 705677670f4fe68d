//! rigdef - Permissive parser for rig definition files
//!
//! Reads the line-oriented vehicle definition format (`.truck`, `.load`,
//! `.airplane`, ...) into a typed [`Document`]. Problems inside a file never
//! stop the parser; they are collected as [`Diagnostics`] next to the
//! best-effort result.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod lookup;
pub mod output;
pub mod parser;
pub mod types;

pub use config::ParserConfig;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use error::{Result, RigError};
pub use lookup::{AssumePresent, DirectoryLookup, ResourceLookup};
pub use parser::{parse_file, parse_reader, parse_str, ImportMode, ParseOutcome, Parser};
pub use types::{Document, Module, NodeId, NodeRef};
