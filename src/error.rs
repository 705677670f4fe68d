use miette::Diagnostic;
use thiserror::Error;

/// Hard failures. Everything that goes wrong inside a rig file is reported
/// through [`crate::diagnostics::Diagnostics`] instead.
#[derive(Error, Diagnostic, Debug)]
pub enum RigError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(rigdef::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Could not read rig file at line {line}: {source}")]
    #[diagnostic(
        code(rigdef::read),
        help("Lines read before the failure were parsed and kept")
    )]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {message}")]
    #[diagnostic(code(rigdef::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Output error: {message}")]
    #[diagnostic(code(rigdef::output))]
    Output {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, RigError>;
