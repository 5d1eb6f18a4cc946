use miette::Diagnostic;
use thiserror::Error;

/// Main error type for level conversion
#[derive(Error, Diagnostic, Debug)]
pub enum LevelError {
    #[error("IO error: {0}")]
    #[diagnostic(code(ora2level::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(ora2level::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(ora2level::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid document: {message}")]
    #[diagnostic(code(ora2level::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(ora2level::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, LevelError>;
