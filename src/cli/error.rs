//! CLI-level errors (wraps tagging errors)

use thiserror::Error;

use crate::errors::TagError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Tag(#[from] TagError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Tag(e) => match e {
                TagError::MalformedDocument { .. } => crate::exitcode::DATAERR,
                TagError::OperationFailed { .. } => crate::exitcode::IOERR,
            },
        }
    }
}
