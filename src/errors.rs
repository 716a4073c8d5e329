use std::path::PathBuf;
use thiserror::Error;

/// Closed set of failure kinds for the tagging operation.
///
/// Callers can distinguish a syntactically broken input document from
/// everything else (missing file, permissions, write failure) without
/// inspecting message text.
#[derive(Error, Debug)]
pub enum TagError {
    #[error("Error parsing XML file {path}: {source}")]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: xmltree::ParseError,
    },

    #[error("{context}: {source}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl TagError {
    /// Create an OperationFailed with context.
    pub fn operation(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::OperationFailed {
            context: context.into(),
            source: Box::new(source),
        }
    }
}

pub type TagResult<T> = Result<T, TagError>;
