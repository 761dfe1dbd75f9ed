//! Error types for Graphlens.
//!
//! Resolution-level problems (unknown ids, dangling relationship endpoints)
//! are not errors: they are absorbed by the assembler and reported as
//! diagnostics. Everything in this enum propagates to the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Errors that can occur while loading tables, talking to the search
/// service, assembling a graph, or exporting it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Reading an input (table, recorded response, config) failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing the rendered graph document failed.
    #[error("Failed to export graph to {}: {source}", path.display())]
    Export {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A `[Data: ...]` citation annotation violates the expected format.
    #[error("Malformed citation annotation {annotation:?}: {message}")]
    CitationFormat {
        /// The offending annotation text
        annotation: String,
        /// What went wrong
        message: String,
    },

    /// Generic parse failure (tables, search context, recorded responses).
    #[error("Parse error: {0}")]
    Parse(String),

    /// Input data violates a table invariant.
    #[error("Validation error: {message}")]
    Validation {
        /// Field or aspect that failed validation
        field: Option<String>,
        /// What went wrong
        message: String,
    },

    /// A lookup that the caller required to succeed found nothing.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Kind of item (e.g. "entity", "report")
        kind: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// The search collaborator failed.
    #[error("Search error: {message}")]
    Search {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The search collaborator did not answer in time.
    #[error("Search timed out after {limit:?}")]
    Timeout {
        /// The limit that was exceeded
        limit: Duration,
    },
}

/// Convenience `Result` type alias for Graphlens operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates an I/O error for a path that was being read.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates an export error for a destination that could not be written.
    pub fn export(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Export {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a citation format error.
    pub fn citation_format(annotation: impl Into<String>, message: impl Into<String>) -> Self {
        Error::CitationFormat {
            annotation: annotation.into(),
            message: message.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Error::Parse(message.into())
    }

    /// Creates a new validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation {
            field: None,
            message: message.into(),
        }
    }

    /// Creates a new validation error with a field name.
    pub fn validation_field<F, M>(field: F, message: M) -> Self
    where
        F: Into<String>,
        M: Into<String>,
    {
        Error::Validation {
            field: Some(field.into()),
            message: message.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Error::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config(message.into())
    }

    /// Creates a search error with a message.
    pub fn search<S: Into<String>>(message: S) -> Self {
        Error::Search {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a search error with a message and source error.
    pub fn search_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Search {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns whether this error reports malformed input data.
    pub fn is_data_format(&self) -> bool {
        matches!(
            self,
            Error::CitationFormat { .. }
                | Error::Parse(_)
                | Error::Validation { .. }
                | Error::Json(_)
        )
    }

    /// Returns whether retrying the same operation could succeed.
    ///
    /// Only failures of the search collaborator are transient; the core
    /// itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Search { .. } => true,
            Error::Timeout { .. } => true,
            Error::Io { .. } => false,
            Error::Export { .. } => false,
            Error::CitationFormat { .. } => false,
            Error::Parse(_) => false,
            Error::Validation { .. } => false,
            Error::NotFound { .. } => false,
            Error::Config(_) => false,
            Error::Json(_) => false,
        }
    }
}
