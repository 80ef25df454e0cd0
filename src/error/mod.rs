//! Error types and handling infrastructure for document search

use std::path::PathBuf;

/// Every way a search run can fail.
///
/// All variants are terminal for the run; the binary turns them into a single
/// `Error: ...` line and still exits normally.
#[derive(Debug, thiserror::Error)]
pub enum FindError {
    #[error("Failed to read {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("{message}")]
    JsonParse {
        message: String,
        location: Option<(usize, usize)>,
    },

    #[error("Document root is missing the 'document' field")]
    MissingDocument,

    #[error("Malformed node #{index}: {message}")]
    MalformedNode { index: usize, message: String },

    #[error("Node #{index} has no string '{field}' field")]
    MissingField { field: &'static str, index: usize },

    #[error("Input file too large: {size} bytes (limit: {limit} bytes)")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },
}

impl FindError {
    pub fn io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: error.to_string(),
        }
    }

    /// Build a parse error from serde_json, keeping its line/column.
    pub fn json_parse(error: &serde_json::Error) -> Self {
        let location = if error.line() > 0 {
            Some((error.line(), error.column()))
        } else {
            None
        };
        Self::JsonParse {
            message: error.to_string(),
            location,
        }
    }

    pub fn malformed(index: usize, message: impl Into<String>) -> Self {
        Self::MalformedNode {
            index,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Text printed after `Error: ` by the binary
    pub fn user_message(&self) -> String {
        match self {
            Self::JsonParse { message, .. } => format!("Invalid JSON: {}", message),
            _ => self.to_string(),
        }
    }
}

/// Result type for search operations
pub type SearchResult<T> = Result<T, FindError>;

/// Convenience result type for document loading
pub type ParseResult<T> = Result<T, FindError>;
