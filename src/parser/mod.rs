//! Document loading: read an exported design file and locate its node tree

use crate::error::{FindError, ParseResult};
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;

/// Field of the export root that holds the node tree
pub const DOCUMENT_FIELD: &str = "document";

/// Where an exported document comes from
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// Raw JSON text
    String(String),
    /// Path to an exported `.json` file
    File(PathBuf),
}

impl DocumentSource {
    /// Parse the whole export into a JSON value.
    ///
    /// `max_size` only applies to files and is checked against the file's
    /// metadata before anything is read.
    pub fn parse(&self, max_size: Option<u64>) -> ParseResult<Value> {
        match self {
            DocumentSource::String(content) => parse_from_string(content),
            DocumentSource::File(path) => parse_from_file(path, max_size),
        }
    }

    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            DocumentSource::String(_) => "string input".to_string(),
            DocumentSource::File(path) => format!("file: {}", path.display()),
        }
    }
}

/// Parse without serde_json's nesting limit; exports can nest far deeper
/// than 128 levels.
fn parse_from_string(content: &str) -> ParseResult<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(content);
    deserializer.disable_recursion_limit();

    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))
        .map_err(|e| FindError::json_parse(&e))?;
    deserializer.end().map_err(|e| FindError::json_parse(&e))?;

    Ok(value)
}

fn parse_from_file(path: &PathBuf, max_size: Option<u64>) -> ParseResult<Value> {
    if let Some(limit) = max_size {
        let metadata = std::fs::metadata(path).map_err(|e| FindError::io(path, &e))?;
        if metadata.len() > limit {
            return Err(FindError::FileTooLarge {
                size: metadata.len(),
                limit,
            });
        }
    }

    let content = std::fs::read_to_string(path).map_err(|e| FindError::io(path, &e))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "read document");

    parse_from_string(&content)
}

/// Return the node tree stored under the export's `document` field.
pub fn document_root(export: &Value) -> ParseResult<&Value> {
    export.get(DOCUMENT_FIELD).ok_or(FindError::MissingDocument)
}
