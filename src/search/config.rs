//! Configuration options for a document search run

use crate::matcher::{Matcher, DEFAULT_TARGET, TEXT_NODE_TYPE};
use std::path::PathBuf;

/// Export file looked up in the working directory by default
pub const DEFAULT_INPUT: &str = "figma_full.json";

/// How matches are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `FOUND: ID=..., Name=..., Type=...` lines
    #[default]
    Text,
    /// One JSON object per match
    JsonLines,
}

/// Search configuration options
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Exported document to read
    pub input: PathBuf,
    /// String compared against node names and searched in text content
    pub target: String,
    /// Node type whose `characters` are searched
    pub text_node_type: String,
    /// Refuse input files larger than this many bytes
    pub max_file_size: Option<u64>,
    /// Output format for matches
    pub format: OutputFormat,
    /// Skip the `Loaded JSON` progress line
    pub quiet: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            target: DEFAULT_TARGET.to_string(),
            text_node_type: TEXT_NODE_TYPE.to_string(),
            max_file_size: None,
            format: OutputFormat::Text,
            quiet: false,
        }
    }
}

impl SearchConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input file
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the search target
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Set the node type searched by text content
    pub fn with_text_node_type(mut self, node_type: impl Into<String>) -> Self {
        self.text_node_type = node_type.into();
        self
    }

    /// Set the input size limit
    pub fn with_max_file_size(mut self, limit: Option<u64>) -> Self {
        self.max_file_size = limit;
        self
    }

    /// Set the output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Build the matcher this configuration describes
    pub fn matcher(&self) -> Matcher {
        Matcher::new(self.target.clone()).with_text_node_type(self.text_node_type.clone())
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.input.as_os_str().is_empty() {
            return Err("Input path must not be empty".to_string());
        }

        if self.text_node_type.is_empty() {
            return Err("Text node type must not be empty".to_string());
        }

        if self.max_file_size == Some(0) {
            return Err("Max file size must be at least 1 byte".to_string());
        }

        Ok(())
    }
}
