//! Design Document Node Finder
//!
//! A Rust CLI tool for searching a design-tool JSON export (a Figma file
//! export, for instance) for nodes whose name equals a target string or whose
//! text content contains it.

pub mod cli;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod search;
pub mod walker;

// Re-export commonly used types
pub use error::{FindError, SearchResult};
pub use matcher::{MatchRecord, MatchRule, Matcher};
pub use parser::{document_root, DocumentSource};
pub use search::{search_document, OutputFormat, SearchConfig, SearchReport};
pub use walker::{count_nodes, walk, PreOrder};

/// Search a parsed export for the default target
pub fn find_in_export(export: &serde_json::Value) -> SearchResult<SearchReport> {
    let config = SearchConfig::default();
    find_in_export_with_config(export, &config)
}

/// Search a parsed export with custom configuration
pub fn find_in_export_with_config(
    export: &serde_json::Value,
    config: &SearchConfig,
) -> SearchResult<SearchReport> {
    let root = document_root(export)?;
    search_document(root, config)
}
