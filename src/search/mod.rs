//! Document search module
//!
//! Configuration, the walk-and-match engine, report rendering, and
//! statistics for a search run.

pub mod config;
pub mod engine;
pub mod stats;

pub use config::{OutputFormat, SearchConfig, DEFAULT_INPUT};
pub use engine::{execute, load_export, render, search_document, SearchReport};
pub use stats::SearchStatistics;
