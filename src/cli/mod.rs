//! Command-line interface module

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::error::{FindError, SearchResult};
use crate::matcher::{DEFAULT_TARGET, TEXT_NODE_TYPE};
use crate::search::{OutputFormat, SearchConfig, DEFAULT_INPUT};

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "figmafind")]
#[command(about = "Find nodes by name or text content in an exported design document")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Exported document JSON
    #[arg(default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Node name to match exactly, or text to find inside TEXT nodes
    #[arg(short, long, default_value = DEFAULT_TARGET)]
    pub target: String,

    /// Node type whose text content is searched
    #[arg(long, default_value = TEXT_NODE_TYPE)]
    pub text_type: String,

    /// Output format for matches
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Refuse inputs larger than this (e.g., 500KB, 100MB, 1GB)
    #[arg(long)]
    pub max_file_size: Option<String>,

    /// Print traversal statistics to stderr
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress the progress line
    #[arg(long)]
    pub quiet: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    #[value(name = "text")]
    Text,
    #[value(name = "json", alias = "jsonl")]
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::JsonLines,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub search_config: SearchConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> SearchResult<Self> {
        let search_config = Self::create_search_config(&args)?;

        Ok(Self {
            args,
            search_config,
        })
    }

    fn create_search_config(args: &Args) -> SearchResult<SearchConfig> {
        let max_file_size = parse_size_limit(&args.max_file_size)?;

        let config = SearchConfig::new()
            .with_input(args.input.clone())
            .with_target(args.target.clone())
            .with_text_node_type(args.text_type.clone())
            .with_format(args.format.into())
            .with_max_file_size(max_file_size)
            .with_quiet(args.quiet);

        config.validate().map_err(FindError::configuration)?;

        Ok(config)
    }

    pub fn want_stats(&self) -> bool {
        self.args.stats
    }
}

/// Parse a size string (e.g., "100MB", "1GB", "500KB", "2048")
fn parse_size_limit(limit: &Option<String>) -> SearchResult<Option<u64>> {
    let Some(limit_str) = limit else {
        return Ok(None);
    };
    let limit_str = limit_str.trim().to_uppercase();
    let invalid = || FindError::configuration(format!("Invalid file size limit: {}", limit_str));

    let (number, multiplier) = if let Some(size) = limit_str.strip_suffix("GB") {
        (size, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("MB") {
        (size, 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("KB") {
        (size, 1024.0)
    } else if let Some(size) = limit_str.strip_suffix('B') {
        (size, 1.0)
    } else {
        (limit_str.as_str(), 1.0)
    };

    let value = number.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }

    Ok(Some((value * multiplier) as u64))
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the level.
pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
