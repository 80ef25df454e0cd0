use clap::Parser;
use std::io::Write;

use anyhow::Result;

use figmafind::cli::{init_logging, Args, CliConfig};
use figmafind::search::{execute, OutputFormat};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Bad flag values are reported like any other failure
    let config = match CliConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "invalid configuration");
            writeln!(out, "Error: {}", e.user_message())?;
            return Ok(());
        }
    };

    tracing::debug!(
        input = %config.search_config.input.display(),
        target = %config.search_config.target,
        "starting search"
    );

    let result = execute(&config.search_config, &mut out)?;
    out.flush()?;

    if config.want_stats() {
        if let Ok(report) = &result {
            match config.search_config.format {
                OutputFormat::Text => eprintln!("\n{}", report.stats.summary()),
                OutputFormat::JsonLines => eprintln!("{}", serde_json::to_string(&report.stats)?),
            }
        }
    }

    Ok(())
}
