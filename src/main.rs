//! phasestat - Phase-Timing Summarizer for Simulation Run Logs
//!
//! A CLI tool that reads a log file produced by a simulation run,
//! collects the timing values reported for a fixed set of named phases,
//! and prints the raw samples plus the per-phase arithmetic mean.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (missing file, malformed record, empty phase)

mod analysis;
mod cli;
mod config;
mod models;
mod parser;
mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, OutputFormat};
use config::Config;
use models::ReportMetadata;
use report::RenderOptions;
use std::fs::File;
use std::io::BufReader;
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        if let Err(e) = handle_init_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    // Initialize logging
    init_logging(&args);

    debug!("phasestat v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    // Run the summarization
    if let Err(e) = run_summary(args) {
        error!("Summarization failed: {}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Handle --init-config: generate a default .phasestat.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".phasestat.toml");

    if path.exists() {
        eprintln!("⚠️  .phasestat.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .phasestat.toml")?;

    println!("✅ Created .phasestat.toml with default settings.");
    println!("   Edit it to customize the label set and report format.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so they never mix with the report on stdout.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete summarization workflow.
fn run_summary(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let labels = config.effective_labels()?;
    let format = config.effective_format()?;

    let input_path = args.input_path();
    info!(
        "Summarizing {} against labels: {}",
        input_path.display(),
        labels
    );

    // Single pass over the input
    let file = File::open(input_path)
        .with_context(|| format!("Failed to open log file: {}", input_path.display()))?;
    let result = analysis::aggregate(BufReader::new(file), &labels)
        .with_context(|| format!("Failed to summarize {}", input_path.display()))?;

    info!(
        "Scanned {} lines, matched {} timing records",
        result.lines_scanned, result.records_matched
    );

    // Render the report
    let options = RenderOptions {
        include_samples: config.report.include_samples,
        allow_empty: config.general.allow_empty,
    };

    let output = match format {
        OutputFormat::Text => report::generate_text_report(&result, &options)?,
        OutputFormat::Json => {
            let metadata = ReportMetadata {
                input_file: input_path.display().to_string(),
                profile: config.profile_name().to_string(),
                generated_at: Utc::now(),
                lines_scanned: result.lines_scanned,
                records_matched: result.records_matched,
            };
            report::generate_json_report(&result, metadata, &options)?
        }
    };

    // Write or print the report
    match args.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report saved to {}", path.display());
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        debug!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default()? {
        Some(config) => {
            debug!("Loaded default config from .phasestat.toml");
            Ok(config)
        }
        None => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
