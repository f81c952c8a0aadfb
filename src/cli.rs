//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::LabelSet;
use clap::Parser;
use std::path::{Path, PathBuf};

/// phasestat - phase-timing summarizer for simulation run logs
///
/// Reads a log file produced by a simulation run, collects the timing
/// values reported for a fixed set of named phases, and prints the raw
/// samples plus the per-phase arithmetic mean.
///
/// Examples:
///   phasestat run.log
///   phasestat run.log --profile mpi
///   phasestat run.log --labels InitGrid,SystemEvolution --format json
///   phasestat --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Path to the simulation log file to summarize
    ///
    /// Not required when using --init-config.
    #[arg(value_name = "LOG_FILE", required_unless_present = "init_config")]
    pub input: Option<PathBuf>,

    /// Label-set profile matching the run that produced the log
    ///
    /// `openmp` recognizes the four grid/particle phases; `mpi` adds the
    /// per-node computation, communication, and init phases.
    /// Defaults to the config file setting, or `openmp`.
    #[arg(short, long, env = "PHASESTAT_PROFILE", value_name = "PROFILE")]
    pub profile: Option<Profile>,

    /// Explicit ordered phase labels (comma-separated)
    ///
    /// Overrides the profile. Example: --labels InitGrid,SystemEvolution
    #[arg(long, value_name = "LABELS", value_delimiter = ',')]
    pub labels: Option<Vec<String>>,

    /// Output format (text, json)
    ///
    /// Defaults to the config file setting, or plain text.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to a file instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Warn about phases with no samples instead of failing the run
    ///
    /// Empty phases are omitted from the means block; a mean is never
    /// fabricated for them.
    #[arg(long)]
    pub allow_empty: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .phasestat.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Generate a default .phasestat.toml configuration file
    #[arg(long)]
    pub init_config: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Built-in label-set profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Profile {
    /// Serial/OpenMP run log (4 labels)
    #[default]
    Openmp,
    /// MPI run log (7 labels)
    Mpi,
}

impl Profile {
    /// The ordered label set this profile recognizes.
    pub fn label_set(&self) -> LabelSet {
        match self {
            Profile::Openmp => LabelSet::openmp(),
            Profile::Mpi => LabelSet::mpi(),
        }
    }

    /// Profile name as written in config files and report metadata.
    pub fn name(&self) -> &'static str {
        match self {
            Profile::Openmp => "openmp",
            Profile::Mpi => "mpi",
        }
    }

    /// Parse a profile name from a config file.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "openmp" => Some(Profile::Openmp),
            "mpi" => Some(Profile::Mpi),
            _ => None,
        }
    }
}

/// Output format for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text format (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// Format name as written in config files.
    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }

    /// Parse a format name from a config file.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the input path. Empty only under --init-config, which exits
    /// before the path is used (clap requires it otherwise).
    pub fn input_path(&self) -> &Path {
        self.input.as_deref().unwrap_or_else(|| Path::new(""))
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        // Validate an explicit label list
        if let Some(ref labels) = self.labels {
            if labels.is_empty() {
                return Err("Label list must contain at least one label".to_string());
            }

            for label in labels {
                if label.is_empty() {
                    return Err("Label list contains an empty label".to_string());
                }
                if label.contains(' ') {
                    return Err(format!(
                        "Label '{}' contains a space; labels are single tokens",
                        label
                    ));
                }
            }

            for (i, label) in labels.iter().enumerate() {
                if labels[..i].contains(label) {
                    return Err(format!("Label '{}' is listed more than once", label));
                }
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
