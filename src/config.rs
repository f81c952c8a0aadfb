//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.phasestat.toml` files.

use crate::cli::{OutputFormat, Profile};
use crate::models::LabelSet;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Label-set settings.
    #[serde(default)]
    pub labels: LabelsConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,

    /// Warn about phases with no samples instead of failing the run.
    #[serde(default)]
    pub allow_empty: bool,
}

/// Label-set settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelsConfig {
    /// Built-in profile name ("openmp" or "mpi").
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Explicit ordered label list. When non-empty it replaces the
    /// profile's label set.
    #[serde(default)]
    pub custom: Vec<String>,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            custom: Vec::new(),
        }
    }
}

fn default_profile() -> String {
    "openmp".to_string()
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format ("text" or "json").
    #[serde(default = "default_format")]
    pub format: String,

    /// Include the raw per-phase sample lists in the report.
    #[serde(default = "default_true")]
    pub include_samples: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            include_samples: true,
        }
    }
}

fn default_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".phasestat.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        // An explicit profile on the command line also replaces a
        // configured custom label list.
        if let Some(profile) = args.profile {
            self.labels.profile = profile.name().to_string();
            if args.labels.is_none() {
                self.labels.custom.clear();
            }
        }

        if let Some(ref labels) = args.labels {
            self.labels.custom = labels.clone();
        }

        if let Some(format) = args.format {
            self.report.format = format.name().to_string();
        }

        // Flags always override
        if args.allow_empty {
            self.general.allow_empty = true;
        }
        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Resolve the label set in effect: the custom list when non-empty,
    /// the named profile's set otherwise.
    pub fn effective_labels(&self) -> Result<LabelSet> {
        if !self.labels.custom.is_empty() {
            return Ok(LabelSet::custom(self.labels.custom.clone()));
        }

        let profile = Profile::from_name(&self.labels.profile).with_context(|| {
            format!(
                "Unknown profile '{}' (expected 'openmp' or 'mpi')",
                self.labels.profile
            )
        })?;
        Ok(profile.label_set())
    }

    /// Resolve the output format in effect.
    pub fn effective_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_name(&self.report.format).with_context(|| {
            format!(
                "Unknown output format '{}' (expected 'text' or 'json')",
                self.report.format
            )
        })
    }

    /// Name of the label set for report metadata.
    pub fn profile_name(&self) -> &str {
        if self.labels.custom.is_empty() {
            &self.labels.profile
        } else {
            "custom"
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
