//! Report rendering.
//!
//! This module renders an aggregation result as the two-block plain
//! text report (raw sample lists, then per-phase means) or as a JSON
//! document.

use crate::models::{AggregationResult, PhaseSummary, Report, ReportMetadata};
use anyhow::Result;
use thiserror::Error;
use tracing::warn;

/// Means are printed with exactly this many digits after the decimal
/// point, matching the log producer's own timing resolution.
const MEAN_DECIMAL_DIGITS: usize = 10;

/// Error raised when a configured phase collected no samples.
///
/// A mean is undefined for an empty sample set; rather than print a
/// fabricated value the run fails and names every affected label.
#[derive(Debug, Error)]
#[error("no samples collected for: {}", .labels.join(", "))]
pub struct NoSamplesError {
    pub labels: Vec<String>,
}

/// Rendering options, resolved from CLI flags and config.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Include the raw per-phase sample lists (block one).
    pub include_samples: bool,
    /// Report empty phases as warnings and omit them from the means
    /// block, instead of failing the run.
    pub allow_empty: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_samples: true,
            allow_empty: false,
        }
    }
}

/// Check the empty-phase policy for a result.
///
/// With `allow_empty` unset, any configured label that never appeared
/// in the input fails the run. With it set, each empty label is logged
/// and later omitted from the means block.
fn check_empty_phases(
    result: &AggregationResult,
    options: &RenderOptions,
) -> Result<(), NoSamplesError> {
    let empty = result.empty_labels();
    if empty.is_empty() {
        return Ok(());
    }

    if options.allow_empty {
        for label in &empty {
            warn!("no samples collected for '{}', omitting its mean", label);
        }
        Ok(())
    } else {
        Err(NoSamplesError {
            labels: empty.into_iter().map(String::from).collect(),
        })
    }
}

/// Render the plain text report.
///
/// Block one lists each phase's raw samples in encounter order; block
/// two prints each phase's mean with ten digits after the decimal
/// point. Phases appear in label declaration order in both blocks.
pub fn generate_text_report(
    result: &AggregationResult,
    options: &RenderOptions,
) -> Result<String, NoSamplesError> {
    check_empty_phases(result, options)?;

    let mut output = String::new();

    if options.include_samples {
        output.push_str(&generate_samples_section(result));
    }
    output.push_str(&generate_means_section(result));

    Ok(output)
}

/// Generate the raw sample lists, one phase per line.
fn generate_samples_section(result: &AggregationResult) -> String {
    let mut section = String::new();

    for phase in &result.phases {
        section.push_str(&format!("{} list = {:?}\n", phase.label, phase.values));
    }

    section
}

/// Generate the per-phase means, one phase per line.
fn generate_means_section(result: &AggregationResult) -> String {
    let mut section = String::new();

    for phase in &result.phases {
        if let Some(mean) = phase.mean() {
            section.push_str(&format!(
                "{} = {:.digits$}\n",
                phase.label,
                mean,
                digits = MEAN_DECIMAL_DIGITS
            ));
        }
    }

    section
}

/// Assemble the structured report document from an aggregation result.
pub fn build_report(result: &AggregationResult, metadata: ReportMetadata) -> Report {
    Report {
        metadata,
        phases: result
            .phases
            .iter()
            .map(|phase| PhaseSummary {
                label: phase.label.clone(),
                samples: phase.values.clone(),
                mean: phase.mean(),
            })
            .collect(),
    }
}

/// Render the report as pretty-printed JSON.
pub fn generate_json_report(
    result: &AggregationResult,
    metadata: ReportMetadata,
    options: &RenderOptions,
) -> Result<String> {
    check_empty_phases(result, options)?;

    let report = build_report(result, metadata);
    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LabelSet;
    use chrono::Utc;

    fn result_with(samples: &[(&str, &[f64])], labels: &LabelSet) -> AggregationResult {
        let mut result = AggregationResult::new(labels);
        for (label, values) in samples {
            for value in *values {
                result.record(label, *value);
            }
        }
        result
    }

    fn two_labels() -> LabelSet {
        LabelSet::custom(vec!["InitGrid".to_string(), "GenerationField".to_string()])
    }

    fn metadata() -> ReportMetadata {
        ReportMetadata {
            input_file: "run.log".to_string(),
            profile: "openmp".to_string(),
            generated_at: Utc::now(),
            lines_scanned: 3,
            records_matched: 3,
        }
    }

    #[test]
    fn test_text_report_blocks_and_order() {
        let result = result_with(
            &[("InitGrid", &[2.5, 3.5]), ("GenerationField", &[1.0])],
            &two_labels(),
        );

        let text = generate_text_report(&result, &RenderOptions::default()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "InitGrid list = [2.5, 3.5]",
                "GenerationField list = [1.0]",
                "InitGrid = 3.0000000000",
                "GenerationField = 1.0000000000",
            ]
        );
    }

    #[test]
    fn test_means_have_ten_decimal_digits() {
        let result = result_with(&[("InitGrid", &[1.0, 2.0])], &LabelSet::custom(vec!["InitGrid".to_string()]));

        let text = generate_text_report(&result, &RenderOptions::default()).unwrap();
        assert!(text.contains("InitGrid = 1.5000000000"));
    }

    #[test]
    fn test_empty_phase_fails_by_default() {
        let result = result_with(&[("InitGrid", &[2.5])], &two_labels());

        let err = generate_text_report(&result, &RenderOptions::default()).unwrap_err();
        assert_eq!(err.labels, vec!["GenerationField".to_string()]);
        assert!(err.to_string().contains("GenerationField"));
    }

    #[test]
    fn test_allow_empty_omits_mean_but_keeps_list() {
        let result = result_with(&[("InitGrid", &[2.5])], &two_labels());

        let options = RenderOptions {
            allow_empty: true,
            ..RenderOptions::default()
        };
        let text = generate_text_report(&result, &options).unwrap();

        assert!(text.contains("GenerationField list = []"));
        assert!(text.contains("InitGrid = 2.5000000000"));
        // No fabricated mean for the empty phase.
        assert!(!text.contains("GenerationField ="));
    }

    #[test]
    fn test_include_samples_toggle() {
        let result = result_with(&[("InitGrid", &[2.5])], &LabelSet::custom(vec!["InitGrid".to_string()]));

        let options = RenderOptions {
            include_samples: false,
            ..RenderOptions::default()
        };
        let text = generate_text_report(&result, &options).unwrap();

        assert!(!text.contains("list ="));
        assert!(text.contains("InitGrid = 2.5000000000"));
    }

    #[test]
    fn test_json_report_structure() {
        let result = result_with(
            &[("InitGrid", &[2.5, 3.5]), ("GenerationField", &[1.0])],
            &two_labels(),
        );

        let json = generate_json_report(&result, metadata(), &RenderOptions::default()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["metadata"]["profile"], "openmp");
        assert_eq!(parsed["phases"][0]["label"], "InitGrid");
        assert_eq!(parsed["phases"][0]["samples"][1], 3.5);
        assert_eq!(parsed["phases"][0]["mean"], 3.0);
    }
}
