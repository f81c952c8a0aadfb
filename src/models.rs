//! Data models for the phase-timing summarizer.
//!
//! This module contains the core data structures used throughout
//! the application: the configured label set, per-phase sample
//! collections, and the report document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Labels recognized by serial/OpenMP simulation runs.
pub const OPENMP_LABELS: [&str; 4] = [
    "InitGrid",
    "GenerationField",
    "ParticleGeneration",
    "SystemEvolution",
];

/// Labels recognized by MPI simulation runs. Superset of the OpenMP set
/// plus the per-node timing phases.
pub const MPI_LABELS: [&str; 7] = [
    "InitGrid",
    "GenerationField",
    "ParticleGeneration",
    "SystemEvolution",
    "node_computation",
    "node_communication",
    "InitMPI",
];

/// An ordered, closed set of phase labels recognized during aggregation.
///
/// The set is startup configuration, never derived from the input. Order
/// is significant: it fixes both report ordering and, should two entries
/// ever overlap, which one a token is matched against (first wins).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// The 4-label set used by serial/OpenMP run logs.
    pub fn openmp() -> Self {
        Self::custom(OPENMP_LABELS.iter().map(|s| s.to_string()).collect())
    }

    /// The 7-label set used by MPI run logs.
    pub fn mpi() -> Self {
        Self::custom(MPI_LABELS.iter().map(|s| s.to_string()).collect())
    }

    /// Build a set from an explicit ordered label list.
    pub fn custom(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Match a token against the set. Returns the matched label,
    /// scanning in declaration order so the first entry wins.
    pub fn match_token(&self, token: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| label.as_str() == token)
            .map(|label| label.as_str())
    }

    /// Labels in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|label| label.as_str())
    }

    #[allow(dead_code)] // Utility accessor
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[allow(dead_code)] // Utility accessor
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels.join(", "))
    }
}

/// Timing samples collected for one phase label, in encounter order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseSamples {
    /// The phase label these samples belong to.
    pub label: String,
    /// Sample values in the order they appeared in the input.
    pub values: Vec<f64>,
}

impl PhaseSamples {
    /// Creates an empty sample collection for a label.
    pub fn new(label: String) -> Self {
        Self {
            label,
            values: Vec::new(),
        }
    }

    /// Arithmetic mean of the samples. `None` when no samples were
    /// collected; a mean is only defined for a non-empty collection.
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let sum: f64 = self.values.iter().sum();
        Some(sum / self.values.len() as f64)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The result of one aggregation pass: per-label samples in label
/// declaration order, plus scan counters. Built fresh per invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationResult {
    /// One entry per configured label, in declaration order.
    pub phases: Vec<PhaseSamples>,
    /// Total lines read from the input.
    pub lines_scanned: usize,
    /// Lines that matched a configured label.
    pub records_matched: usize,
}

impl AggregationResult {
    /// Creates a result with an empty sample collection per label.
    pub fn new(labels: &LabelSet) -> Self {
        Self {
            phases: labels
                .iter()
                .map(|label| PhaseSamples::new(label.to_string()))
                .collect(),
            lines_scanned: 0,
            records_matched: 0,
        }
    }

    /// Append a sample to the collection for `label`.
    ///
    /// The label must come from the same `LabelSet` the result was
    /// created with; unknown labels are ignored.
    pub fn record(&mut self, label: &str, value: f64) {
        if let Some(phase) = self.phases.iter_mut().find(|p| p.label == label) {
            phase.values.push(value);
            self.records_matched += 1;
        }
    }

    /// Look up the samples for a label.
    #[allow(dead_code)] // Utility accessor
    pub fn get(&self, label: &str) -> Option<&PhaseSamples> {
        self.phases.iter().find(|p| p.label == label)
    }

    /// Labels that never appeared in the input, in declaration order.
    pub fn empty_labels(&self) -> Vec<&str> {
        self.phases
            .iter()
            .filter(|p| p.is_empty())
            .map(|p| p.label.as_str())
            .collect()
    }
}

/// Per-phase entry in the JSON report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseSummary {
    /// The phase label.
    pub label: String,
    /// Raw samples in encounter order.
    pub samples: Vec<f64>,
    /// Arithmetic mean of the samples.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
}

/// Metadata about one summarization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Path of the summarized log file.
    pub input_file: String,
    /// Name of the label-set profile in effect.
    pub profile: String,
    /// Date and time the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Total lines read from the input.
    pub lines_scanned: usize,
    /// Lines that matched a configured label.
    pub records_matched: usize,
}

/// The complete summarization report (JSON output format).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the run.
    pub metadata: ReportMetadata,
    /// Per-phase samples and means, in label declaration order.
    pub phases: Vec<PhaseSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_label_sets() {
        let openmp = LabelSet::openmp();
        let mpi = LabelSet::mpi();
        assert_eq!(openmp.len(), 4);
        assert_eq!(mpi.len(), 7);

        // MPI extends the OpenMP set in the same order.
        let mpi_labels: Vec<&str> = mpi.iter().collect();
        let openmp_labels: Vec<&str> = openmp.iter().collect();
        assert_eq!(&mpi_labels[..4], &openmp_labels[..]);
        assert!(mpi_labels.contains(&"node_computation"));
        assert!(mpi_labels.contains(&"InitMPI"));
    }

    #[test]
    fn test_match_token_is_exact() {
        let labels = LabelSet::openmp();
        assert_eq!(labels.match_token("InitGrid"), Some("InitGrid"));
        assert_eq!(labels.match_token("initgrid"), None);
        assert_eq!(labels.match_token("InitGridX"), None);
        assert_eq!(labels.match_token(""), None);
    }

    #[test]
    fn test_match_token_first_wins() {
        let labels = LabelSet::custom(vec![
            "Phase".to_string(),
            "Phase".to_string(),
            "Other".to_string(),
        ]);
        // Duplicate entries resolve to the first occurrence.
        assert_eq!(labels.match_token("Phase"), Some("Phase"));
        assert_eq!(labels.match_token("Other"), Some("Other"));
    }

    #[test]
    fn test_mean_of_samples() {
        let mut samples = PhaseSamples::new("InitGrid".to_string());
        samples.values.extend([2.5, 3.5]);
        let mean = samples.mean().unwrap();
        assert!((mean - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_undefined_when_empty() {
        let samples = PhaseSamples::new("InitGrid".to_string());
        assert_eq!(samples.mean(), None);
    }

    #[test]
    fn test_record_preserves_order() {
        let labels = LabelSet::openmp();
        let mut result = AggregationResult::new(&labels);

        result.record("InitGrid", 2.5);
        result.record("SystemEvolution", 9.0);
        result.record("InitGrid", 3.5);

        assert_eq!(result.get("InitGrid").unwrap().values, vec![2.5, 3.5]);
        assert_eq!(result.get("SystemEvolution").unwrap().values, vec![9.0]);
        assert_eq!(result.records_matched, 3);
    }

    #[test]
    fn test_empty_labels() {
        let labels = LabelSet::openmp();
        let mut result = AggregationResult::new(&labels);
        result.record("InitGrid", 1.0);

        assert_eq!(
            result.empty_labels(),
            vec!["GenerationField", "ParticleGeneration", "SystemEvolution"]
        );
    }
}
