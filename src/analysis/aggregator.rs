//! Sample aggregation over a log stream.
//!
//! This module runs the single forward pass that collects per-phase
//! timing samples from a line source.

use crate::models::{AggregationResult, LabelSet};
use crate::parser::{parse_line, ParseError};
use std::io::BufRead;
use thiserror::Error;
use tracing::debug;

/// Error raised while scanning the input stream.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A matching record could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The underlying reader failed mid-scan.
    #[error("failed reading input at line {line}")]
    Io {
        line: usize,
        source: std::io::Error,
    },
}

/// Aggregate timing samples from `reader` against the configured labels.
///
/// Performs one lazy, forward-only pass over the lines; nothing is
/// buffered beyond the current line, and restarting requires reopening
/// the source. Matched values are appended in encounter order. The
/// first parse or I/O failure aborts the scan.
pub fn aggregate<R: BufRead>(
    reader: R,
    labels: &LabelSet,
) -> Result<AggregationResult, AggregateError> {
    let mut result = AggregationResult::new(labels);

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| AggregateError::Io {
            line: line_no,
            source,
        })?;
        result.lines_scanned += 1;

        if let Some(record) = parse_line(&line, labels, line_no)? {
            result.record(record.label, record.value);
        }
    }

    for phase in &result.phases {
        debug!("{}: {} samples", phase.label, phase.len());
    }

    Ok(result)
}
