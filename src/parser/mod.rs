//! Line tokenizer for simulation run logs.
//!
//! The simulation prints one timing record per line, space-delimited,
//! with the phase label first and the value second-to-last:
//!
//! ```text
//! InitGrid completed in 2.513000 ms
//! node_computation rank 3 step 12 0.004512 s
//! ```
//!
//! Lines whose first token is not a configured label are passed over
//! silently; that covers blank lines and unrelated log noise.

use crate::models::LabelSet;
use thiserror::Error;

/// Position of the value token, counted from the end of the split line.
/// Records end with `<value> <unit>`, so the value sits at `len - 2`.
const VALUE_OFFSET_FROM_END: usize = 2;

/// Error raised for a line that names a configured phase but does not
/// carry a readable timing value. These are fatal: a matching record
/// with a bad value field is never silently skipped.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The record is too short to have a value field at all.
    #[error("line {line}: '{label}' record has no value field")]
    TruncatedRecord { line: usize, label: String },

    /// The token in the value position is not a floating-point number.
    #[error("line {line}: '{label}' value '{token}' is not numeric")]
    InvalidValue {
        line: usize,
        label: String,
        token: String,
        source: std::num::ParseFloatError,
    },
}

/// One successfully parsed timing record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingRecord<'a> {
    /// The matched phase label, borrowed from the configured set.
    pub label: &'a str,
    /// The timing value.
    pub value: f64,
}

/// Parse a single log line against the configured label set.
///
/// The line is split on single space characters (empty tokens are kept,
/// matching the log producer's own field separation). If the first
/// token exactly equals a configured label, the second-to-last token is
/// parsed as the timing value; otherwise the line is ignored.
///
/// # Returns
///
/// - `Ok(Some(record))` for a matching, well-formed record
/// - `Ok(None)` for a line that matches no configured label
/// - `Err(ParseError)` for a matching line with a missing or
///   non-numeric value token
pub fn parse_line<'a>(
    line: &str,
    labels: &'a LabelSet,
    line_no: usize,
) -> Result<Option<TimingRecord<'a>>, ParseError> {
    let tokens: Vec<&str> = line.split(' ').collect();

    let label = match labels.match_token(tokens[0]) {
        Some(label) => label,
        None => return Ok(None),
    };

    if tokens.len() < VALUE_OFFSET_FROM_END {
        return Err(ParseError::TruncatedRecord {
            line: line_no,
            label: label.to_string(),
        });
    }

    let token = tokens[tokens.len() - VALUE_OFFSET_FROM_END];
    let value = token
        .parse::<f64>()
        .map_err(|source| ParseError::InvalidValue {
            line: line_no,
            label: label.to_string(),
            token: token.to_string(),
            source,
        })?;

    Ok(Some(TimingRecord { label, value }))
}
