//! JSON validator
//!
//! Fail-fast structured-data validation: one `serde_json` parse, one
//! marker on failure, then the structural bracket scan.

use std::time::Instant;

use crate::validation::brackets::{validate_brackets, BracketPair, ScanStyle};
use crate::validation::marker::{ValidationMarker, ValidationResult};

pub const SOURCE: &str = "json-validator";

const PAIRS: &[BracketPair] = &[BracketPair::new('{', '}'), BracketPair::new('[', ']')];

pub fn validate_json(code: &str) -> ValidationResult {
    let started = Instant::now();
    if code.trim().is_empty() {
        return ValidationResult::valid(started.elapsed());
    }

    let mut markers = Vec::new();

    if let Err(err) = serde_json::from_str::<serde_json::Value>(code) {
        markers.push(marker_from_error(&err, code));
    }

    markers.extend(validate_brackets(code, PAIRS, &ScanStyle::JSON));

    ValidationResult::from_markers(markers, started.elapsed())
}

/// serde_json errors carry their own 1-based line/column, so location
/// recovery here is the structured-location strategy only, clamped to the
/// actual input.
fn marker_from_error(err: &serde_json::Error, code: &str) -> ValidationMarker {
    let line_count = code.split('\n').count();
    let line = err.line().clamp(1, line_count);
    let col = err.column().max(1);

    ValidationMarker::error(line, col, line, col + 1, err.to_string(), SOURCE)
}
