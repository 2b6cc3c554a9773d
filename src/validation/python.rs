//! Python validator
//!
//! Line-oriented structural checks: indentation consistency, delimiter
//! matching, and triple-quoted-string balance.

use std::time::Instant;

use crate::validation::brackets::{validate_brackets, BracketPair, ScanStyle};
use crate::validation::marker::{ValidationMarker, ValidationResult};

pub const SOURCE: &str = "python-validator";

const PAIRS: &[BracketPair] = &[
    BracketPair::new('(', ')'),
    BracketPair::new('[', ']'),
    BracketPair::new('{', '}'),
];

pub fn validate_python(code: &str) -> ValidationResult {
    let started = Instant::now();
    if code.trim().is_empty() {
        return ValidationResult::valid(started.elapsed());
    }

    let mut markers = Vec::new();

    for (line_idx, line) in code.split('\n').enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
        if indent.contains('\t') && indent.contains(' ') {
            markers.push(ValidationMarker::error(
                line_idx + 1,
                1,
                line_idx + 1,
                indent.chars().count() + 1,
                "Mixed tabs and spaces in indentation",
                SOURCE,
            ));
        }
    }

    markers.extend(validate_brackets(code, PAIRS, &ScanStyle::PYTHON));
    markers.extend(check_triple_quotes(code));

    ValidationResult::from_markers(markers, started.elapsed())
}

/// An odd number of `"""` or `'''` delimiters means a docstring or
/// multiline string never closed; reported at the end of the input where
/// the missing terminator belongs.
fn check_triple_quotes(code: &str) -> Vec<ValidationMarker> {
    let mut markers = Vec::new();
    let lines: Vec<&str> = code.split('\n').collect();
    let last_line = lines.len();
    let last_len = lines.last().map_or(0, |l| l.chars().count());

    for quote in ["\"\"\"", "'''"] {
        if code.matches(quote).count() % 2 != 0 {
            markers.push(ValidationMarker::error(
                last_line,
                1,
                last_line,
                last_len + 1,
                format!("Unclosed {quote} string"),
                SOURCE,
            ));
        }
    }

    markers
}
