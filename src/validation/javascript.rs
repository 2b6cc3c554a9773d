//! JavaScript/TypeScript validator
//!
//! Structural checks only: delimiter matching plus template-literal
//! termination. There is no JS grammar in this process, so the validator
//! stays best-effort and fail-safe.

use std::time::Instant;

use crate::validation::brackets::{validate_brackets, BracketPair, ScanStyle};
use crate::validation::marker::{ValidationMarker, ValidationResult};

pub const SOURCE: &str = "js-validator";

const PAIRS: &[BracketPair] = &[
    BracketPair::new('{', '}'),
    BracketPair::new('[', ']'),
    BracketPair::new('(', ')'),
];

pub fn validate_javascript(code: &str) -> ValidationResult {
    let started = Instant::now();
    if code.trim().is_empty() {
        return ValidationResult::valid(started.elapsed());
    }

    let mut markers = validate_brackets(code, PAIRS, &ScanStyle::C_LIKE);
    markers.extend(check_template_literals(code));

    ValidationResult::from_markers(markers, started.elapsed())
}

/// Track backtick toggling across the whole input; an odd count means a
/// template literal never closed, reported at its opening backtick.
fn check_template_literals(code: &str) -> Vec<ValidationMarker> {
    let mut open: Option<(usize, usize)> = None;

    for (line_idx, line) in code.split('\n').enumerate() {
        let chars: Vec<char> = line.chars().collect();
        for (col, &ch) in chars.iter().enumerate() {
            if ch == '`' && !(col > 0 && chars[col - 1] == '\\') {
                open = match open {
                    None => Some((line_idx + 1, col + 1)),
                    Some(_) => None,
                };
            }
        }
    }

    match open {
        Some((line, col)) => vec![ValidationMarker::error(
            line,
            col,
            line,
            col + 1,
            "Unclosed template literal",
            SOURCE,
        )],
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_function_is_valid() {
        let result = validate_javascript("function f() { return 1; }");
        assert!(result.is_valid);
        assert!(result.markers.is_empty());
    }

    #[test]
    fn unclosed_brace_is_marked_at_its_opening_position() {
        let result = validate_javascript("function f() { return 1;");
        assert!(!result.is_valid);
        let marker = result
            .markers
            .iter()
            .find(|m| m.message.contains("Unclosed bracket '{'"))
            .expect("expected an unclosed-brace marker");
        assert_eq!(marker.start_line, 1);
        assert_eq!(marker.start_col, 14);
    }

    #[test]
    fn unclosed_template_literal_is_reported() {
        let result = validate_javascript("const s = `hello\nworld;");
        assert!(!result.is_valid);
        let marker = &result.markers[0];
        assert_eq!(marker.message, "Unclosed template literal");
        assert_eq!(marker.start_line, 1);
        assert_eq!(marker.start_col, 11);
    }

    #[test]
    fn brackets_in_comments_and_strings_do_not_count() {
        let result = validate_javascript("// {{{\nconst s = \"(((\";\nlet x = [1, 2];");
        assert!(result.is_valid);
    }
}
