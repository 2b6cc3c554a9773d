//! Dialect-aware query validation
//!
//! Three layers, additive except for one hard precedence rule:
//!
//! - Layer A: the structured grammar, when one is registered for the
//!   dialect. Raw parser phrasings are rewritten into display messages.
//! - Layer B: the fallback parser, run only when Layer A produced zero
//!   markers. The fallback never duplicates or overrides a structured
//!   error.
//! - Layer C: heuristic rules, run unconditionally.

use std::time::Instant;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::sql::dialect::{structured_grammar, Dialect};
use crate::sql::{fallback, rules};
use crate::validation::marker::{ValidationMarker, ValidationOptions, ValidationResult};

pub const GRAMMAR_SOURCE: &str = "sql-grammar";

/// Validate `code` as SQL under `dialect`.
pub fn validate_query(
    code: &str,
    dialect: Dialect,
    options: Option<&ValidationOptions>,
) -> ValidationResult {
    let started = Instant::now();
    if code.trim().is_empty() {
        return ValidationResult::valid(started.elapsed());
    }

    let mut markers: Vec<ValidationMarker> = Vec::new();

    if let Some(grammar) = structured_grammar(dialect) {
        for raw in grammar.check(code) {
            markers.push(ValidationMarker::error(
                raw.span.start_line,
                raw.span.start_col,
                raw.span.end_line,
                raw.span.end_col,
                normalize_message(&raw.message),
                GRAMMAR_SOURCE,
            ));
        }
    }

    if markers.is_empty() {
        if let Err(err) = fallback::parse_with_fallback(code, dialect) {
            // Semantic-lookup artifacts from the fallback parser are not
            // syntax errors; drop them. Known-fragile: this matches on
            // message text because the parser exposes no error class for
            // the case.
            if !is_semantic_lookup_artifact(&err.message) {
                markers.push(fallback::extract_marker(&err, code));
            }
        }
    }

    let strict = options.is_some_and(|o| o.strict);
    markers.extend(rules::built_in_markers(code, strict));
    if let Some(options) = options {
        for rule in &options.custom_rules {
            markers.extend((rule.validate)(code));
        }
    }

    ValidationResult::from_markers(markers, started.elapsed())
}

static MISMATCHED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^mismatched input '([^']*)'").unwrap());
static NO_VIABLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^no viable alternative at input '([^']*)'").unwrap());
static NOT_VALID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^'([^']*)' is not valid at this position").unwrap());
static MISSING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^missing '([^']*)'").unwrap());

static COLUMN_MISSING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bcolumn\b.*\bdoes not exist\b").unwrap());

/// Rewrite recurring parser-internal phrasings into display messages.
/// Unrecognized messages pass through unchanged.
fn normalize_message(raw: &str) -> String {
    if let Some(caps) = MISMATCHED_RE.captures(raw) {
        return format!("Unexpected token '{}'", &caps[1]);
    }
    if let Some(caps) = NO_VIABLE_RE.captures(raw) {
        return format!("Invalid syntax near '{}'", &caps[1]);
    }
    if let Some(caps) = NOT_VALID_RE.captures(raw) {
        return format!("Invalid syntax near '{}'", &caps[1]);
    }
    if let Some(caps) = MISSING_RE.captures(raw) {
        return format!("Missing '{}'", &caps[1]);
    }
    raw.to_string()
}

fn is_semantic_lookup_artifact(message: &str) -> bool {
    COLUMN_MISSING_RE.is_match(message)
}
