//! Built-in query heuristics
//!
//! Pattern-based checks that run on every validation pass, regardless of
//! what the parsers concluded. These catch defects that parse cleanly
//! (or would drown in a parser's cascade) but are almost always mistakes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::validation::marker::{Severity, ValidationMarker};

pub const SOURCE: &str = "sql-rules";

/// `SELECT 1`, `SELECT 'x'` — literal-only selects that legitimately
/// carry no FROM clause.
static LITERAL_SELECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)SELECT\s+[\d'"]"#).unwrap());

static TRAILING_COMMA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i),\s*\n?\s*(FROM|WHERE|GROUP|ORDER|HAVING|LIMIT)\b").unwrap());

static JOIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(LEFT|RIGHT|INNER|OUTER|CROSS)?\s*JOIN\b").unwrap());

static ON_OR_USING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(ON|USING)\b").unwrap());

/// Run every built-in rule over `code`. `strict` escalates the heuristic
/// warnings to errors.
pub fn built_in_markers(code: &str, strict: bool) -> Vec<ValidationMarker> {
    let mut markers = Vec::new();
    let heuristic = if strict {
        Severity::Error
    } else {
        Severity::Warning
    };

    markers.extend(select_without_from(code, heuristic));
    markers.extend(trailing_comma(code));
    markers.extend(join_without_on(code, heuristic));

    markers
}

fn select_without_from(code: &str, severity: Severity) -> Option<ValidationMarker> {
    let upper = code.to_uppercase();
    if upper.contains("SELECT") && !upper.contains("FROM") && !LITERAL_SELECT_RE.is_match(code) {
        return Some(ValidationMarker::new(
            severity,
            1,
            1,
            1,
            7,
            "SELECT statement may be missing a FROM clause",
            SOURCE,
        ));
    }
    None
}

fn trailing_comma(code: &str) -> Vec<ValidationMarker> {
    TRAILING_COMMA_RE
        .captures_iter(code)
        .filter_map(|caps| {
            let m = caps.get(0)?;
            let keyword = caps.get(1)?.as_str().to_uppercase();
            let (line, col) = line_col_at(code, m.start());
            Some(
                ValidationMarker::error(
                    line,
                    col,
                    line,
                    col + 1,
                    format!("Trailing comma before {keyword}"),
                    SOURCE,
                )
                .with_code("SQL001"),
            )
        })
        .collect()
}

fn join_without_on(code: &str, severity: Severity) -> Vec<ValidationMarker> {
    JOIN_RE
        .captures_iter(code)
        .filter_map(|caps| {
            let m = caps.get(0)?;
            if caps
                .get(1)
                .is_some_and(|kw| kw.as_str().eq_ignore_ascii_case("CROSS"))
            {
                return None;
            }
            // Look a short distance ahead for the join condition.
            let window_end = floor_char_boundary(code, (m.end() + 100).min(code.len()));
            if ON_OR_USING_RE.is_match(&code[m.end()..window_end]) {
                return None;
            }
            let (line, col) = line_col_at(code, m.start());
            Some(ValidationMarker::new(
                severity,
                line,
                col,
                line,
                col + m.as_str().chars().count(),
                "JOIN clause may be missing an ON condition",
                SOURCE,
            ))
        })
        .collect()
}

/// 1-based line/column of a byte offset.
fn line_col_at(code: &str, offset: usize) -> (usize, usize) {
    let before = &code[..offset];
    let line = before.matches('\n').count() + 1;
    let col = match before.rfind('\n') {
        Some(nl) => before[nl + 1..].chars().count() + 1,
        None => before.chars().count() + 1,
    };
    (line, col)
}

fn floor_char_boundary(code: &str, mut idx: usize) -> usize {
    while idx > 0 && !code.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}
