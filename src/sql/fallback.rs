//! Fallback query parser
//!
//! Runs only when the structured grammar stayed silent. Wraps the
//! general-purpose `sqlparser` crate and recovers a marker position from
//! whatever shape of error it produces, via a fixed, ordered strategy
//! chain with a guaranteed terminal default:
//!
//! 1. a structured span on the error itself;
//! 2. a parser-internal location whose column is 0-based (+1 correction);
//! 3. a regex match over the message text (`at/on/line N[, column M]`);
//! 4. an end-of-input message, positioned at the last line's final column;
//! 5. line 1, column 1.
//!
//! New strategies must be inserted into this ordering, not appended ad hoc.

use once_cell::sync::Lazy;
use regex::Regex;
use sqlparser::parser::Parser;
use sqlparser::tokenizer::Tokenizer;
use thiserror::Error;

use crate::sql::dialect::Dialect;
use crate::validation::marker::ValidationMarker;

pub const SOURCE: &str = "sql-parser";

/// Exact 1-based range reported by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorSpan {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

/// Parser-internal location; `column` is 0-based and needs a +1
/// correction before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLocation {
    pub line: usize,
    pub column: usize,
}

/// Error surfaced at the fallback-parser boundary.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct FallbackError {
    pub message: String,
    pub span: Option<ErrorSpan>,
    pub raw_location: Option<RawLocation>,
}

/// Try to build a generic syntax tree for `code` under `dialect`.
pub fn parse_with_fallback(code: &str, dialect: Dialect) -> Result<(), FallbackError> {
    let dialect_impl = dialect.fallback_dialect();

    // Tokenize first: lexical failures carry an exact location object,
    // which parse errors only echo as message text.
    let mut tokenizer = Tokenizer::new(dialect_impl.as_ref(), code);
    if let Err(err) = tokenizer.tokenize() {
        let line = err.location.line as usize;
        let column = err.location.column as usize;
        return Err(FallbackError {
            message: err.message,
            span: Some(ErrorSpan {
                start_line: line,
                start_col: column,
                end_line: line,
                end_col: column + 1,
            }),
            raw_location: None,
        });
    }

    match Parser::parse_sql(dialect_impl.as_ref(), code) {
        Ok(_) => Ok(()),
        Err(err) => Err(FallbackError {
            message: err.to_string(),
            span: None,
            raw_location: None,
        }),
    }
}

static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:at|on)?\s*\bline:?\s*(\d+)(?:\s*[,:]?\s*column:?\s*(\d+))?").unwrap()
});

static SYNTAX_BOILERPLATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)you have an error in your sql syntax;?").unwrap());

static PARSE_ERROR_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)parse error on line \d+:?").unwrap());

static PARSER_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^sql parser error:\s*").unwrap());

/// Recover a marker from a fallback error, applying the strategy chain
/// and clamping every extracted line to the input's actual line count.
pub fn extract_marker(err: &FallbackError, code: &str) -> ValidationMarker {
    let lines: Vec<&str> = code.split('\n').collect();
    let line_count = lines.len();
    let line_len = |line: usize| lines.get(line - 1).map_or(0, |l| l.chars().count());

    let (start_line, start_col, end_line, end_col);

    if let Some(span) = &err.span {
        start_line = span.start_line.clamp(1, line_count);
        end_line = span.end_line.clamp(1, line_count);
        start_col = span.start_col.max(1);
        end_col = span.end_col.max(start_col + 1);
    } else if let Some(raw) = &err.raw_location {
        start_line = raw.line.clamp(1, line_count);
        end_line = start_line;
        start_col = raw.column + 1;
        end_col = start_col + 1;
    } else if let Some((line, col)) = location_from_message(&err.message) {
        start_line = line.clamp(1, line_count);
        end_line = start_line;
        match col {
            Some(col) => {
                start_col = col.max(1).min(line_len(start_line) + 1);
                end_col = start_col + 1;
            }
            None => {
                start_col = 1;
                end_col = line_len(start_line) + 1;
            }
        }
    } else if mentions_end_of_input(&err.message) {
        start_line = line_count;
        end_line = line_count;
        start_col = line_len(line_count).max(1);
        end_col = start_col + 1;
    } else {
        start_line = 1;
        end_line = 1;
        start_col = 1;
        end_col = line_len(1).max(1);
    }

    ValidationMarker::error(
        start_line,
        start_col,
        end_line,
        end_col,
        clean_message(&err.message),
        SOURCE,
    )
}

fn location_from_message(message: &str) -> Option<(usize, Option<usize>)> {
    let caps = LOCATION_RE.captures(message)?;
    let line = caps.get(1)?.as_str().parse().ok()?;
    let col = caps.get(2).and_then(|m| m.as_str().parse().ok());
    Some((line, col))
}

fn mentions_end_of_input(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("end of input")
        || lower.contains("unexpected end of string")
        || lower.contains("eof")
}

fn clean_message(message: &str) -> String {
    let message = PARSER_PREFIX_RE.replace(message, "");
    let message = SYNTAX_BOILERPLATE_RE.replace_all(&message, "");
    let message = PARSE_ERROR_PREFIX_RE.replace_all(&message, "");
    let cleaned = message.trim();
    if cleaned.is_empty() {
        "SQL syntax error".to_string()
    } else {
        cleaned.to_string()
    }
}
