//! Bracket/string structural validator
//!
//! A reusable state machine that finds unmatched and unclosed delimiters
//! while ignoring anything inside comments or string literals. Each pair
//! is scanned independently: the per-pair scan keeps the string/comment
//! handling trivially correct, and editor buffers are small enough that
//! the extra passes do not matter.

use crate::validation::marker::ValidationMarker;

pub const SOURCE: &str = "bracket-validator";

/// One delimiter pair to match, e.g. `(` / `)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketPair {
    pub open: char,
    pub close: char,
}

impl BracketPair {
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }
}

/// Comment and string syntax of the language being scanned.
#[derive(Debug, Clone, Copy)]
pub struct ScanStyle {
    pub line_comment: Option<&'static str>,
    pub block_comment: Option<(&'static str, &'static str)>,
    pub quotes: &'static [char],
    pub escape: Option<char>,
}

impl ScanStyle {
    /// JavaScript/TypeScript: `//`, `/* */`, single/double/backtick strings.
    pub const C_LIKE: ScanStyle = ScanStyle {
        line_comment: Some("//"),
        block_comment: Some(("/*", "*/")),
        quotes: &['"', '\'', '`'],
        escape: Some('\\'),
    };

    /// SQL: `--`, `/* */`, single-quoted strings and double-quoted idents.
    pub const SQL: ScanStyle = ScanStyle {
        line_comment: Some("--"),
        block_comment: Some(("/*", "*/")),
        quotes: &['\'', '"'],
        escape: Some('\\'),
    };

    /// Python: `#` comments, single/double-quoted strings.
    pub const PYTHON: ScanStyle = ScanStyle {
        line_comment: Some("#"),
        block_comment: None,
        quotes: &['\'', '"'],
        escape: Some('\\'),
    };

    /// JSON: no comments, double-quoted strings only.
    pub const JSON: ScanStyle = ScanStyle {
        line_comment: None,
        block_comment: None,
        quotes: &['"'],
        escape: Some('\\'),
    };
}

/// Scan `code` for unmatched/unclosed delimiters.
///
/// An unmatched close produces an Error at the closing character; every
/// delimiter still open at end of input produces an Error at its opening
/// position. Never fails; worst case it returns no markers.
pub fn validate_brackets(
    code: &str,
    pairs: &[BracketPair],
    style: &ScanStyle,
) -> Vec<ValidationMarker> {
    let lines: Vec<Vec<char>> = code.split('\n').map(|l| l.chars().collect()).collect();
    let mut markers = Vec::new();

    for pair in pairs {
        let mut stack: Vec<(usize, usize)> = Vec::new();
        let mut in_string: Option<char> = None;
        let mut in_block_comment = false;

        for (line_idx, line) in lines.iter().enumerate() {
            let mut col = 0;
            while col < line.len() {
                let ch = line[col];

                // Inside a string only the matching unescaped quote exits.
                if let Some(quote) = in_string {
                    if ch == quote && !escaped(line, col, style.escape) {
                        in_string = None;
                    }
                    col += 1;
                    continue;
                }

                if in_block_comment {
                    if let Some((_, close_seq)) = style.block_comment {
                        if starts_with_at(line, col, close_seq) {
                            in_block_comment = false;
                            col += close_seq.chars().count();
                            continue;
                        }
                    }
                    col += 1;
                    continue;
                }

                if let Some(opener) = style.line_comment {
                    if starts_with_at(line, col, opener) {
                        break; // rest of line is comment
                    }
                }

                if let Some((open_seq, _)) = style.block_comment {
                    if starts_with_at(line, col, open_seq) {
                        in_block_comment = true;
                        col += open_seq.chars().count();
                        continue;
                    }
                }

                if style.quotes.contains(&ch) && !escaped(line, col, style.escape) {
                    in_string = Some(ch);
                    col += 1;
                    continue;
                }

                if ch == pair.open {
                    stack.push((line_idx + 1, col + 1));
                } else if ch == pair.close && stack.pop().is_none() {
                    markers.push(ValidationMarker::error(
                        line_idx + 1,
                        col + 1,
                        line_idx + 1,
                        col + 2,
                        format!("Unmatched closing bracket '{}'", pair.close),
                        SOURCE,
                    ));
                }

                col += 1;
            }
        }

        for (line, col) in stack {
            markers.push(ValidationMarker::error(
                line,
                col,
                line,
                col + 1,
                format!("Unclosed bracket '{}'", pair.open),
                SOURCE,
            ));
        }
    }

    markers
}

fn escaped(line: &[char], col: usize, escape: Option<char>) -> bool {
    match escape {
        Some(esc) => col > 0 && line[col - 1] == esc,
        None => false,
    }
}

fn starts_with_at(line: &[char], col: usize, needle: &str) -> bool {
    let mut idx = col;
    for nch in needle.chars() {
        if line.get(idx) != Some(&nch) {
            return false;
        }
        idx += 1;
    }
    true
}
