//! Validation dispatcher
//!
//! Routes `(code, language, options)` to the right validator. Unknown or
//! unvalidated languages are valid by default, and no internal validator
//! failure may escape: a panicking validator is logged and mapped to the
//! permissive default so a defect here never blocks editing.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use crate::sql;
use crate::validation::javascript::validate_javascript;
use crate::validation::json::validate_json;
use crate::validation::marker::{ValidationOptions, ValidationResult};
use crate::validation::python::validate_python;

/// Languages the editor host can ask the engine about.
///
/// The set is closed on purpose: every variant is routed explicitly, and
/// the ones without a validator share the single permissive default arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Sql,
    Json,
    JavaScript,
    TypeScript,
    Python,
    Markdown,
    Shell,
    Plain,
}

impl LanguageId {
    /// Resolve a host language identifier. Anything unrecognized maps to
    /// `Plain`, which validates as trivially clean.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "sql" => LanguageId::Sql,
            "json" => LanguageId::Json,
            "javascript" | "js" => LanguageId::JavaScript,
            "typescript" | "ts" => LanguageId::TypeScript,
            "python" | "py" => LanguageId::Python,
            "markdown" | "md" => LanguageId::Markdown,
            "shell" | "sh" | "bash" => LanguageId::Shell,
            _ => LanguageId::Plain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageId::Sql => "sql",
            LanguageId::Json => "json",
            LanguageId::JavaScript => "javascript",
            LanguageId::TypeScript => "typescript",
            LanguageId::Python => "python",
            LanguageId::Markdown => "markdown",
            LanguageId::Shell => "shell",
            LanguageId::Plain => "plaintext",
        }
    }
}

/// Validate `code` as `language`. The sole entry point the host calls.
pub fn validate(
    code: &str,
    language: LanguageId,
    options: Option<&ValidationOptions>,
) -> ValidationResult {
    let started = Instant::now();

    // No validator is ever invoked on empty text.
    if code.trim().is_empty() {
        return ValidationResult::valid(started.elapsed());
    }

    let outcome = catch_unwind(AssertUnwindSafe(|| match language {
        LanguageId::Sql => {
            let dialect = options.and_then(|o| o.dialect).unwrap_or_default();
            sql::validate_query(code, dialect, options)
        }
        LanguageId::Json => validate_json(code),
        LanguageId::JavaScript | LanguageId::TypeScript => validate_javascript(code),
        LanguageId::Python => validate_python(code),
        // No validator registered: valid by default, zero markers.
        LanguageId::Markdown | LanguageId::Shell | LanguageId::Plain => {
            ValidationResult::valid(started.elapsed())
        }
    }));

    match outcome {
        Ok(result) => result,
        Err(_) => {
            log::warn!(
                "validator for '{}' failed internally; reporting input as valid",
                language.as_str()
            );
            ValidationResult::valid(started.elapsed())
        }
    }
}
