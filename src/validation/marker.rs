//! Marker and result model
//!
//! Shared vocabulary for every validator: located diagnostics, aggregate
//! results, and the display projection consumed by the host's error panel.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::ser::Serializer;
use serde::Serialize;

use crate::sql::Dialect;

/// Severity of a validation marker.
///
/// The numeric values are a wire contract shared with the host editor's
/// diagnostic displays and must not change: Hint=1, Info=2, Warning=4,
/// Error=8. Only `Error` flips a result to invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Hint,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Numeric wire value of this severity.
    pub const fn value(self) -> u8 {
        match self {
            Severity::Hint => 1,
            Severity::Info => 2,
            Severity::Warning => 4,
            Severity::Error => 8,
        }
    }

    /// Human-readable label for display.
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Hint => "Hint",
            Severity::Info => "Info",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

/// A single located diagnostic.
///
/// Positions are 1-indexed. `end_col` is exclusive, matching the host's
/// marker convention: a one-character token at column 5 spans 5..6.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMarker {
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
    pub message: String,
    pub severity: Severity,
    /// Identifier of the validator that produced the marker.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ValidationMarker {
    pub fn new(
        severity: Severity,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
        message: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
            message: message.into(),
            severity,
            source: source.into(),
            code: None,
        }
    }

    pub fn error(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
        message: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self::new(
            Severity::Error,
            start_line,
            start_col,
            end_line,
            end_col,
            message,
            source,
        )
    }

    pub fn warning(
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
        message: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self::new(
            Severity::Warning,
            start_line,
            start_col,
            end_line,
            end_col,
            message,
            source,
        )
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Result of validating one piece of code.
///
/// Immutable once returned; callers must not mutate markers in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub markers: Vec<ValidationMarker>,
    pub validation_time_ms: f64,
}

impl ValidationResult {
    /// Build a result from collected markers: sorts them by position for
    /// stable display and derives `is_valid` from Error severity alone.
    pub fn from_markers(mut markers: Vec<ValidationMarker>, elapsed: Duration) -> Self {
        markers.sort_by_key(|m| (m.start_line, m.start_col));
        let is_valid = !markers.iter().any(|m| m.severity == Severity::Error);
        Self {
            is_valid,
            markers,
            validation_time_ms: elapsed.as_secs_f64() * 1000.0,
        }
    }

    /// The permissive default: valid, no markers.
    pub fn valid(elapsed: Duration) -> Self {
        Self::from_markers(Vec::new(), elapsed)
    }

    pub fn error_count(&self) -> usize {
        self.markers
            .iter()
            .filter(|m| m.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.markers
            .iter()
            .filter(|m| m.severity == Severity::Warning)
            .count()
    }
}

/// A caller-supplied heuristic check, composed after the built-in rules.
#[derive(Clone)]
pub struct ValidationRule {
    pub id: String,
    pub description: String,
    pub severity: Severity,
    pub validate: Arc<dyn Fn(&str) -> Vec<ValidationMarker> + Send + Sync>,
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("id", &self.id)
            .field("description", &self.description)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

/// Options accepted by the dispatcher.
#[derive(Debug, Clone, Default)]
pub struct ValidationOptions {
    /// Escalate heuristic rule warnings to errors.
    pub strict: bool,
    /// SQL dialect; only meaningful for the query validator.
    pub dialect: Option<Dialect>,
    /// Extra rules appended after the built-in rule set.
    pub custom_rules: Vec<ValidationRule>,
}

/// Display-oriented projection of a marker for the host's error panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPanelEntry {
    pub id: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub message: String,
    pub severity: Severity,
    pub severity_label: &'static str,
}

/// Project markers into error-panel entries. Pure and lossless: every
/// entry is derived from a marker plus its index, nothing else.
pub fn to_display_entries(markers: &[ValidationMarker]) -> Vec<ErrorPanelEntry> {
    markers
        .iter()
        .enumerate()
        .map(|(index, marker)| ErrorPanelEntry {
            id: format!("error-{}-{}-{}", index, marker.start_line, marker.start_col),
            line: marker.start_line,
            column: marker.start_col,
            end_line: marker.end_line,
            end_column: marker.end_col,
            message: marker.message.clone(),
            severity: marker.severity,
            severity_label: marker.severity.label(),
        })
        .collect()
}
