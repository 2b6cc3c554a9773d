//! SQLLab Language Server
//!
//! The source-code validation engine behind a SQL workbench editor,
//! served over the Language Server Protocol.
//!
//! This library provides:
//! - Multi-language syntax validation (SQL, JSON, JavaScript, Python)
//! - A layered, dialect-aware SQL pipeline with precise error locations
//! - A debounced, cancellation-safe validation session per document
//! - LSP protocol implementation
//! - Configuration management

pub mod config;
pub mod lsp;
pub mod sql;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use sql::Dialect;
pub use validation::engine::{validate, LanguageId};
pub use validation::marker::{
    to_display_entries, ErrorPanelEntry, Severity, ValidationMarker, ValidationOptions,
    ValidationResult, ValidationRule,
};
pub use validation::session::{SessionState, ValidationSession};
