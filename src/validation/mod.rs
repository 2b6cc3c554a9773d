//! Validation Engine
//!
//! Clean separation of the marker model, the per-language validators,
//! the dispatcher, and the asynchronous session the editor host drives.

pub mod brackets;
pub mod engine;
pub mod javascript;
pub mod json;
pub mod marker;
pub mod python;
pub mod session;

pub use engine::{validate, LanguageId};
pub use marker::{
    to_display_entries, ErrorPanelEntry, Severity, ValidationMarker, ValidationOptions,
    ValidationResult, ValidationRule,
};
pub use session::{SessionState, ValidationSession, DEFAULT_DEBOUNCE};
