//! LSP Protocol Implementation
//!
//! Clean LSP backend focused only on protocol handling; all validation
//! runs through the per-document sessions.

pub mod backend;
pub mod document;
pub mod server;

pub use backend::Backend;
