use std::sync::Arc;

use crate::validation::engine::LanguageId;
use crate::validation::session::ValidationSession;

/// State for each open document
pub struct DocumentState {
    pub language: LanguageId,
    pub session: Arc<ValidationSession>,
}
