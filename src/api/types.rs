//! Shared types for the API layer.

use std::sync::Arc;

use crate::crypto::NameCipher;
use crate::db::QuestionnaireStore;

/// Shared context for all API routes.
///
/// Holds the store and the cipher explicitly; handlers never reach for
/// process-wide state.
#[derive(Clone)]
pub struct ApiContext {
    pub store: Arc<dyn QuestionnaireStore>,
    pub cipher: Arc<NameCipher>,
}

impl ApiContext {
    pub fn new(store: Arc<dyn QuestionnaireStore>, cipher: NameCipher) -> Self {
        Self {
            store,
            cipher: Arc::new(cipher),
        }
    }
}
