//! Repository layer: entity-scoped database operations.

mod questionnaire;

use crate::models::{Questionnaire, SealedQuestionnaire};

use super::DatabaseError;

/// Persistence contract the intake service relies on.
///
/// The store assigns `id` and both timestamps on create. It never sees a
/// plaintext name.
pub trait QuestionnaireStore: Send + Sync {
    fn create(&self, record: &SealedQuestionnaire) -> Result<Questionnaire, DatabaseError>;

    /// All records, newest `date_created` first.
    fn list_all(&self) -> Result<Vec<Questionnaire>, DatabaseError>;
}

pub use questionnaire::*;
