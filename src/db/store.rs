//! SQLite-backed questionnaire store.
//!
//! One connection behind a `Mutex`: each create or list call holds the lock
//! for a single statement, which is all the serialisation this service needs.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{SubsecRound, Utc};
use rusqlite::Connection;
use uuid::Uuid;

use super::repository::{insert_questionnaire, list_questionnaires, QuestionnaireStore};
use super::sqlite::{open_database, open_memory_database};
use super::DatabaseError;
use crate::models::{Questionnaire, SealedQuestionnaire};

pub struct SqliteQuestionnaireStore {
    conn: Mutex<Connection>,
}

impl SqliteQuestionnaireStore {
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        tracing::info!(path = %path.display(), "Opening questionnaire database");
        Ok(Self::from_connection(open_database(path)?))
    }

    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        Ok(Self::from_connection(open_memory_database()?))
    }

    /// Wrap a connection that has already been migrated.
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DatabaseError> {
        self.conn.lock().map_err(|_| DatabaseError::LockPoisoned)
    }
}

impl QuestionnaireStore for SqliteQuestionnaireStore {
    fn create(&self, record: &SealedQuestionnaire) -> Result<Questionnaire, DatabaseError> {
        // Stored with millisecond precision; truncate so the returned record
        // matches what a later read produces.
        let now = Utc::now().trunc_subsecs(3);
        let stored = Questionnaire {
            id: Uuid::new_v4(),
            name: record.encrypted_name.clone(),
            age: record.age,
            gender: record.gender,
            health_condition: record.health_condition,
            experienced_symptoms: record.experienced_symptoms,
            symptoms: record.symptoms.clone(),
            chronic_condition_details: record.chronic_condition_details.clone(),
            date_created: now,
            date_updated: now,
        };

        let conn = self.lock()?;
        insert_questionnaire(&conn, &stored)?;
        Ok(stored)
    }

    fn list_all(&self) -> Result<Vec<Questionnaire>, DatabaseError> {
        let conn = self.lock()?;
        list_questionnaires(&conn)
    }
}
