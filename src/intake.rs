//! Intake workflow: what happens to a questionnaire between the HTTP layer
//! and the store.
//!
//! Create: validate → seal (encrypt name) → store.
//! List:   store → open (decrypt name) → mask.

use thiserror::Error;

use crate::crypto::{CryptoError, NameCipher};
use crate::db::{DatabaseError, QuestionnaireStore};
use crate::masking::mask_name;
use crate::models::{NewQuestionnaire, Questionnaire, QuestionnaireListItem, SealedQuestionnaire};
use crate::validation::{validate, QuestionnaireInput, ValidationErrors};

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Name cipher error: {0}")]
    Cipher(#[from] CryptoError),

    #[error("Store error: {0}")]
    Store(#[from] DatabaseError),
}

/// Encrypt the name of a validated submission so it can be stored.
pub fn seal(record: NewQuestionnaire, cipher: &NameCipher) -> Result<SealedQuestionnaire, CryptoError> {
    Ok(SealedQuestionnaire {
        encrypted_name: cipher.encrypt(&record.name)?,
        age: record.age,
        gender: record.gender,
        health_condition: record.health_condition,
        experienced_symptoms: record.experienced_symptoms,
        symptoms: record.symptoms,
        chronic_condition_details: record.chronic_condition_details,
    })
}

/// Build the listing view of a stored record: decrypt, then mask.
pub fn to_list_item(
    record: Questionnaire,
    cipher: &NameCipher,
) -> Result<QuestionnaireListItem, CryptoError> {
    let plaintext = cipher.decrypt(&record.name)?;
    Ok(QuestionnaireListItem {
        id: record.id,
        name: mask_name(&plaintext),
        age: record.age,
        gender: record.gender,
        health_condition: record.health_condition,
        experienced_symptoms: record.experienced_symptoms,
        symptoms: record.symptoms,
        chronic_condition_details: record.chronic_condition_details,
        date_created: record.date_created,
        date_updated: record.date_updated,
    })
}

/// Validate and store a submission. Returns the record as persisted, with
/// the encrypted name.
pub fn submit(
    store: &dyn QuestionnaireStore,
    cipher: &NameCipher,
    input: &QuestionnaireInput,
) -> Result<Questionnaire, IntakeError> {
    let record = validate(input)?;
    let sealed = seal(record, cipher)?;
    let stored = store.create(&sealed)?;

    tracing::info!(id = %stored.id, "Questionnaire stored");
    Ok(stored)
}

/// All stored questionnaires, newest first, with masked names.
///
/// A record whose name cannot be decrypted fails the whole call.
pub fn list_masked(
    store: &dyn QuestionnaireStore,
    cipher: &NameCipher,
) -> Result<Vec<QuestionnaireListItem>, IntakeError> {
    let records = store.list_all()?;
    let mut items = Vec::with_capacity(records.len());

    for record in records {
        let id = record.id;
        let item = to_list_item(record, cipher).map_err(|e| {
            tracing::error!(%id, error = %e, "Failed to decrypt questionnaire name");
            e
        })?;
        items.push(item);
    }

    tracing::debug!(count = items.len(), "Questionnaires listed");
    Ok(items)
}
