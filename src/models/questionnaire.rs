use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{Gender, HealthCondition, YesNo};

/// A submission that passed validation. `name` is still plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestionnaire {
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub health_condition: HealthCondition,
    pub experienced_symptoms: YesNo,
    pub symptoms: Option<String>,
    pub chronic_condition_details: Option<String>,
}

/// A validated submission whose name has been encrypted; the only shape
/// the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedQuestionnaire {
    pub encrypted_name: String,
    pub age: u32,
    pub gender: Gender,
    pub health_condition: HealthCondition,
    pub experienced_symptoms: YesNo,
    pub symptoms: Option<String>,
    pub chronic_condition_details: Option<String>,
}

/// A persisted questionnaire. `name` holds the cipher token as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub health_condition: HealthCondition,
    pub experienced_symptoms: YesNo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chronic_condition_details: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}

/// Listing view of a questionnaire: `name` is decrypted and masked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireListItem {
    pub id: Uuid,
    pub name: String,
    pub age: u32,
    pub gender: Gender,
    pub health_condition: HealthCondition,
    pub experienced_symptoms: YesNo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chronic_condition_details: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_updated: DateTime<Utc>,
}
