//! Questionnaire validation.
//!
//! `symptoms` and `chronicConditionDetails` are required or forbidden
//! depending on other answers, so the whole submission is checked at once.
//! Every violated rule is collected, in field order, and returned together.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::enums::{Gender, HealthCondition, YesNo};
use crate::models::NewQuestionnaire;

pub const NAME_MAX_CHARS: usize = 15;

pub const MSG_NAME_REQUIRED: &str = "Name is required";
pub const MSG_NAME_LENGTH: &str = "Name must be between 1 and 15 characters";
pub const MSG_AGE_POSITIVE: &str = "Age must be a positive number";
pub const MSG_AGE_WHOLE: &str = "Age must be a whole number";
pub const MSG_GENDER: &str = "Gender is required";
pub const MSG_HEALTH_CONDITION: &str = "Health condition is required";
pub const MSG_EXPERIENCED_SYMPTOMS: &str = "Experienced symptoms is required";
pub const MSG_SYMPTOMS_REQUIRED: &str = "Please list your symptoms";
pub const MSG_CHRONIC_REQUIRED: &str = "Please provide details about your chronic illness";
pub const MSG_SYMPTOMS_CONFLICT: &str =
    "symptoms should not be provided if experienced symptoms is no";
pub const MSG_CHRONIC_CONFLICT: &str =
    "chronicConditionDetails should not be provided if healthCondition is not chronic illness";

/// A submission exactly as received. Every field is optional so that a
/// missing or mistyped value becomes a validation error instead of a
/// deserialization failure. `null` counts as missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireInput {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub gender: Option<Value>,
    #[serde(default)]
    pub health_condition: Option<Value>,
    #[serde(default)]
    pub experienced_symptoms: Option<Value>,
    #[serde(default)]
    pub symptoms: Option<Value>,
    #[serde(default)]
    pub chronic_condition_details: Option<Value>,
    /// Properties that are not part of the questionnaire.
    #[serde(flatten)]
    pub unknown: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    Required,
    Type,
    Length,
    Positive,
    Integer,
    Enum,
    Conflict,
    UnknownField,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub rule: Rule,
    pub message: String,
}

/// Non-empty, ordered list of violations for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("questionnaire failed validation with {} error(s)", .0.len())]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }

    /// Field names in report order.
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }

    pub fn conflicts(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter().filter(|e| e.rule == Rule::Conflict)
    }
}

struct Errors(Vec<FieldError>);

impl Errors {
    fn push(&mut self, field: &str, rule: Rule, message: &str) {
        self.0.push(FieldError {
            field: field.to_string(),
            rule,
            message: message.to_string(),
        });
    }
}

/// Validate a submission.
///
/// Returns the typed record when every rule passes, otherwise every
/// violation in rule order: name, age, gender, healthCondition,
/// experiencedSymptoms, symptoms, chronicConditionDetails, then any unknown
/// properties. At most one error is reported per field.
pub fn validate(input: &QuestionnaireInput) -> Result<NewQuestionnaire, ValidationErrors> {
    let mut errors = Errors(Vec::new());

    let name = check_name(input.name.as_ref(), &mut errors);
    let age = check_age(input.age.as_ref(), &mut errors);
    let gender: Option<Gender> =
        check_enum(input.gender.as_ref(), "gender", MSG_GENDER, &mut errors);
    let health_condition: Option<HealthCondition> = check_enum(
        input.health_condition.as_ref(),
        "healthCondition",
        MSG_HEALTH_CONDITION,
        &mut errors,
    );
    let experienced_symptoms: Option<YesNo> = check_enum(
        input.experienced_symptoms.as_ref(),
        "experiencedSymptoms",
        MSG_EXPERIENCED_SYMPTOMS,
        &mut errors,
    );

    let symptoms = check_conditional(
        input.symptoms.as_ref(),
        experienced_symptoms.map(|e| e == YesNo::Yes),
        &SYMPTOMS,
        &mut errors,
    );
    let chronic_condition_details = check_conditional(
        input.chronic_condition_details.as_ref(),
        health_condition.map(|h| h == HealthCondition::ChronicIllness),
        &CHRONIC_CONDITION_DETAILS,
        &mut errors,
    );

    let mut unknown: Vec<&String> = input.unknown.keys().collect();
    unknown.sort();
    for key in unknown {
        errors.push(
            key,
            Rule::UnknownField,
            &format!("property {key} should not exist"),
        );
    }

    match (name, age, gender, health_condition, experienced_symptoms) {
        (Some(name), Some(age), Some(gender), Some(health_condition), Some(experienced_symptoms))
            if errors.0.is_empty() =>
        {
            Ok(NewQuestionnaire {
                name,
                age,
                gender,
                health_condition,
                experienced_symptoms,
                symptoms,
                chronic_condition_details,
            })
        }
        _ => {
            tracing::debug!(
                violations = errors.0.len(),
                fields = ?errors.0.iter().map(|e| e.field.as_str()).collect::<Vec<_>>(),
                "Questionnaire rejected"
            );
            Err(ValidationErrors(errors.0))
        }
    }
}

fn check_name(value: Option<&Value>, errors: &mut Errors) -> Option<String> {
    match value {
        None => {
            errors.push("name", Rule::Required, MSG_NAME_REQUIRED);
            None
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                errors.push("name", Rule::Required, MSG_NAME_REQUIRED);
                None
            } else if trimmed.chars().count() > NAME_MAX_CHARS {
                errors.push("name", Rule::Length, MSG_NAME_LENGTH);
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(_) => {
            errors.push("name", Rule::Type, MSG_NAME_REQUIRED);
            None
        }
    }
}

fn check_age(value: Option<&Value>, errors: &mut Errors) -> Option<u32> {
    let number = match value {
        None => {
            errors.push("age", Rule::Required, MSG_AGE_POSITIVE);
            return None;
        }
        Some(Value::Number(n)) => n,
        Some(_) => {
            errors.push("age", Rule::Type, MSG_AGE_POSITIVE);
            return None;
        }
    };

    if let Some(whole) = number.as_u64() {
        if whole == 0 {
            errors.push("age", Rule::Positive, MSG_AGE_POSITIVE);
            return None;
        }
        return match u32::try_from(whole) {
            Ok(age) => Some(age),
            Err(_) => {
                errors.push("age", Rule::Integer, MSG_AGE_WHOLE);
                None
            }
        };
    }

    // Negative integers and floats end up here.
    let float = number.as_f64().unwrap_or(0.0);
    if float <= 0.0 {
        errors.push("age", Rule::Positive, MSG_AGE_POSITIVE);
        None
    } else if float.fract() == 0.0 && float <= f64::from(u32::MAX) {
        Some(float as u32)
    } else {
        errors.push("age", Rule::Integer, MSG_AGE_WHOLE);
        None
    }
}

fn check_enum<T: FromStr>(
    value: Option<&Value>,
    field: &str,
    message: &str,
    errors: &mut Errors,
) -> Option<T> {
    match value {
        None => {
            errors.push(field, Rule::Required, message);
            None
        }
        Some(Value::String(s)) => match s.parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                errors.push(field, Rule::Enum, message);
                None
            }
        },
        Some(_) => {
            errors.push(field, Rule::Enum, message);
            None
        }
    }
}

/// Free-text field whose presence is dictated by another answer.
struct ConditionalField {
    field: &'static str,
    missing: &'static str,
    conflict: &'static str,
}

const SYMPTOMS: ConditionalField = ConditionalField {
    field: "symptoms",
    missing: MSG_SYMPTOMS_REQUIRED,
    conflict: MSG_SYMPTOMS_CONFLICT,
};

const CHRONIC_CONDITION_DETAILS: ConditionalField = ConditionalField {
    field: "chronicConditionDetails",
    missing: MSG_CHRONIC_REQUIRED,
    conflict: MSG_CHRONIC_CONFLICT,
};

/// `required` is `None` when the controlling answer is itself invalid; the
/// rule is skipped then, since that answer already carries an error.
fn check_conditional(
    value: Option<&Value>,
    required: Option<bool>,
    rule: &ConditionalField,
    errors: &mut Errors,
) -> Option<String> {
    match (required?, value) {
        (true, Some(Value::String(s))) if !s.trim().is_empty() => Some(s.clone()),
        (true, None | Some(Value::String(_))) => {
            errors.push(rule.field, Rule::Required, rule.missing);
            None
        }
        (true, Some(_)) => {
            errors.push(rule.field, Rule::Type, rule.missing);
            None
        }
        (false, None) => None,
        (false, Some(Value::String(s))) if s.trim().is_empty() => None,
        (false, Some(_)) => {
            errors.push(rule.field, Rule::Conflict, rule.conflict);
            None
        }
    }
}
