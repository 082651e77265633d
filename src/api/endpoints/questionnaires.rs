//! Questionnaire endpoints.
//!
//! - `POST /questionnaires`: validate, encrypt and store a submission
//! - `GET /questionnaires`: all submissions, newest first, names masked

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::api::error::ApiError;
use crate::api::redact::redact_sensitive;
use crate::api::types::ApiContext;
use crate::intake;
use crate::models::{Questionnaire, QuestionnaireListItem};
use crate::validation::QuestionnaireInput;

/// `POST /questionnaires`: create a questionnaire.
pub async fn create(
    State(ctx): State<ApiContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Questionnaire>), ApiError> {
    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if !body.is_object() {
        return Err(ApiError::BadRequest(
            "Request body must be a JSON object".into(),
        ));
    }

    tracing::debug!(body = %redact_sensitive(&body), "Questionnaire submission received");

    let input: QuestionnaireInput =
        serde_json::from_value(body).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let stored = intake::submit(ctx.store.as_ref(), &ctx.cipher, &input)?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// `GET /questionnaires`: list questionnaires with masked names.
pub async fn list(
    State(ctx): State<ApiContext>,
) -> Result<Json<Vec<QuestionnaireListItem>>, ApiError> {
    let items = intake::list_masked(ctx.store.as_ref(), &ctx.cipher)?;
    Ok(Json(items))
}
