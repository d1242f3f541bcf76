//! Contact form endpoint
//!
//! Messages are validated and acknowledged but not persisted.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::json;

use crate::api::is_valid_email;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// POST /api/contact
pub async fn submit(
    State(_state): State<AppState>,
    Json(payload): Json<ContactMessage>,
) -> ApiResult<Json<serde_json::Value>> {
    validate(&payload)?;

    tracing::info!(
        name = %payload.name,
        subject = %payload.subject,
        "Contact message received"
    );

    Ok(Json(json!({ "message": "Message received" })))
}

fn validate(payload: &ContactMessage) -> Result<(), ApiError> {
    if payload.name.trim().chars().count() < 2 {
        return Err(ApiError::BadRequest(
            "Invalid contact data: name must be at least 2 characters".to_string(),
        ));
    }
    if !is_valid_email(payload.email.trim()) {
        return Err(ApiError::BadRequest(
            "Invalid contact data: email is not valid".to_string(),
        ));
    }
    if payload.subject.trim().chars().count() < 2 {
        return Err(ApiError::BadRequest(
            "Invalid contact data: subject must be at least 2 characters".to_string(),
        ));
    }
    if payload.message.trim().chars().count() < 10 {
        return Err(ApiError::BadRequest(
            "Invalid contact data: message must be at least 10 characters".to_string(),
        ));
    }
    Ok(())
}
