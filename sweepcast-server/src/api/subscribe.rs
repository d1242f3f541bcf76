//! Newsletter subscription endpoint

use axum::{extract::State, http::StatusCode, Json};

use sweepcast_common::db::models::{NewSubscriber, Subscriber};

use crate::api::is_valid_email;
use crate::db;
use crate::error::{conflict_on_unique, ApiError, ApiResult};
use crate::AppState;

/// POST /api/subscribe
///
/// Duplicate email is a conflict, not an update: checked up front and backed
/// by the UNIQUE constraint for concurrent creates.
pub async fn subscribe(
    State(state): State<AppState>,
    Json(payload): Json<NewSubscriber>,
) -> ApiResult<(StatusCode, Json<Subscriber>)> {
    let email = payload.email.trim();
    if !is_valid_email(email) {
        return Err(ApiError::BadRequest("Invalid email".to_string()));
    }

    if db::subscribers::get_by_email(&state.db, email).await?.is_some() {
        return Err(ApiError::Conflict("Email already subscribed".to_string()));
    }

    let subscriber = db::subscribers::insert(&state.db, email)
        .await
        .map_err(|e| conflict_on_unique(e, "Email already subscribed"))?;

    tracing::info!(id = subscriber.id, "New newsletter subscriber");
    Ok((StatusCode::CREATED, Json(subscriber)))
}
