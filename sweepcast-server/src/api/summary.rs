//! AI summary generation endpoints
//!
//! Two variants: store-backed episodes persist the generated summary onto the
//! entity; catalog-sourced episodes only return it. Generation itself never
//! fails the request; the summary client degrades to a fixed fallback
//! string.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde_json::json;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::normalize::{normalize_episode, RawEpisode};
use crate::AppState;

/// POST /api/episodes/:id/generate-summary
pub async fn generate_for_stored(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid episode ID".to_string()))?;

    let episode = db::episodes::get_by_id(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Episode not found".to_string()))?;

    let outcome = state
        .summarizer
        .generate_episode_summary(&episode.title, &episode.description)
        .await;

    let updated = db::episodes::update_ai_summary(&state.db, id, outcome.text())
        .await?
        .ok_or_else(|| ApiError::NotFound("Episode not found".to_string()))?;

    tracing::info!(id, fallback = outcome.is_fallback(), "Generated episode summary");

    Ok(Json(json!({
        "success": true,
        "episode": updated,
        "summary": outcome.text(),
    })))
}

/// POST /api/spotify/episodes/:spotifyId/generate-summary
///
/// The episode lives upstream, so the summary is returned without being
/// persisted anywhere.
pub async fn generate_for_catalog(
    State(state): State<AppState>,
    Path(spotify_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    if spotify_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Invalid Spotify episode ID".to_string()));
    }

    // Any fetch failure reads as the episode not existing upstream
    let raw = state.spotify.get_episode(&spotify_id).await.map_err(|err| {
        tracing::error!("Error fetching episode from Spotify: {}", err);
        ApiError::NotFound("Episode not found on Spotify".to_string())
    })?;

    let raw: RawEpisode = serde_json::from_value(raw)
        .map_err(|_| ApiError::NotFound("Episode not found on Spotify".to_string()))?;

    let episode = normalize_episode(&raw, None, Utc::now()).into_episode();
    let outcome = state
        .summarizer
        .generate_episode_summary(&episode.title, &episode.description)
        .await;

    Ok(Json(json!({
        "success": true,
        "summary": outcome.text(),
    })))
}
