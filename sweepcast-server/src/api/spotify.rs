//! Spotify catalog proxy endpoints
//!
//! Responses are the upstream JSON bodies passed through verbatim; upstream
//! errors map to the upstream status code where available. The episodes
//! listing can optionally run each record through the episode normalizer
//! (`?normalized=true`) and respond with canonical episodes instead.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use sweepcast_common::db::models::Episode;

use crate::error::{ApiError, ApiResult};
use crate::normalize::{normalize_episode, RawEpisodePage};
use crate::AppState;

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Deserialize)]
pub struct EpisodesQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    /// Run results through the episode normalizer instead of passing through
    #[serde(default)]
    pub normalized: bool,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedEpisodesResponse {
    pub episodes: Vec<Episode>,
    pub total_count: i64,
}

/// GET /api/spotify/show/:showId
pub async fn show(
    State(state): State<AppState>,
    Path(show_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let show = state.spotify.get_show(&show_id).await?;
    Ok(Json(show))
}

/// GET /api/spotify/show/:showId/episodes?limit&offset[&normalized]
///
/// Fetches the episode page and the show itself in parallel so the show
/// artwork can serve as a per-episode image fallback.
pub async fn show_episodes(
    State(state): State<AppState>,
    Path(show_id): Path<String>,
    Query(query): Query<EpisodesQuery>,
) -> ApiResult<Json<Value>> {
    if show_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Show ID is required".to_string()));
    }

    let (episodes, show) = tokio::join!(
        state
            .spotify
            .get_show_episodes(&show_id, query.limit, query.offset),
        state.spotify.get_show(&show_id),
    );
    let mut episodes = episodes?;
    let show = show?;

    let show_image_url = show["images"][0]["url"].as_str().map(str::to_string);

    if query.normalized {
        let page: RawEpisodePage = serde_json::from_value(episodes)
            .map_err(|e| ApiError::Internal(format!("Unexpected catalog response: {}", e)))?;

        let now = Utc::now();
        let episodes: Vec<Episode> = page
            .items
            .iter()
            .map(|raw| normalize_episode(raw, show_image_url.as_deref(), now).into_episode())
            .collect();

        let response = NormalizedEpisodesResponse {
            episodes,
            total_count: page.total,
        };
        return Ok(Json(serde_json::to_value(response).map_err(|e| {
            ApiError::Internal(format!("Response encoding failed: {}", e))
        })?));
    }

    if let Value::Object(map) = &mut episodes {
        map.insert(
            "show_image_url".to_string(),
            show_image_url.map(Value::String).unwrap_or(Value::Null),
        );
    }

    Ok(Json(episodes))
}

/// GET /api/spotify/episode/:episodeId
pub async fn episode(
    State(state): State<AppState>,
    Path(episode_id): Path<String>,
) -> ApiResult<Json<Value>> {
    if episode_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Episode ID is required".to_string()));
    }

    let episode = state.spotify.get_episode(&episode_id).await?;
    Ok(Json(episode))
}

/// GET /api/spotify/search?q&limit&offset
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Value>> {
    let q = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Search query is required".to_string()))?;

    let results = state.spotify.search_shows(q, query.limit, query.offset).await?;
    Ok(Json(results))
}
