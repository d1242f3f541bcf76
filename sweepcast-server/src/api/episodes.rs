//! Episode listing and authoring endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use sweepcast_common::db::models::{Episode, NewEpisode};

use crate::db;
use crate::error::{conflict_on_unique, ApiError, ApiResult};
use crate::AppState;

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    6
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodesResponse {
    pub episodes: Vec<Episode>,
    pub total_count: i64,
}

/// GET /api/episodes?page&limit
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<EpisodesResponse>> {
    let (episodes, total_count) =
        db::episodes::list_page(&state.db, query.page, query.limit).await?;

    Ok(Json(EpisodesResponse {
        episodes,
        total_count,
    }))
}

/// GET /api/episodes/featured
pub async fn featured(State(state): State<AppState>) -> ApiResult<Json<Vec<Episode>>> {
    Ok(Json(db::episodes::featured(&state.db).await?))
}

/// GET /api/episodes/:slug
pub async fn by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<Episode>> {
    db::episodes::get_by_slug(&state.db, &slug)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Episode not found".to_string()))
}

/// POST /api/episodes
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewEpisode>,
) -> ApiResult<(StatusCode, Json<Episode>)> {
    validate(&payload)?;

    let episode = db::episodes::insert(&state.db, &payload)
        .await
        .map_err(|e| conflict_on_unique(e, "An episode with this slug already exists"))?;

    tracing::info!(slug = %episode.slug, "Created episode");
    Ok((StatusCode::CREATED, Json(episode)))
}

fn validate(payload: &NewEpisode) -> Result<(), ApiError> {
    let required = [
        ("title", &payload.title),
        ("description", &payload.description),
        ("date", &payload.date),
        ("duration", &payload.duration),
        ("spotifyUrl", &payload.spotify_url),
        ("spotifyId", &payload.spotify_id),
        ("slug", &payload.slug),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!(
                "Invalid episode data: {} must not be empty",
                field
            )));
        }
    }

    Ok(())
}
