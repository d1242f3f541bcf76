//! Comment endpoints: listing with ranking, creation, votes
//!
//! Votes carry no authorization or dedup by design: any caller may vote any
//! number of times.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use sweepcast_common::db::models::{Comment, NewComment};

use crate::db;
use crate::db::comments::CommentSort;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

/// GET /api/comments/:episodeId?sortBy=newest|top
pub async fn list_for_episode(
    State(state): State<AppState>,
    Path(episode_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Comment>>> {
    if episode_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Episode ID is required".to_string()));
    }

    let sort = CommentSort::parse(query.sort_by.as_deref());
    let comments = db::comments::list_for_episode(&state.db, &episode_id, sort).await?;
    Ok(Json(comments))
}

/// POST /api/comments
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewComment>,
) -> ApiResult<(StatusCode, Json<Comment>)> {
    if payload.episode_id.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Invalid comment data: episodeId must not be empty".to_string(),
        ));
    }
    if payload.content.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Invalid comment data: content must not be empty".to_string(),
        ));
    }

    let comment = db::comments::insert(&state.db, &payload).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// POST /api/comments/:id/upvote
pub async fn upvote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Comment>> {
    let id = parse_comment_id(&id)?;
    db::comments::upvote(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))
}

/// POST /api/comments/:id/downvote
pub async fn downvote(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Comment>> {
    let id = parse_comment_id(&id)?;
    db::comments::downvote(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))
}

fn parse_comment_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::BadRequest("Invalid comment ID".to_string()))
}
