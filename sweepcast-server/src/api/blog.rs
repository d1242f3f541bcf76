//! Blog listing and authoring endpoints
//!
//! Posts are created once and immutable afterwards; there is no edit or
//! delete surface.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use sweepcast_common::db::models::{BlogPost, NewBlogPost};

use crate::db;
use crate::error::{conflict_on_unique, ApiError, ApiResult};
use crate::AppState;

/// Closed set of valid blog categories
pub const BLOG_CATEGORIES: &[&str] = &["history", "previews", "reflections", "what-ifs"];

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
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostsResponse {
    pub posts: Vec<BlogPost>,
    pub total_count: i64,
}

/// GET /api/blog?page&limit&category
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<BlogPostsResponse>> {
    let (posts, total_count) =
        db::blog::list_page(&state.db, query.page, query.limit, query.category.as_deref()).await?;

    Ok(Json(BlogPostsResponse { posts, total_count }))
}

/// GET /api/blog/featured (top 2 by date)
pub async fn featured(State(state): State<AppState>) -> ApiResult<Json<Vec<BlogPost>>> {
    Ok(Json(db::blog::featured(&state.db).await?))
}

/// GET /api/blog/recent (top 3 by date)
pub async fn recent(State(state): State<AppState>) -> ApiResult<Json<Vec<BlogPost>>> {
    Ok(Json(db::blog::recent(&state.db).await?))
}

/// GET /api/blog/categories, listing categories present in the store
pub async fn categories(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(db::blog::categories(&state.db).await?))
}

/// GET /api/blog/:slug
pub async fn by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<BlogPost>> {
    db::blog::get_by_slug(&state.db, &slug)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Blog post not found".to_string()))
}

/// POST /api/blog
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<NewBlogPost>,
) -> ApiResult<(StatusCode, Json<BlogPost>)> {
    validate(&payload)?;

    let post = db::blog::insert(&state.db, &payload)
        .await
        .map_err(|e| conflict_on_unique(e, "A blog post with this slug already exists"))?;

    tracing::info!(slug = %post.slug, category = %post.category, "Created blog post");
    Ok((StatusCode::CREATED, Json(post)))
}

fn validate(payload: &NewBlogPost) -> Result<(), ApiError> {
    let required = [
        ("title", &payload.title),
        ("content", &payload.content),
        ("excerpt", &payload.excerpt),
        ("date", &payload.date),
        ("author", &payload.author),
        ("slug", &payload.slug),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!(
                "Invalid blog post data: {} must not be empty",
                field
            )));
        }
    }

    if !BLOG_CATEGORIES.contains(&payload.category.as_str()) {
        return Err(ApiError::BadRequest(format!(
            "Invalid blog post data: category must be one of {}",
            BLOG_CATEGORIES.join(", ")
        )));
    }

    Ok(())
}
