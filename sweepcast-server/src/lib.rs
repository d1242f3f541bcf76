//! Sweepcast server library
//!
//! HTTP API for the podcast/blog site: episode and blog listings backed by
//! SQLite, reader comments with vote ranking, newsletter subscriptions, a
//! token-managed Spotify catalog proxy, and AI summary generation.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod normalize;
pub mod pagination;
pub mod services;

use services::spotify::SpotifyClient;
use services::summary::SummaryClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Token-managed Spotify catalog client
    pub spotify: Arc<SpotifyClient>,
    /// AI summary generation client
    pub summarizer: Arc<SummaryClient>,
}

impl AppState {
    pub fn new(db: SqlitePool, spotify: SpotifyClient, summarizer: SummaryClient) -> Self {
        Self {
            db,
            spotify: Arc::new(spotify),
            summarizer: Arc::new(summarizer),
        }
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        // Episodes
        .route("/api/episodes", get(api::episodes::list).post(api::episodes::create))
        .route("/api/episodes/featured", get(api::episodes::featured))
        .route("/api/episodes/:id", get(api::episodes::by_slug))
        .route(
            "/api/episodes/:id/generate-summary",
            post(api::summary::generate_for_stored),
        )
        // Blog
        .route("/api/blog", get(api::blog::list).post(api::blog::create))
        .route("/api/blog/featured", get(api::blog::featured))
        .route("/api/blog/recent", get(api::blog::recent))
        .route("/api/blog/categories", get(api::blog::categories))
        .route("/api/blog/:slug", get(api::blog::by_slug))
        // Newsletter + contact
        .route("/api/subscribe", post(api::subscribe::subscribe))
        .route("/api/contact", post(api::contact::submit))
        // Spotify catalog proxy
        .route("/api/spotify/show/:showId", get(api::spotify::show))
        .route("/api/spotify/show/:showId/episodes", get(api::spotify::show_episodes))
        .route("/api/spotify/episode/:episodeId", get(api::spotify::episode))
        .route("/api/spotify/search", get(api::spotify::search))
        .route(
            "/api/spotify/episodes/:spotifyId/generate-summary",
            post(api::summary::generate_for_catalog),
        )
        // Comments
        .route("/api/comments", post(api::comments::create))
        .route("/api/comments/:id", get(api::comments::list_for_episode))
        .route("/api/comments/:id/upvote", post(api::comments::upvote))
        .route("/api/comments/:id/downvote", post(api::comments::downvote))
        // Health
        .merge(api::health::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
