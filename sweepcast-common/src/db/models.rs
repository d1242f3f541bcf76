//! Database models
//!
//! API JSON uses camelCase field names; the database uses snake_case columns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical episode representation.
///
/// `spotify_id` is the only reliable cross-system key; the numeric `id` is a
/// display convenience and, for catalog-sourced episodes, a lossy derivation
/// from the external id (collisions are possible and accepted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// ISO date (YYYY-MM-DD)
    pub date: String,
    /// Display duration, `m:ss`
    pub duration: String,
    pub spotify_url: String,
    pub spotify_id: String,
    pub image_url: Option<String>,
    /// Released within the last 14 days
    pub is_new: bool,
    pub transcript: Option<String>,
    /// Generated summary; mutable after creation
    pub ai_summary: Option<String>,
    pub slug: String,
}

/// Episode creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEpisode {
    pub title: String,
    pub description: String,
    pub date: String,
    pub duration: String,
    pub spotify_url: String,
    pub spotify_id: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub ai_summary: Option<String>,
    pub slug: String,
}

/// Blog article; immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub date: String,
    pub author: String,
    pub category: String,
    pub image_url: Option<String>,
    pub slug: String,
}

/// Blog post creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBlogPost {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub date: String,
    pub author: String,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub slug: String,
}

/// Newsletter subscriber
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: i64,
    pub email: String,
    pub date: DateTime<Utc>,
}

/// Subscription payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscriber {
    pub email: String,
}

/// Reader comment on an episode.
///
/// `episode_id` is the episode's Spotify id (a back-reference, not a foreign
/// key to the local episodes table). Anonymous comments keep name and email
/// NULL permanently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub episode_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub upvotes: i64,
    pub downvotes: i64,
}

impl Comment {
    /// Net score: upvotes minus downvotes (may be negative)
    pub fn score(&self) -> i64 {
        self.upvotes - self.downvotes
    }
}

/// Comment creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub episode_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub content: String,
}
