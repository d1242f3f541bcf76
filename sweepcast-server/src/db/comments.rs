//! Comment database operations: creation, listing with ranking, votes

use chrono::Utc;
use sqlx::SqlitePool;
use sweepcast_common::db::models::{Comment, NewComment};

/// Comment listing order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentSort {
    /// By creation time, newest first
    #[default]
    Newest,
    /// By net score (upvotes - downvotes), highest first
    Top,
}

impl CommentSort {
    /// Parse the `sortBy` query value; anything unrecognized means newest
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("top") => CommentSort::Top,
            _ => CommentSort::Newest,
        }
    }
}

/// Comments for one episode, keyed by the episode's Spotify id.
///
/// Ties in either order are broken by id ascending so results are stable.
pub async fn list_for_episode(
    pool: &SqlitePool,
    episode_id: &str,
    sort: CommentSort,
) -> Result<Vec<Comment>, sqlx::Error> {
    let sql = match sort {
        CommentSort::Newest => {
            "SELECT * FROM comments WHERE episode_id = ? ORDER BY created_at DESC, id ASC"
        }
        CommentSort::Top => {
            "SELECT * FROM comments WHERE episode_id = ? ORDER BY (upvotes - downvotes) DESC, id ASC"
        }
    };

    sqlx::query_as::<_, Comment>(sql)
        .bind(episode_id)
        .fetch_all(pool)
        .await
}

/// Insert a comment with a server timestamp and zeroed vote counters.
///
/// Omitted name/email stay NULL permanently (anonymous comments are a
/// first-class state, not a display default).
pub async fn insert(pool: &SqlitePool, comment: &NewComment) -> Result<Comment, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO comments (episode_id, name, email, content, created_at, upvotes, downvotes)
        VALUES (?, ?, ?, ?, ?, 0, 0)
        "#,
    )
    .bind(&comment.episode_id)
    .bind(&comment.name)
    .bind(&comment.email)
    .bind(&comment.content)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Increment the upvote counter by one; None if the id is absent
pub async fn upvote(pool: &SqlitePool, id: i64) -> Result<Option<Comment>, sqlx::Error> {
    adjust_votes(pool, id, "upvotes").await
}

/// Increment the downvote counter by one; None if the id is absent
pub async fn downvote(pool: &SqlitePool, id: i64) -> Result<Option<Comment>, sqlx::Error> {
    adjust_votes(pool, id, "downvotes").await
}

// column is one of two fixed literals, never user input
async fn adjust_votes(
    pool: &SqlitePool,
    id: i64,
    column: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    let sql = format!("UPDATE comments SET {col} = {col} + 1 WHERE id = ?", col = column);
    let result = sqlx::query(&sql).bind(id).execute(pool).await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    sqlx::query_as::<_, Comment>("SELECT * FROM comments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}
