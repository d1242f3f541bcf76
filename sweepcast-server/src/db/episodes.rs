//! Episode database operations

use sqlx::SqlitePool;
use sweepcast_common::db::models::{Episode, NewEpisode};

use crate::pagination::page_window;

/// Newest-first listing order; id breaks date ties deterministically
const LIST_ORDER: &str = "ORDER BY date DESC, id ASC";

/// One page of episodes (newest first) plus the total count
pub async fn list_page(
    pool: &SqlitePool,
    page: i64,
    limit: i64,
) -> Result<(Vec<Episode>, i64), sqlx::Error> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM episodes")
        .fetch_one(pool)
        .await?;

    let episodes = match page_window(total, page, limit) {
        Some(window) => {
            let sql = format!("SELECT * FROM episodes {} LIMIT ? OFFSET ?", LIST_ORDER);
            sqlx::query_as::<_, Episode>(&sql)
                .bind(window.limit)
                .bind(window.offset)
                .fetch_all(pool)
                .await?
        }
        None => Vec::new(),
    };

    Ok((episodes, total))
}

/// Top 3 episodes by date descending
pub async fn featured(pool: &SqlitePool) -> Result<Vec<Episode>, sqlx::Error> {
    let sql = format!("SELECT * FROM episodes {} LIMIT 3", LIST_ORDER);
    sqlx::query_as::<_, Episode>(&sql).fetch_all(pool).await
}

pub async fn get_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Episode>, sqlx::Error> {
    sqlx::query_as::<_, Episode>("SELECT * FROM episodes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn get_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Episode>, sqlx::Error> {
    sqlx::query_as::<_, Episode>("SELECT * FROM episodes WHERE slug = ?")
        .bind(slug)
        .fetch_optional(pool)
        .await
}

/// Insert an episode; the slug must be unique (enforced by the schema)
pub async fn insert(pool: &SqlitePool, episode: &NewEpisode) -> Result<Episode, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO episodes (
            title, description, date, duration, spotify_url, spotify_id,
            image_url, is_new, transcript, ai_summary, slug
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&episode.title)
    .bind(&episode.description)
    .bind(&episode.date)
    .bind(&episode.duration)
    .bind(&episode.spotify_url)
    .bind(&episode.spotify_id)
    .bind(&episode.image_url)
    .bind(episode.is_new)
    .bind(&episode.transcript)
    .bind(&episode.ai_summary)
    .bind(&episode.slug)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    sqlx::query_as::<_, Episode>("SELECT * FROM episodes WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Persist a generated summary onto an episode; None if the id is absent
pub async fn update_ai_summary(
    pool: &SqlitePool,
    id: i64,
    summary: &str,
) -> Result<Option<Episode>, sqlx::Error> {
    let result = sqlx::query("UPDATE episodes SET ai_summary = ? WHERE id = ?")
        .bind(summary)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_by_id(pool, id).await
}
