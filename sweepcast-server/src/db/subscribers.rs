//! Subscriber database operations

use chrono::Utc;
use sqlx::SqlitePool;
use sweepcast_common::db::models::Subscriber;

pub async fn get_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<Subscriber>, sqlx::Error> {
    sqlx::query_as::<_, Subscriber>("SELECT * FROM subscribers WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Insert a subscriber with a server timestamp.
///
/// The UNIQUE constraint on email backs up the caller's existence check, so a
/// duplicate create is a conflict even under concurrent requests.
pub async fn insert(pool: &SqlitePool, email: &str) -> Result<Subscriber, sqlx::Error> {
    let result = sqlx::query("INSERT INTO subscribers (email, date) VALUES (?, ?)")
        .bind(email)
        .bind(Utc::now())
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();
    sqlx::query_as::<_, Subscriber>("SELECT * FROM subscribers WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
}
