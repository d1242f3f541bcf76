//! Integration tests for database initialization

use sweepcast_common::db::init_database;

#[tokio::test]
async fn init_creates_database_and_tables() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("sweepcast.db");

    let pool = init_database(&db_path).await.unwrap();
    assert!(db_path.exists());

    for table in ["users", "episodes", "blog_posts", "subscribers", "comments"] {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(count, 1, "table {} should exist", table);
    }
}

#[tokio::test]
async fn init_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("sweepcast.db");

    let pool = init_database(&db_path).await.unwrap();
    sqlx::query("INSERT INTO subscribers (email, date) VALUES ('a@b.com', '2024-01-01T00:00:00Z')")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    // Reopening must preserve existing rows
    let pool = init_database(&db_path).await.unwrap();
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM subscribers")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn subscriber_email_is_unique() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("sweepcast.db")).await.unwrap();

    sqlx::query("INSERT INTO subscribers (email, date) VALUES ('dup@example.com', '2024-01-01T00:00:00Z')")
        .execute(&pool)
        .await
        .unwrap();

    let err = sqlx::query(
        "INSERT INTO subscribers (email, date) VALUES ('dup@example.com', '2024-01-02T00:00:00Z')",
    )
    .execute(&pool)
    .await;
    assert!(err.is_err());
}

#[tokio::test]
async fn episode_slug_is_unique() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_database(&dir.path().join("sweepcast.db")).await.unwrap();

    let insert = "INSERT INTO episodes (title, description, date, duration, spotify_url, spotify_id, slug) \
                  VALUES ('t', 'd', '2024-01-01', '1:00', 'u', 's', 'same-slug')";
    sqlx::query(insert).execute(&pool).await.unwrap();
    assert!(sqlx::query(insert).execute(&pool).await.is_err());
}
