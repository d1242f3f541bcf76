//! Blog post database operations

use sqlx::SqlitePool;
use sweepcast_common::db::models::{BlogPost, NewBlogPost};

use crate::pagination::page_window;

const LIST_ORDER: &str = "ORDER BY date DESC, id ASC";

/// One page of posts (newest first), optionally filtered by category,
/// plus the total count under the same filter
pub async fn list_page(
    pool: &SqlitePool,
    page: i64,
    limit: i64,
    category: Option<&str>,
) -> Result<(Vec<BlogPost>, i64), sqlx::Error> {
    let total: i64 = match category {
        Some(category) => {
            sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts WHERE category = ?")
                .bind(category)
                .fetch_one(pool)
                .await?
        }
        None => {
            sqlx::query_scalar("SELECT COUNT(*) FROM blog_posts")
                .fetch_one(pool)
                .await?
        }
    };

    let posts = match page_window(total, page, limit) {
        Some(window) => match category {
            Some(category) => {
                let sql = format!(
                    "SELECT * FROM blog_posts WHERE category = ? {} LIMIT ? OFFSET ?",
                    LIST_ORDER
                );
                sqlx::query_as::<_, BlogPost>(&sql)
                    .bind(category)
                    .bind(window.limit)
                    .bind(window.offset)
                    .fetch_all(pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT * FROM blog_posts {} LIMIT ? OFFSET ?", LIST_ORDER);
                sqlx::query_as::<_, BlogPost>(&sql)
                    .bind(window.limit)
                    .bind(window.offset)
                    .fetch_all(pool)
                    .await?
            }
        },
        None => Vec::new(),
    };

    Ok((posts, total))
}

/// Top 2 posts by date descending
pub async fn featured(pool: &SqlitePool) -> Result<Vec<BlogPost>, sqlx::Error> {
    let sql = format!("SELECT * FROM blog_posts {} LIMIT 2", LIST_ORDER);
    sqlx::query_as::<_, BlogPost>(&sql).fetch_all(pool).await
}

/// Top 3 posts by date descending
pub async fn recent(pool: &SqlitePool) -> Result<Vec<BlogPost>, sqlx::Error> {
    let sql = format!("SELECT * FROM blog_posts {} LIMIT 3", LIST_ORDER);
    sqlx::query_as::<_, BlogPost>(&sql).fetch_all(pool).await
}

/// Distinct categories currently present in the store
pub async fn categories(pool: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT DISTINCT category FROM blog_posts ORDER BY category")
        .fetch_all(pool)
        .await
}

pub async fn get_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<BlogPost>, sqlx::Error> {
    sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE slug = ?")
        .bind(slug)
        .fetch_optional(pool)
        .await
}

/// Insert a post; the slug must be unique (enforced by the schema)
pub async fn insert(pool: &SqlitePool, post: &NewBlogPost) -> Result<BlogPost, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO blog_posts (title, content, excerpt, date, author, category, image_url, slug)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&post.title)
    .bind(&post.content)
    .bind(&post.excerpt)
    .bind(&post.date)
    .bind(&post.author)
    .bind(&post.category)
    .bind(&post.image_url)
    .bind(&post.slug)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    sqlx::query_as::<_, BlogPost>("SELECT * FROM blog_posts WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
}
