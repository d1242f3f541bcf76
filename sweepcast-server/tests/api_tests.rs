//! Integration tests for the Sweepcast HTTP API
//!
//! Drive the full router against an in-memory SQLite database. Catalog
//! endpoints need live Spotify credentials and are not exercised here; the
//! AI summary endpoints are tested through their offline fallback path.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::util::ServiceExt; // for `oneshot`

use sweepcast_common::db::init::create_schema;
use sweepcast_server::services::spotify::SpotifyClient;
use sweepcast_server::services::summary::{SummaryClient, FALLBACK_SUMMARY};
use sweepcast_server::{build_router, AppState};

/// App with a fresh in-memory database and unconfigured service clients
async fn setup_app() -> Router {
    // One connection: each in-memory SQLite connection is its own database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    create_schema(&pool).await.expect("schema");

    let spotify = SpotifyClient::new(None, None).unwrap();
    let summarizer = SummaryClient::new(None).unwrap();
    build_router(AppState::new(pool, spotify, summarizer))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse JSON")
}

fn episode_payload(title: &str, date: &str, slug: &str) -> Value {
    json!({
        "title": title,
        "description": "A deep dive into spin bowling.",
        "date": date,
        "duration": "45:12",
        "spotifyUrl": "https://open.spotify.com/episode/sample",
        "spotifyId": "7kv6KkjJlQNLQs9JxKVmC4",
        "slug": slug,
    })
}

fn blog_payload(title: &str, date: &str, category: &str, slug: &str) -> Value {
    json!({
        "title": title,
        "content": "### Heading\n\nSome **bold** cricket analysis.",
        "excerpt": "Some cricket analysis...",
        "date": date,
        "author": "Suyash",
        "category": category,
        "slug": slug,
    })
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_endpoint() {
    let app = setup_app().await;
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "sweepcast-server");
}

// ---------------------------------------------------------------------------
// Episodes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_and_fetch_episode() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/episodes",
            episode_payload("Spin Bowling", "2023-06-10", "spin-bowling"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["title"], "Spin Bowling");
    assert_eq!(created["aiSummary"], Value::Null);

    let response = app.oneshot(get("/api/episodes/spin-bowling")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["id"], created["id"]);
}

#[tokio::test]
async fn unknown_episode_slug_is_404() {
    let app = setup_app().await;
    let response = app.oneshot(get("/api/episodes/no-such-slug")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn episode_validation_rejects_empty_title() {
    let app = setup_app().await;
    let mut payload = episode_payload("x", "2023-06-10", "x");
    payload["title"] = json!("  ");

    let response = app.oneshot(post_json("/api/episodes", payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_episode_slug_is_conflict() {
    let app = setup_app().await;
    let payload = episode_payload("One", "2023-06-10", "same-slug");

    let response = app.clone().oneshot(post_json("/api/episodes", payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let payload = episode_payload("Two", "2023-06-11", "same-slug");
    let response = app.oneshot(post_json("/api/episodes", payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn episode_listing_paginates_newest_first() {
    let app = setup_app().await;
    for (i, date) in ["2023-05-01", "2023-05-08", "2023-05-15", "2023-05-22", "2023-05-29"]
        .iter()
        .enumerate()
    {
        let payload = episode_payload(&format!("Episode {}", i), date, &format!("episode-{}", i));
        let response = app.clone().oneshot(post_json("/api/episodes", payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.clone().oneshot(get("/api/episodes?page=1&limit=2")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["totalCount"], 5);
    let titles: Vec<&str> = body["episodes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Episode 4", "Episode 3"]);

    // Last page is partial
    let response = app.clone().oneshot(get("/api/episodes?page=3&limit=2")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["episodes"].as_array().unwrap().len(), 1);

    // Beyond the last page: empty slice, not an error
    let response = app.clone().oneshot(get("/api/episodes?page=9&limit=2")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["totalCount"], 5);
    assert!(body["episodes"].as_array().unwrap().is_empty());

    // A page number at the i64 ceiling must still read as past-the-end
    let response = app
        .clone()
        .oneshot(get("/api/episodes?page=9223372036854775807&limit=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["episodes"].as_array().unwrap().is_empty());

    // Page below 1: also empty
    let response = app.oneshot(get("/api/episodes?page=0&limit=2")).await.unwrap();
    let body = body_json(response).await;
    assert!(body["episodes"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn featured_episodes_are_top_three_by_date() {
    let app = setup_app().await;
    for (i, date) in ["2023-05-01", "2023-05-08", "2023-05-15", "2023-05-22"]
        .iter()
        .enumerate()
    {
        let payload = episode_payload(&format!("Episode {}", i), date, &format!("episode-{}", i));
        app.clone().oneshot(post_json("/api/episodes", payload)).await.unwrap();
    }

    let response = app.oneshot(get("/api/episodes/featured")).await.unwrap();
    let body = body_json(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Episode 3", "Episode 2", "Episode 1"]);
}

// ---------------------------------------------------------------------------
// Blog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn blog_create_list_and_category_filter() {
    let app = setup_app().await;

    for (title, date, category, slug) in [
        ("Bodyline Revisited", "2023-04-01", "history", "bodyline-revisited"),
        ("Ashes Preview", "2023-04-08", "previews", "ashes-preview"),
        ("1999 Semi-Final", "2023-04-15", "what-ifs", "1999-semi-final"),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/api/blog", blog_payload(title, date, category, slug)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.clone().oneshot(get("/api/blog?page=1&limit=6")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["totalCount"], 3);
    assert_eq!(body["posts"][0]["title"], "1999 Semi-Final");

    let response = app
        .clone()
        .oneshot(get("/api/blog?page=1&limit=6&category=history"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["totalCount"], 1);
    assert_eq!(body["posts"][0]["category"], "history");

    let response = app.clone().oneshot(get("/api/blog/categories")).await.unwrap();
    let body = body_json(response).await;
    let mut categories: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    categories.sort();
    assert_eq!(categories, vec!["history", "previews", "what-ifs"]);

    let response = app.clone().oneshot(get("/api/blog/bodyline-revisited")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/api/blog/missing-post")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blog_featured_and_recent_counts() {
    let app = setup_app().await;
    for i in 0..4 {
        let payload = blog_payload(
            &format!("Post {}", i),
            &format!("2023-04-0{}", i + 1),
            "reflections",
            &format!("post-{}", i),
        );
        app.clone().oneshot(post_json("/api/blog", payload)).await.unwrap();
    }

    let response = app.clone().oneshot(get("/api/blog/featured")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[0]["title"], "Post 3");

    let response = app.oneshot(get("/api/blog/recent")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn blog_rejects_unknown_category() {
    let app = setup_app().await;
    let payload = blog_payload("Post", "2023-04-01", "gossip", "post");

    let response = app.oneshot(post_json("/api/blog", payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Subscribe + contact
// ---------------------------------------------------------------------------

#[tokio::test]
async fn subscribe_then_duplicate_is_conflict() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(post_json("/api/subscribe", json!({"email": "fan@cricket.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["email"], "fan@cricket.com");

    let response = app
        .oneshot(post_json("/api/subscribe", json!({"email": "fan@cricket.com"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn subscribe_rejects_invalid_email() {
    let app = setup_app().await;
    let response = app
        .oneshot(post_json("/api/subscribe", json!({"email": "not-an-email"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn contact_form_acknowledged_without_persistence() {
    let app = setup_app().await;
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/contact",
            json!({
                "name": "Abhinav",
                "email": "abhinav@example.com",
                "subject": "Episode idea",
                "message": "What if Bradman had played T20 cricket?",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Message received");

    let response = app
        .oneshot(post_json(
            "/api/contact",
            json!({
                "name": "A",
                "email": "abhinav@example.com",
                "subject": "Hi",
                "message": "Too short",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

async fn post_comment(app: &Router, episode_id: &str, content: &str, name: Option<&str>) -> Value {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/comments",
            json!({
                "episodeId": episode_id,
                "content": content,
                "name": name,
                "email": name.map(|n| format!("{}@example.com", n.to_lowercase())),
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn new_comment_starts_with_zero_votes() {
    let app = setup_app().await;
    let before = chrono::Utc::now();
    let comment = post_comment(&app, "E1", "Warne was the GOAT.", Some("Dave")).await;

    assert_eq!(comment["upvotes"], 0);
    assert_eq!(comment["downvotes"], 0);
    assert_eq!(comment["episodeId"], "E1");

    let created_at: chrono::DateTime<chrono::Utc> =
        comment["createdAt"].as_str().unwrap().parse().unwrap();
    assert!(created_at >= before - chrono::Duration::seconds(1));
}

#[tokio::test]
async fn anonymous_comment_keeps_null_identity() {
    let app = setup_app().await;
    let comment = post_comment(&app, "E1", "Disagree about Murali!", None).await;

    assert_eq!(comment["name"], Value::Null);
    assert_eq!(comment["email"], Value::Null);
}

#[tokio::test]
async fn comment_requires_content() {
    let app = setup_app().await;
    let response = app
        .oneshot(post_json(
            "/api/comments",
            json!({"episodeId": "E1", "content": "   "}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn vote_counters_are_independent() {
    let app = setup_app().await;
    let comment = post_comment(&app, "E1", "Great analysis.", None).await;
    let id = comment["id"].as_i64().unwrap();

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(post_empty(&format!("/api/comments/{}/upvote", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(post_empty(&format!("/api/comments/{}/downvote", id)))
        .await
        .unwrap();
    let updated = body_json(response).await;

    assert_eq!(updated["upvotes"], 3);
    assert_eq!(updated["downvotes"], 1);
}

#[tokio::test]
async fn voting_on_missing_comment_is_404() {
    let app = setup_app().await;
    let response = app
        .clone()
        .oneshot(post_empty("/api/comments/999/upvote"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(post_empty("/api/comments/not-a-number/downvote"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn comments_sort_newest_and_top() {
    let app = setup_app().await;

    let first = post_comment(&app, "E1", "first", None).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = post_comment(&app, "E1", "second", None).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let third = post_comment(&app, "E1", "third", None).await;
    // A comment on another episode must never appear
    post_comment(&app, "E2", "other episode", None).await;

    let response = app
        .clone()
        .oneshot(get("/api/comments/E1?sortBy=newest"))
        .await
        .unwrap();
    let body = body_json(response).await;
    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            third["id"].as_i64().unwrap(),
            second["id"].as_i64().unwrap(),
            first["id"].as_i64().unwrap(),
        ]
    );

    // Give the first comment the highest score, downvote the third
    let first_id = first["id"].as_i64().unwrap();
    for _ in 0..2 {
        app.clone()
            .oneshot(post_empty(&format!("/api/comments/{}/upvote", first_id)))
            .await
            .unwrap();
    }
    app.clone()
        .oneshot(post_empty(&format!(
            "/api/comments/{}/downvote",
            third["id"].as_i64().unwrap()
        )))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/comments/E1?sortBy=top")).await.unwrap();
    let body = body_json(response).await;
    let scored: Vec<(i64, i64)> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| {
            (
                c["id"].as_i64().unwrap(),
                c["upvotes"].as_i64().unwrap() - c["downvotes"].as_i64().unwrap(),
            )
        })
        .collect();

    // Scores: first=2, second=0, third=-1; ties would break by id ascending
    assert_eq!(scored[0], (first_id, 2));
    assert_eq!(scored[1].1, 0);
    assert_eq!(scored[2].1, -1);
}

#[tokio::test]
async fn comment_end_to_end_scoring() {
    let app = setup_app().await;
    let comment = post_comment(&app, "E1", "score me", None).await;
    let id = comment["id"].as_i64().unwrap();

    let response = app.clone().oneshot(get("/api/comments/E1?sortBy=top")).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["upvotes"], 0);
    assert_eq!(body[0]["downvotes"], 0);

    for _ in 0..2 {
        app.clone()
            .oneshot(post_empty(&format!("/api/comments/{}/upvote", id)))
            .await
            .unwrap();
    }
    let response = app
        .clone()
        .oneshot(post_empty(&format!("/api/comments/{}/downvote", id)))
        .await
        .unwrap();
    let updated = body_json(response).await;

    let score = updated["upvotes"].as_i64().unwrap() - updated["downvotes"].as_i64().unwrap();
    assert_eq!(score, 1);
}

// ---------------------------------------------------------------------------
// AI summary (offline fallback path)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn summary_without_api_key_persists_fallback() {
    let app = setup_app().await;
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/episodes",
            episode_payload("Spin Bowling", "2023-06-10", "spin-bowling"),
        ))
        .await
        .unwrap();
    let episode = body_json(response).await;
    let id = episode["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(post_empty(&format!("/api/episodes/{}/generate-summary", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["summary"], FALLBACK_SUMMARY);
    assert_eq!(body["episode"]["aiSummary"], FALLBACK_SUMMARY);

    // The summary is persisted onto the stored episode
    let response = app.oneshot(get("/api/episodes/spin-bowling")).await.unwrap();
    let fetched = body_json(response).await;
    assert_eq!(fetched["aiSummary"], FALLBACK_SUMMARY);
}

#[tokio::test]
async fn summary_for_missing_or_invalid_episode() {
    let app = setup_app().await;

    let response = app
        .clone()
        .oneshot(post_empty("/api/episodes/999/generate-summary"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(post_empty("/api/episodes/abc/generate-summary"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
