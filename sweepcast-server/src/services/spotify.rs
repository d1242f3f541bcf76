//! Spotify catalog API client
//!
//! Wraps the Spotify Web API with client-credentials token management. Every
//! public call first ensures a usable bearer token; the token cache lives
//! behind a mutex so concurrent refreshes serialize into a single grant
//! request instead of hammering the accounts endpoint.
//!
//! Upstream failures are not retried here; retry policy belongs to callers.

use serde::Deserialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

const ACCOUNTS_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const API_BASE_URL: &str = "https://api.spotify.com/v1";
const USER_AGENT: &str = "Sweepcast/0.1.0 (https://github.com/sweepcast/sweepcast)";

/// A token is refreshed once less than this much lifetime remains
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Spotify client errors
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// Client id/secret were not configured
    #[error("Spotify credentials are not configured")]
    MissingCredentials,

    #[error("Network error: {0}")]
    Network(String),

    /// Upstream non-2xx response, status passed through to callers
    #[error("Spotify API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Cached bearer token with its expiry instant
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

impl CachedToken {
    /// Usable while more than the expiry margin remains
    fn is_usable(&self, now: Instant) -> bool {
        self.expires_at.saturating_duration_since(now) > TOKEN_EXPIRY_MARGIN
    }
}

/// Client-credentials grant response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// Shape of Spotify error bodies: `{"error": {"status": ..., "message": ...}}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Spotify Web API client with managed token lifecycle
pub struct SpotifyClient {
    http_client: reqwest::Client,
    client_id: Option<String>,
    client_secret: Option<String>,
    token: Mutex<Option<CachedToken>>,
}

impl SpotifyClient {
    pub fn new(
        client_id: Option<String>,
        client_secret: Option<String>,
    ) -> Result<Self, SpotifyError> {
        if client_id.is_none() || client_secret.is_none() {
            tracing::warn!("Spotify credentials not configured; catalog endpoints will fail");
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            client_id,
            client_secret,
            token: Mutex::new(None),
        })
    }

    /// Ensure a usable token, refreshing through the client-credentials grant
    /// when absent or within the expiry margin. The cache lock is held across
    /// the grant, so overlapping callers wait instead of refreshing twice.
    async fn ensure_token(&self) -> Result<String, SpotifyError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_usable(Instant::now()) {
                return Ok(token.access_token.clone());
            }
        }

        let client_id = self
            .client_id
            .as_deref()
            .ok_or(SpotifyError::MissingCredentials)?;
        let client_secret = self
            .client_secret
            .as_deref()
            .ok_or(SpotifyError::MissingCredentials)?;

        tracing::debug!("Refreshing Spotify access token");

        let response = self
            .http_client
            .post(ACCOUNTS_TOKEN_URL)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SpotifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let grant: TokenResponse = response
            .json()
            .await
            .map_err(|e| SpotifyError::Parse(e.to_string()))?;

        let expires_at = Instant::now() + Duration::from_secs(grant.expires_in);
        let access_token = grant.access_token.clone();
        *cached = Some(CachedToken {
            access_token: grant.access_token,
            expires_at,
        });

        tracing::info!("Spotify access token refreshed");
        Ok(access_token)
    }

    /// Issue a GET against the Web API and return the JSON body verbatim
    async fn get_json(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<serde_json::Value, SpotifyError> {
        let token = self.ensure_token().await?;
        let url = format!("{}{}", API_BASE_URL, path);

        tracing::debug!(url = %url, "Querying Spotify API");

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(token)
            .query(query)
            .send()
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            // Spotify error bodies carry a message; fall back to raw text
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or(text);
            return Err(SpotifyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| SpotifyError::Parse(e.to_string()))
    }

    /// Get show metadata
    pub async fn get_show(&self, show_id: &str) -> Result<serde_json::Value, SpotifyError> {
        self.get_json(&format!("/shows/{}", show_id), &[]).await
    }

    /// Get one page of a show's episodes
    pub async fn get_show_episodes(
        &self,
        show_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<serde_json::Value, SpotifyError> {
        self.get_json(
            &format!("/shows/{}/episodes", show_id),
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    /// Get a single episode
    pub async fn get_episode(&self, episode_id: &str) -> Result<serde_json::Value, SpotifyError> {
        self.get_json(&format!("/episodes/{}", episode_id), &[]).await
    }

    /// Search for shows
    pub async fn search_shows(
        &self,
        query: &str,
        limit: i64,
        offset: i64,
    ) -> Result<serde_json::Value, SpotifyError> {
        self.get_json(
            "/search",
            &[
                ("q", query.to_string()),
                ("type", "show".to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ],
        )
        .await
    }
}
