//! Configuration loading
//!
//! Settings resolve in priority order:
//! 1. Command-line arguments (passed in by the server binary)
//! 2. Environment variables
//! 3. TOML config file (`<config dir>/sweepcast/config.toml`)
//! 4. Compiled defaults
//!
//! Upstream credentials (Spotify client id/secret, OpenAI API key) are
//! optional: the server starts without them and the corresponding features
//! degrade gracefully at call time.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default HTTP port for the server
pub const DEFAULT_PORT: u16 = 5780;

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the HTTP server listens on
    pub port: u16,
    /// Path to the SQLite database file
    pub database_path: PathBuf,
    /// Spotify application client id (client-credentials flow)
    pub spotify_client_id: Option<String>,
    /// Spotify application client secret
    pub spotify_client_secret: Option<String>,
    /// OpenAI API key for episode summary generation
    pub openai_api_key: Option<String>,
}

/// On-disk TOML shape; every field optional so a partial file is fine
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    port: Option<u16>,
    database_path: Option<PathBuf>,
    spotify_client_id: Option<String>,
    spotify_client_secret: Option<String>,
    openai_api_key: Option<String>,
}

impl ConfigFile {
    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("invalid config file: {}", e)))
    }
}

impl Config {
    /// Load configuration, layering CLI arguments over environment variables
    /// over the TOML file over defaults.
    pub fn load(
        cli_port: Option<u16>,
        cli_database: Option<&Path>,
        cli_config: Option<&Path>,
    ) -> Result<Self> {
        let file = match cli_config {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("cannot read {}: {}", path.display(), e))
                })?;
                ConfigFile::parse(&content)?
            }
            None => match default_config_path() {
                Some(path) if path.exists() => {
                    let content = std::fs::read_to_string(&path)?;
                    ConfigFile::parse(&content)?
                }
                _ => ConfigFile::default(),
            },
        };

        let port = cli_port
            .or_else(|| env_parsed("SWEEPCAST_PORT"))
            .or(file.port)
            .unwrap_or(DEFAULT_PORT);

        let database_path = cli_database
            .map(PathBuf::from)
            .or_else(|| std::env::var("SWEEPCAST_DATABASE").ok().map(PathBuf::from))
            .or(file.database_path)
            .unwrap_or_else(default_database_path);

        Ok(Config {
            port,
            database_path,
            spotify_client_id: env_or("SPOTIFY_CLIENT_ID", file.spotify_client_id),
            spotify_client_secret: env_or("SPOTIFY_CLIENT_SECRET", file.spotify_client_secret),
            openai_api_key: env_or("OPENAI_API_KEY", file.openai_api_key),
        })
    }
}

fn env_or(name: &str, fallback: Option<String>) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty()).or(fallback)
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Default config file location for the platform
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sweepcast").join("config.toml"))
}

/// Default database location for the platform
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("sweepcast").join("sweepcast.db"))
        .unwrap_or_else(|| PathBuf::from("./sweepcast.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config_file() {
        let file = ConfigFile::parse(
            r#"
            port = 9000
            database_path = "/tmp/sweepcast.db"
            spotify_client_id = "abc"
            spotify_client_secret = "def"
            openai_api_key = "sk-test"
            "#,
        )
        .unwrap();

        assert_eq!(file.port, Some(9000));
        assert_eq!(file.database_path, Some(PathBuf::from("/tmp/sweepcast.db")));
        assert_eq!(file.spotify_client_id.as_deref(), Some("abc"));
        assert_eq!(file.spotify_client_secret.as_deref(), Some("def"));
        assert_eq!(file.openai_api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn parse_partial_config_file() {
        let file = ConfigFile::parse("port = 8080").unwrap();
        assert_eq!(file.port, Some(8080));
        assert!(file.database_path.is_none());
        assert!(file.spotify_client_id.is_none());
    }

    #[test]
    fn parse_rejects_invalid_toml() {
        assert!(ConfigFile::parse("port = [").is_err());
    }
}
