//! Sweepcast server - podcast and blog site backend
//!
//! Serves the JSON API for episode listings, blog articles, newsletter
//! subscriptions, reader comments, the Spotify catalog proxy, and AI summary
//! generation.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use sweepcast_common::config::Config;
use sweepcast_common::db::init_database;
use sweepcast_server::services::spotify::SpotifyClient;
use sweepcast_server::services::summary::SummaryClient;
use sweepcast_server::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "sweepcast-server")]
#[command(about = "Podcast and blog site backend")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "SWEEPCAST_PORT")]
    port: Option<u16>,

    /// Path to the SQLite database file
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting Sweepcast server v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = Config::load(
        args.port,
        args.database.as_deref(),
        args.config.as_deref(),
    )?;

    info!("Database path: {}", config.database_path.display());
    let pool = init_database(&config.database_path).await?;
    info!("✓ Database ready");

    let spotify = SpotifyClient::new(
        config.spotify_client_id.clone(),
        config.spotify_client_secret.clone(),
    )?;
    let summarizer = SummaryClient::new(config.openai_api_key.clone())?;

    let state = AppState::new(pool, spotify, summarizer);
    let app = build_router(state);

    let addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Sweepcast server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
