use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::info;

use hangman_core::{CustomWordRegistry, ScoreRecorder, WordSource};
use hangman_persistence::{
    connection::connect_and_migrate,
    profile::FilePlayerNameStore,
    repositories::{SeaOrmCustomWordRepository, SeaOrmScoreRepository},
};
use hangman_server::{
    config::Config, create_routes, score_sink::HttpScoreSink, session_manager::SessionManager,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Hangman server...");

    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize database connection and run migrations
    let db = connect_and_migrate(&config.database_url)
        .await
        .with_context(|| format!("Failed to prepare database at {}", config.database_url))?;

    let score_repository = Arc::new(SeaOrmScoreRepository::new(db.clone()));
    let recorder = match &config.score_endpoint_url {
        Some(url) => {
            info!("Recording scores to {}", url);
            ScoreRecorder::with_sink(score_repository, Arc::new(HttpScoreSink::new(url.clone())))
        }
        None => ScoreRecorder::new(score_repository),
    };

    let registry = CustomWordRegistry::new(Arc::new(SeaOrmCustomWordRepository::new(db)));
    let player_store = Arc::new(FilePlayerNameStore::new(&config.player_profile_path));

    let session_manager = SessionManager::new(
        WordSource::builtin(),
        Arc::new(registry),
        Arc::new(recorder),
        player_store,
        config.tick_interval(),
    );

    let routes = create_routes(session_manager.clone());

    // Start cleanup task
    let cleanup_session_manager = session_manager.clone();
    let idle_timeout = config.session_idle_timeout();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            interval.tick().await;
            let removed = cleanup_session_manager
                .cleanup_idle_sessions(idle_timeout)
                .await;
            if removed > 0 {
                info!("Cleaned up {} idle sessions", removed);
            }
        }
    });

    info!("Server starting on {}:{}", config.host, config.port);

    let addr = (
        config
            .host
            .parse::<std::net::IpAddr>()
            .with_context(|| format!("Invalid HOST: {}", config.host))?,
        config.port,
    );

    #[cfg(unix)]
    let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())
        .context("Failed to listen for SIGINT")?;
    #[cfg(unix)]
    let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
        .context("Failed to listen for SIGTERM")?;

    let (addr, server) = warp::serve(routes).try_bind_with_graceful_shutdown(addr, async move {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(err) = signal::ctrl_c().await {
                tracing::error!("Failed to listen for ctrl+c: {}", err);
            }
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    })
    .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");

    Ok(())
}
