//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use anyhow::Context;
use axum::{BoxError, Router, error_handling::HandleErrorLayer};
use mongodb::{Client, options::ClientOptions};
use scoreboard::{MongoUserRepository, ScoreboardConfig, scoreboard_router};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Profile, ServerConfig};
use kernel::error::app_error::AppError;

const FALLBACK_DATABASE: &str = "green_it";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,scoreboard=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().context("Invalid configuration")?;

    // Database connection
    let mut client_options = ClientOptions::parse(&config.mongodb_uri)
        .await
        .context("Invalid MONGODB_URI")?;
    client_options.connect_timeout = Some(config.mongodb_timeout);
    client_options.server_selection_timeout = Some(config.mongodb_timeout);
    client_options.app_name = Some("green-it-scoreboard".to_string());

    let client = Client::with_options(client_options)?;

    let database = match config.mongodb_database.as_deref() {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(FALLBACK_DATABASE)),
    };

    let repo = MongoUserRepository::new(&database, &config.mongodb_collection);

    // The unique index is what keeps user names unique; refuse to start without it
    repo.ensure_indexes()
        .await
        .context("Failed to create the unique username index")?;

    tracing::info!(
        database = %database.name(),
        collection = %config.mongodb_collection,
        "Connected to database"
    );

    // Scoreboard configuration
    let base_config = match config.profile {
        Profile::Production => ScoreboardConfig::default(),
        Profile::Development => {
            tracing::warn!("APP_PROFILE=development: password hashing uses minimum cost");
            ScoreboardConfig::development()
        }
    };
    let scoreboard_config = ScoreboardConfig {
        password_pepper: config.password_pepper.clone(),
        ..base_config
    }
    .with_delta_policy(config.delta_policy);

    tracing::info!(
        profile = ?config.profile,
        delta_policy = ?config.delta_policy,
        "Scoreboard configured"
    );

    // Build router
    let app = Router::new()
        .merge(scoreboard_router(repo, scoreboard_config))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(config.request_timeout),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    client.shutdown().await;
    tracing::info!("Database connection closed");

    Ok(())
}

/// Map errors raised by the middleware stack to JSON responses
async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request timed out");
        AppError::request_timeout("Request timed out.")
    } else {
        tracing::error!(error = %err, "Unhandled middleware error");
        AppError::internal("Server error").with_detail(err.to_string())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
