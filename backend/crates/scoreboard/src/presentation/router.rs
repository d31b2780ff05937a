//! Scoreboard Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::ScoreboardConfig;
use crate::domain::repository::UserRepository;
use crate::infra::mongo::MongoUserRepository;
use crate::presentation::handlers::{self, ScoreboardState};

/// Create the scoreboard router with the MongoDB repository
pub fn scoreboard_router(repo: MongoUserRepository, config: ScoreboardConfig) -> Router {
    scoreboard_router_generic(repo, config)
}

/// Create a scoreboard router for any repository implementation
pub fn scoreboard_router_generic<R>(repo: R, config: ScoreboardConfig) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let state = ScoreboardState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route(
            "/update",
            post(handlers::update::<R>).put(handlers::update::<R>),
        )
        .route("/health", get(handlers::health))
        .with_state(state)
}
