//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use std::sync::Arc;

use crate::application::config::ScoreboardConfig;
use crate::application::{
    LoginInput, LoginUseCase, RegisterInput, RegisterUseCase, UpdateProgressInput,
    UpdateProgressUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::ScoreboardResult;
use crate::presentation::dto::{
    HealthResponse, LoginRequest, RegisterRequest, UpdateRequest, UserEnvelope,
};
use crate::presentation::extract::JsonBody;

/// Shared state for scoreboard handlers
pub struct ScoreboardState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<ScoreboardConfig>,
}

// Manual impl: derive would require `R: Clone`
impl<R> Clone for ScoreboardState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<ScoreboardState<R>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ScoreboardResult<(StatusCode, Json<UserEnvelope>)>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        user_name: req.username,
        password: req.password,
        image: req.image,
    };

    let user = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserEnvelope::new("User created successfully.", user)),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<ScoreboardState<R>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> ScoreboardResult<Json<UserEnvelope>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let input = LoginInput {
        user_name: req.username,
        password: req.password,
    };

    let user = use_case.execute(input).await?;

    Ok(Json(UserEnvelope::new("Login successful.", user)))
}

// ============================================================================
// Update
// ============================================================================

/// PUT /update, POST /update
pub async fn update<R>(
    State(state): State<ScoreboardState<R>>,
    JsonBody(req): JsonBody<UpdateRequest>,
) -> ScoreboardResult<Json<UserEnvelope>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = UpdateProgressUseCase::new(state.repo.clone(), state.config.clone());

    let input = UpdateProgressInput {
        user_name: req.username,
        new_score: req.new_score,
        new_emission: req.new_emission,
    };

    let user = use_case.execute(input).await?;

    Ok(Json(UserEnvelope::new("Data updated successfully.", user)))
}

// ============================================================================
// Health
// ============================================================================

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { message: "ok" })
}
