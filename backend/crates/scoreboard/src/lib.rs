//! Scoreboard Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - MongoDB and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - User registration and login with username + password
//! - Cumulative score and CO2 emission counters, updated by deltas
//!
//! ## Consistency Model
//! - User names are unique at the store level (unique index)
//! - Counter updates are single atomic increments, never read-modify-write
//! - Passwords hashed with Argon2id; legacy bcrypt hashes are upgraded on login

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::{DeltaPolicy, ScoreboardConfig};
pub use error::{ScoreboardError, ScoreboardResult};
pub use infra::{InMemoryUserRepository, MongoUserRepository};
pub use presentation::router::{scoreboard_router, scoreboard_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
