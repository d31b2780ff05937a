//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod credentials;
pub mod login;
pub mod register;
pub mod update_progress;

// Re-exports
pub use config::ScoreboardConfig;
pub use login::{LoginInput, LoginUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use update_progress::{UpdateProgressInput, UpdateProgressUseCase};
