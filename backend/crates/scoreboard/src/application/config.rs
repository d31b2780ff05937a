//! Application Configuration
//!
//! Configuration for the scoreboard application layer.

use platform::password::{HashParams, PasswordPolicy};

pub use crate::domain::value_object::progress_delta::DeltaPolicy;

/// Scoreboard application configuration
#[derive(Debug, Clone, Default)]
pub struct ScoreboardConfig {
    /// Bounds checked on registration
    pub password_policy: PasswordPolicy,
    /// Argon2id cost for new hashes
    pub hash_params: HashParams,
    /// Handling of non-numeric update deltas
    pub delta_policy: DeltaPolicy,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl ScoreboardConfig {
    /// Create config for development (cheap hashing)
    pub fn development() -> Self {
        Self {
            hash_params: HashParams::low_cost(),
            ..Self::default()
        }
    }

    /// Set the delta policy
    pub fn with_delta_policy(mut self, delta_policy: DeltaPolicy) -> Self {
        self.delta_policy = delta_policy;
        self
    }
}
