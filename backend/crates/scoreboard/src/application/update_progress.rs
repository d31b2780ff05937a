//! Update Progress Use Case
//!
//! Adds score and emission deltas to a user's counters.

use std::sync::Arc;

use serde_json::Value;

use crate::application::config::ScoreboardConfig;
use crate::domain::entity::user::UserProfile;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{progress_delta::ProgressDelta, user_name::UserName};
use crate::error::{ScoreboardError, ScoreboardResult};

/// Update progress input
///
/// Deltas stay raw JSON until the configured policy has looked at them.
pub struct UpdateProgressInput {
    pub user_name: Option<String>,
    pub new_score: Option<Value>,
    pub new_emission: Option<Value>,
}

/// Update progress use case
pub struct UpdateProgressUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<ScoreboardConfig>,
}

impl<U> UpdateProgressUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<ScoreboardConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: UpdateProgressInput) -> ScoreboardResult<UserProfile> {
        let user_name = input
            .user_name
            .filter(|s| !s.is_empty())
            .ok_or(ScoreboardError::MissingUserName)?;
        let user_name = UserName::new(user_name)?;

        // Validation happens before the lookup: a bad delta is a 400 even
        // for an unknown user
        let delta = ProgressDelta::from_raw(
            input.new_score.as_ref(),
            input.new_emission.as_ref(),
            self.config.delta_policy,
        )?;

        let profile = self
            .user_repo
            .add_progress(&user_name, &delta)
            .await?
            .ok_or(ScoreboardError::UserNotFound)?;

        tracing::info!(
            user_name = %profile.user_name,
            score_delta = delta.score(),
            emission_delta = delta.emission(),
            score = profile.score,
            emission_co2 = profile.emission_co2,
            "Progress updated"
        );

        Ok(profile)
    }
}
