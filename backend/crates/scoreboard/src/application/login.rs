//! Login Use Case
//!
//! Checks a user name / password pair. Every failure, whatever its cause,
//! surfaces as `InvalidCredentials`.

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordPolicy};

use crate::application::config::ScoreboardConfig;
use crate::application::credentials::{self, Verification};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{ScoreboardError, ScoreboardResult};

/// Login input
pub struct LoginInput {
    pub user_name: Option<String>,
    pub password: Option<String>,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<ScoreboardConfig>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<ScoreboardConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> ScoreboardResult<User> {
        let (Some(user_name), Some(password)) = (input.user_name, input.password) else {
            return Err(ScoreboardError::InvalidCredentials);
        };

        let user_name =
            UserName::new(user_name).map_err(|_| ScoreboardError::InvalidCredentials)?;

        // The registration policy may have been tightened since the user
        // signed up, so only the structural checks apply here
        let password = ClearTextPassword::new(password, &PasswordPolicy::default())
            .map_err(|_| ScoreboardError::InvalidCredentials)?;

        let mut user = self
            .user_repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(ScoreboardError::InvalidCredentials)?;

        let verification = credentials::verify_password(
            user.password_hash.clone(),
            password,
            self.config.hash_params,
            self.config.password_pepper.clone(),
        )
        .await?;

        let rehashed = match verification {
            Verification::Rejected => return Err(ScoreboardError::InvalidCredentials),
            Verification::Accepted { rehashed } => rehashed,
        };

        if let Some(password_hash) = rehashed {
            // A failed upgrade must not fail the login
            match self
                .user_repo
                .update_password_hash(&user.user_name, &password_hash)
                .await
            {
                Ok(()) => {
                    tracing::info!(user_name = %user.user_name, "Password hash upgraded");
                    user.set_password_hash(password_hash);
                }
                Err(e) => {
                    tracing::warn!(
                        user_name = %user.user_name,
                        error = %e,
                        "Password hash upgrade failed, continuing anyway"
                    );
                }
            }
        }

        tracing::info!(user_name = %user.user_name, "User logged in");

        Ok(user)
    }
}
