//! Register Use Case
//!
//! Creates a new user with zeroed counters.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::ScoreboardConfig;
use crate::application::credentials;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{ScoreboardError, ScoreboardResult};

/// Register input
pub struct RegisterInput {
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub image: Option<String>,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<ScoreboardConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<ScoreboardConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> ScoreboardResult<User> {
        let (Some(user_name), Some(password)) = (
            input.user_name.filter(|s| !s.is_empty()),
            input.password.filter(|s| !s.is_empty()),
        ) else {
            return Err(ScoreboardError::MissingCredentials);
        };

        let user_name = UserName::new(user_name)?;

        // Fast path only; the insert below is what enforces uniqueness
        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(ScoreboardError::UserNameTaken);
        }

        let password = ClearTextPassword::new(password, &self.config.password_policy)?;
        let password_hash = credentials::hash_password(
            password,
            self.config.hash_params,
            self.config.password_pepper.clone(),
        )
        .await?;

        let user = User::new(user_name, password_hash, input.image);

        self.user_repo.create(&user).await?;

        tracing::info!(user_name = %user.user_name, "User registered");

        Ok(user)
    }
}
