//! In-Memory Repository Implementation
//!
//! Process-local store with the same guarantees as the MongoDB one: each
//! operation holds the write lock for its whole check-and-write, so names
//! stay unique and increments are never lost. Used by tests and local runs
//! without a database.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use platform::password::HashedPassword;
use tokio::sync::RwLock;

use crate::domain::entity::user::{User, UserProfile};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{progress_delta::ProgressDelta, user_name::UserName};
use crate::error::{ScoreboardError, ScoreboardResult};

/// In-memory user repository
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> ScoreboardResult<()> {
        let mut users = self.users.write().await;

        match users.entry(user.user_name.as_str().to_owned()) {
            Entry::Occupied(_) => Err(ScoreboardError::UserNameTaken),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(())
            }
        }
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> ScoreboardResult<Option<User>> {
        Ok(self.users.read().await.get(user_name.as_str()).cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> ScoreboardResult<bool> {
        Ok(self.users.read().await.contains_key(user_name.as_str()))
    }

    async fn add_progress(
        &self,
        user_name: &UserName,
        delta: &ProgressDelta,
    ) -> ScoreboardResult<Option<UserProfile>> {
        let mut users = self.users.write().await;

        Ok(users.get_mut(user_name.as_str()).map(|user| {
            user.apply(delta);
            UserProfile::from(user.clone())
        }))
    }

    async fn update_password_hash(
        &self,
        user_name: &UserName,
        password_hash: &HashedPassword,
    ) -> ScoreboardResult<()> {
        let mut users = self.users.write().await;

        let user = users
            .get_mut(user_name.as_str())
            .ok_or(ScoreboardError::UserNotFound)?;
        user.set_password_hash(password_hash.clone());

        Ok(())
    }
}
