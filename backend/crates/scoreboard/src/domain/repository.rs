//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.
//!
//! Both mutations are single atomic store operations: `create` relies on the
//! unique user name key, `add_progress` on a store-side increment. Callers
//! never read-modify-write.

use platform::password::HashedPassword;

use crate::domain::entity::user::{User, UserProfile};
use crate::domain::value_object::{progress_delta::ProgressDelta, user_name::UserName};
use crate::error::ScoreboardResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user
    ///
    /// Fails with `ScoreboardError::UserNameTaken` if the name exists, even
    /// when two inserts race.
    async fn create(&self, user: &User) -> ScoreboardResult<()>;

    /// Find user by user name
    async fn find_by_user_name(&self, user_name: &UserName) -> ScoreboardResult<Option<User>>;

    /// Check if user name exists
    async fn exists_by_user_name(&self, user_name: &UserName) -> ScoreboardResult<bool>;

    /// Atomically add `delta` to the counters and return the updated public
    /// fields, or `None` if no user has this name
    ///
    /// Only the returned fields are read back, so a damaged credential
    /// cannot fail an increment that has already been applied.
    async fn add_progress(
        &self,
        user_name: &UserName,
        delta: &ProgressDelta,
    ) -> ScoreboardResult<Option<UserProfile>>;

    /// Replace the stored password hash
    async fn update_password_hash(
        &self,
        user_name: &UserName,
        password_hash: &HashedPassword,
    ) -> ScoreboardResult<()>;
}
