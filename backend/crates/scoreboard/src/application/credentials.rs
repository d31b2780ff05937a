//! Password hashing off the async runtime
//!
//! Argon2id is deliberately slow, so hashing and verification run on the
//! blocking pool.

use platform::password::{ClearTextPassword, HashParams, HashedPassword};

use crate::error::{ScoreboardError, ScoreboardResult};

/// Result of checking a password against a stored hash
#[derive(Debug)]
pub enum Verification {
    Rejected,
    /// `rehashed` is set when the stored hash should be replaced
    Accepted { rehashed: Option<HashedPassword> },
}

/// Hash a new password
pub async fn hash_password(
    password: ClearTextPassword,
    params: HashParams,
    pepper: Option<Vec<u8>>,
) -> ScoreboardResult<HashedPassword> {
    tokio::task::spawn_blocking(move || password.hash(&params, pepper.as_deref()))
        .await?
        .map_err(|e| ScoreboardError::Internal(e.to_string()))
}

/// Verify a password, rehashing it with `params` if the stored hash is
/// outdated
pub async fn verify_password(
    stored: HashedPassword,
    password: ClearTextPassword,
    params: HashParams,
    pepper: Option<Vec<u8>>,
) -> ScoreboardResult<Verification> {
    tokio::task::spawn_blocking(move || -> ScoreboardResult<Verification> {
        let pepper = pepper.as_deref();

        if !stored.verify(&password, pepper) {
            return Ok(Verification::Rejected);
        }

        if !stored.needs_rehash(&params) {
            return Ok(Verification::Accepted { rehashed: None });
        }

        let rehashed = password
            .hash(&params, pepper)
            .map_err(|e| ScoreboardError::Internal(e.to_string()))?;
        Ok(Verification::Accepted {
            rehashed: Some(rehashed),
        })
    })
    .await?
}
