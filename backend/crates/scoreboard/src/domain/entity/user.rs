//! User Entity
//!
//! The single record this service keeps: credentials plus the two
//! cumulative counters.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{progress_delta::ProgressDelta, user_name::UserName};

/// User entity
///
/// `password_hash` never leaves the service; responses are built from the
/// other fields only.
#[derive(Debug, Clone)]
pub struct User {
    /// User name (unique)
    pub user_name: UserName,
    /// One-way hash of the credential
    pub password_hash: HashedPassword,
    /// Cumulative score
    pub score: f64,
    /// Cumulative CO2 emission
    pub emission_co2: f64,
    /// Optional avatar reference, stored as given
    pub image: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with zeroed counters
    pub fn new(user_name: UserName, password_hash: HashedPassword, image: Option<String>) -> Self {
        let now = Utc::now();

        Self {
            user_name,
            password_hash,
            score: 0.0,
            emission_co2: 0.0,
            image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Add a delta to both counters
    pub fn apply(&mut self, delta: &ProgressDelta) {
        self.score += delta.score();
        self.emission_co2 += delta.emission();
        self.updated_at = Utc::now();
    }

    /// Replace the stored hash
    pub fn set_password_hash(&mut self, password_hash: HashedPassword) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }
}

/// Public view of a user: everything a response may contain
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub user_name: UserName,
    pub score: f64,
    pub emission_co2: f64,
    pub image: Option<String>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            user_name: user.user_name,
            score: user.score,
            emission_co2: user.emission_co2,
            image: user.image,
        }
    }
}
