//! User Name Value Object
//!
//! The user name is the only identifier a client ever sends: it keys every
//! lookup, and the store holds a unique index on it.
//!
//! The only rule is that it is not blank. There is no length or character
//! restriction, so every name already in the store stays reachable.
//! Matching is exact (case-sensitive, no normalization).

use std::fmt;

use derive_more::Display;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    /// User name is empty or whitespace only
    Empty,
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "User name cannot be empty"),
        }
    }
}

impl std::error::Error for UserNameError {}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct UserName(String);

impl UserName {
    /// Validate and wrap a raw user name
    pub fn new(raw: impl Into<String>) -> Result<Self, UserNameError> {
        let raw = raw.into();

        if raw.trim().is_empty() {
            return Err(UserNameError::Empty);
        }

        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
