//! API DTOs (Data Transfer Objects)
//!
//! Every body field is optional here; the use cases decide which absences
//! are errors so that they get the right status and message.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::entity::user::{User, UserProfile};

// ============================================================================
// Requests
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub image: Option<String>,
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Update request
///
/// Deltas are kept as raw JSON so numeric strings and booleans can be
/// coerced later. An explicit `null` is kept apart from an absent field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub username: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub new_score: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub new_emission: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

// ============================================================================
// Responses
// ============================================================================

/// Public fields of a user (never the password hash)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub username: String,
    pub score: f64,
    #[serde(rename = "emissionCO2")]
    pub emission_co2: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl From<UserProfile> for UserResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            username: profile.user_name.into_inner(),
            score: profile.score,
            emission_co2: profile.emission_co2,
            image: profile.image,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserProfile::from(user).into()
    }
}

/// Success body: a message and the user
#[derive(Debug, Clone, Serialize)]
pub struct UserEnvelope {
    pub message: &'static str,
    pub user: UserResponse,
}

impl UserEnvelope {
    pub fn new(message: &'static str, user: impl Into<UserResponse>) -> Self {
        Self {
            message,
            user: user.into(),
        }
    }
}

/// Health check body
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_request_keeps_explicit_null() {
        let request: UpdateRequest =
            serde_json::from_value(json!({ "username": "alice", "newScore": null })).unwrap();

        assert_eq!(request.new_score, Some(Value::Null));
        assert_eq!(request.new_emission, None);
    }
}
