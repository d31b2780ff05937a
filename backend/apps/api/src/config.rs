//! Server configuration
//!
//! Read once at startup from the process environment (`.env` is loaded
//! first). Invalid values abort startup.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow};
use scoreboard::DeltaPolicy;
use scoreboard::infra::mongo::DEFAULT_COLLECTION;

const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/green_it";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MONGODB_TIMEOUT_SECS: u64 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Deployment profile, chosen with `APP_PROFILE`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Profile {
    /// Full-cost password hashing
    #[default]
    Production,
    /// Minimum-cost password hashing, for local runs only
    Development,
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            other => Err(format!(
                "unknown profile {other:?} (expected \"production\" or \"development\")"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub profile: Profile,
    pub mongodb_uri: String,
    /// Overrides the database named in the URI
    pub mongodb_database: Option<String>,
    pub mongodb_collection: String,
    /// Connect and server selection timeout
    pub mongodb_timeout: Duration,
    pub port: u16,
    pub request_timeout: Duration,
    pub delta_policy: DeltaPolicy,
    pub password_pepper: Option<Vec<u8>>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            profile: match var("APP_PROFILE") {
                Some(raw) => raw
                    .parse()
                    .map_err(|e: String| anyhow!(e))
                    .context("APP_PROFILE")?,
                None => Profile::default(),
            },
            mongodb_uri: var("MONGODB_URI").unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string()),
            mongodb_database: var("MONGODB_DATABASE"),
            mongodb_collection: var("MONGODB_COLLECTION")
                .unwrap_or_else(|| DEFAULT_COLLECTION.to_string()),
            mongodb_timeout: Duration::from_secs(parse_or(
                "MONGODB_TIMEOUT_SECS",
                DEFAULT_MONGODB_TIMEOUT_SECS,
            )?),
            port: parse_or("PORT", DEFAULT_PORT)?,
            request_timeout: Duration::from_secs(parse_or(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            delta_policy: match var("UPDATE_DELTA_POLICY") {
                Some(raw) => raw
                    .parse()
                    .map_err(|e: String| anyhow!(e))
                    .context("UPDATE_DELTA_POLICY")?,
                None => DeltaPolicy::default(),
            },
            password_pepper: var("PASSWORD_PEPPER").map(String::into_bytes),
        })
    }
}

/// Non-empty environment variable
fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_defaults_to_production() {
        assert_eq!(Profile::default(), Profile::Production);
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("development".parse(), Ok(Profile::Development));
        assert_eq!(" Dev ".parse(), Ok(Profile::Development));
        assert_eq!("PRODUCTION".parse(), Ok(Profile::Production));
        assert!("debug".parse::<Profile>().is_err());
    }
}
