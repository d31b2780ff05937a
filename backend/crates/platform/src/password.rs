//! Password Hashing and Verification
//!
//! Password handling with:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Verification of legacy bcrypt hashes, flagged for rehash
//! - Zeroization of sensitive data
//! - Constant-time comparison (delegated to the hash implementations)
//!
//! ## Security Features
//! - Memory-hard hashing prevents GPU/ASIC attacks
//! - Zeroization prevents memory inspection attacks
//! - Pepper support for additional security layer

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Constants
// ============================================================================

/// Default maximum password length in characters
///
/// Bounds hashing work per request; far above any password a client sends.
pub const MAX_PASSWORD_LENGTH: usize = 1024;

/// Prefixes of the bcrypt modular crypt format
const BCRYPT_PREFIXES: &[&str] = &["$2a$", "$2b$", "$2x$", "$2y$"];

/// Length of a bcrypt hash string
const BCRYPT_HASH_LENGTH: usize = 60;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password is the empty string
    #[error("Password cannot be empty")]
    Empty,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Hasher parameters rejected by Argon2
    #[error("Invalid hasher parameters: {0}")]
    InvalidParams(String),

    /// Stored hash is neither PHC nor bcrypt
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Policy
// ============================================================================

/// Length bounds applied to clear text passwords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordPolicy {
    /// Minimum length in Unicode code points
    pub min_length: usize,
    /// Maximum length in Unicode code points
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    /// Any non-empty password is accepted, which is what existing clients
    /// were built against.
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: MAX_PASSWORD_LENGTH,
        }
    }
}

// ============================================================================
// Hasher parameters
// ============================================================================

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashParams {
    /// OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashParams {
    /// Smallest parameters Argon2 accepts. Only for tests and local runs.
    pub const fn low_cost() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }

    fn hasher(&self) -> Result<Argon2<'static>, PasswordHashError> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidParams(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::{ClearTextPassword, HashParams, PasswordPolicy};
///
/// let password = ClearTextPassword::new("correct horse".to_string(), &PasswordPolicy::default())?;
/// let hashed = password.hash(&HashParams::low_cost(), None)?;
/// assert!(hashed.verify(&password, None));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password, checked against `policy`
    ///
    /// Unicode is normalized using NFKC before validation.
    pub fn new(raw: String, policy: &PasswordPolicy) -> Result<Self, PasswordPolicyError> {
        let raw = Zeroizing::new(raw);
        let normalized: String = raw.nfkc().collect();
        let normalized = Zeroizing::new(normalized);

        // Whitespace is an ordinary character here
        if normalized.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        let char_count = normalized.chars().count();

        if char_count < policy.min_length {
            return Err(PasswordPolicyError::TooShort {
                min: policy.min_length,
                actual: char_count,
            });
        }

        if char_count > policy.max_length {
            return Err(PasswordPolicyError::TooLong {
                max: policy.max_length,
                actual: char_count,
            });
        }

        Ok(Self(normalized.as_str().to_owned()))
    }

    /// Create without validation (for testing)
    #[cfg(test)]
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Zeroizing<Vec<u8>> {
        let mut combined = self.as_bytes().to_vec();
        if let Some(p) = pepper {
            combined.extend_from_slice(p);
        }
        Zeroizing::new(combined)
    }

    /// Hash the password using Argon2id
    ///
    /// ## Returns
    /// PHC-formatted hash string wrapped in `HashedPassword`
    pub fn hash(
        &self,
        params: &HashParams,
        pepper: Option<&[u8]>,
    ) -> Result<HashedPassword, PasswordHashError> {
        let password_bytes = self.peppered(pepper);
        let salt = SaltString::generate(OsRng);

        let hash = params
            .hasher()?
            .hash_password(&password_bytes, &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
            scheme: HashScheme::Argon2id,
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Algorithm family of a stored hash
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    /// PHC string produced by this crate
    Argon2id,
    /// bcrypt hash written by the previous deployment (never peppered)
    Bcrypt,
}

/// Hashed password as stored
///
/// New hashes are Argon2id PHC strings. bcrypt hashes are accepted for
/// verification only and always report [`HashedPassword::needs_rehash`].
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
    scheme: HashScheme,
}

impl HashedPassword {
    /// Parse a stored hash (e.g., from the database)
    pub fn from_stored(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        if BCRYPT_PREFIXES.iter().any(|p| hash.starts_with(p)) {
            if hash.len() != BCRYPT_HASH_LENGTH {
                return Err(PasswordHashError::InvalidHashFormat);
            }
            return Ok(Self {
                hash,
                scheme: HashScheme::Bcrypt,
            });
        }

        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self {
            hash,
            scheme: HashScheme::Argon2id,
        })
    }

    /// Get the hash string for storage
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn scheme(&self) -> HashScheme {
        self.scheme
    }

    /// Verify a password against this hash
    ///
    /// ## Arguments
    /// * `password` - The clear text password to verify
    /// * `pepper` - Optional pepper (must match the one used during hashing,
    ///   ignored for bcrypt hashes)
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        match self.scheme {
            HashScheme::Bcrypt => bcrypt::verify(password.as_bytes(), &self.hash).unwrap_or(false),
            HashScheme::Argon2id => {
                let parsed_hash = match PasswordHash::new(&self.hash) {
                    Ok(h) => h,
                    Err(_) => return false,
                };

                // Parameters are read from the PHC string
                Argon2::default()
                    .verify_password(&password.peppered(pepper), &parsed_hash)
                    .is_ok()
            }
        }
    }

    /// Check if the hash should be replaced after a successful verification
    ///
    /// True for bcrypt hashes, non-Argon2id hashes, and Argon2id hashes whose
    /// cost differs from `params`.
    pub fn needs_rehash(&self, params: &HashParams) -> bool {
        if self.scheme == HashScheme::Bcrypt {
            return true;
        }

        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return true,
        };

        if parsed_hash.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }

        match Params::try_from(&parsed_hash) {
            Ok(stored) => {
                stored.m_cost() != params.memory_kib
                    || stored.t_cost() != params.iterations
                    || stored.p_cost() != params.parallelism
            }
            Err(_) => true,
        }
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("scheme", &self.scheme)
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> PasswordPolicy {
        PasswordPolicy::default()
    }

    #[test]
    fn test_password_too_short() {
        let strict = PasswordPolicy {
            min_length: 8,
            ..PasswordPolicy::default()
        };
        let result = ClearTextPassword::new("short".to_string(), &strict);
        assert!(matches!(
            result,
            Err(PasswordPolicyError::TooShort { min: 8, actual: 5 })
        ));
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(MAX_PASSWORD_LENGTH + 1);
        let result = ClearTextPassword::new(long_password, &policy());
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_empty() {
        let result = ClearTextPassword::new("".to_string(), &policy());
        assert_eq!(result.err(), Some(PasswordPolicyError::Empty));
    }

    #[test]
    fn test_whitespace_and_control_characters_accepted() {
        assert!(ClearTextPassword::new("   ".to_string(), &policy()).is_ok());
        assert!(ClearTextPassword::new("abc\u{0007}def".to_string(), &policy()).is_ok());
    }

    #[test]
    fn test_short_password_accepted_by_default() {
        assert!(ClearTextPassword::new("pw".to_string(), &policy()).is_ok());
    }

    #[test]
    fn test_unicode_password() {
        assert!(ClearTextPassword::new("パスワード安全です!".to_string(), &policy()).is_ok());
    }

    #[test]
    fn test_hash_and_verify() {
        let password = ClearTextPassword::new_unchecked("TestPassword123!".to_string());
        let hashed = password.hash(&HashParams::low_cost(), None).unwrap();
        assert_eq!(hashed.scheme(), HashScheme::Argon2id);

        assert!(hashed.verify(&password, None));

        let wrong_password = ClearTextPassword::new_unchecked("WrongPassword123!".to_string());
        assert!(!hashed.verify(&wrong_password, None));
    }

    #[test]
    fn test_hash_with_pepper() {
        let password = ClearTextPassword::new_unchecked("TestPassword123!".to_string());
        let pepper = b"my_secret_pepper";
        let hashed = password.hash(&HashParams::low_cost(), Some(pepper)).unwrap();

        assert!(hashed.verify(&password, Some(pepper)));
        assert!(!hashed.verify(&password, None));
        assert!(!hashed.verify(&password, Some(b"wrong_pepper")));
    }

    #[test]
    fn test_stored_string_roundtrip() {
        let password = ClearTextPassword::new_unchecked("TestPassword123!".to_string());
        let hashed = password.hash(&HashParams::low_cost(), None).unwrap();

        let restored = HashedPassword::from_stored(hashed.as_str().to_string()).unwrap();
        assert!(restored.verify(&password, None));
    }

    #[test]
    fn test_invalid_stored_string() {
        assert!(HashedPassword::from_stored("not_a_valid_hash").is_err());
        assert!(HashedPassword::from_stored("$2b$10$tooshort").is_err());
    }

    #[test]
    fn test_legacy_bcrypt_hash() {
        let legacy = bcrypt::hash("hunter2", 4).unwrap();
        let stored = HashedPassword::from_stored(legacy).unwrap();
        assert_eq!(stored.scheme(), HashScheme::Bcrypt);

        let password = ClearTextPassword::new_unchecked("hunter2".to_string());
        assert!(stored.verify(&password, None));
        // Legacy hashes were never peppered
        assert!(stored.verify(&password, Some(b"pepper")));

        let wrong = ClearTextPassword::new_unchecked("hunter3".to_string());
        assert!(!stored.verify(&wrong, None));

        assert!(stored.needs_rehash(&HashParams::low_cost()));
    }

    #[test]
    fn test_needs_rehash_when_cost_changes() {
        let password = ClearTextPassword::new_unchecked("TestPassword123!".to_string());
        let hashed = password.hash(&HashParams::low_cost(), None).unwrap();

        assert!(!hashed.needs_rehash(&HashParams::low_cost()));
        assert!(hashed.needs_rehash(&HashParams::default()));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new_unchecked("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let hashed = password.hash(&HashParams::low_cost(), None).unwrap();
        assert!(!format!("{:?}", hashed).contains("$argon2"));
    }
}
