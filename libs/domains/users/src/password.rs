//! Credential encoding.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{UserError, UserResult};

/// One-way password encoder.
pub trait PasswordEncoder: Send + Sync {
    /// Hash `raw` into a self-describing string.
    fn encode(&self, raw: &str) -> UserResult<String>;

    /// Whether `raw` hashes to `encoded`. A malformed `encoded` never matches.
    fn matches(&self, raw: &str, encoded: &str) -> bool;
}

/// Argon2id with the crate defaults and a random salt per hash.
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordEncoder {
    argon2: Argon2<'static>,
}

impl Argon2PasswordEncoder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordEncoder for Argon2PasswordEncoder {
    fn encode(&self, raw: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn matches(&self, raw: &str, encoded: &str) -> bool {
        match PasswordHash::new(encoded) {
            Ok(parsed) => self
                .argon2
                .verify_password(raw.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                tracing::warn!("Stored password is not a valid PHC string: {}", e);
                false
            }
        }
    }
}
