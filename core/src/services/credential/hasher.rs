//! Argon2id credential hasher

use argon2::{Algorithm, Argon2, Params, Version};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};

use crate::errors::AuthError;

/// Salt length in bytes
pub const SALT_LENGTH: usize = 16;

/// Digest length in bytes
const OUTPUT_LENGTH: usize = 32;

/// Argon2id cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialHasherConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for CredentialHasherConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl CredentialHasherConfig {
    /// Cheapest parameters argon2 accepts; for tests only
    pub fn minimal() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }
}

/// Deterministic salted hashing of secrets
///
/// The same `(secret, salt)` pair always produces the same digest, so a
/// digest can be recomputed and compared instead of decoded.
#[derive(Debug, Clone)]
pub struct CredentialHasher {
    config: CredentialHasherConfig,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new(CredentialHasherConfig::default())
    }
}

impl CredentialHasher {
    pub fn new(config: CredentialHasherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CredentialHasherConfig {
        &self.config
    }

    /// Fresh random salt, base64 encoded
    pub fn generate_salt(&self) -> String {
        let mut salt = [0u8; SALT_LENGTH];
        OsRng.fill_bytes(&mut salt);
        STANDARD.encode(salt)
    }

    /// Hash `secret` with a base64 salt produced by [`generate_salt`](Self::generate_salt)
    ///
    /// # Errors
    ///
    /// `AuthError::HashingFailed` if the secret is empty, the salt is not
    /// valid base64 or shorter than [`SALT_LENGTH`] bytes, or argon2 rejects
    /// the parameters.
    pub fn hash(&self, secret: &str, salt: &str) -> Result<String, AuthError> {
        if secret.is_empty() {
            return Err(hashing_failed("secret must not be empty"));
        }

        let salt_bytes = STANDARD
            .decode(salt)
            .map_err(|_| hashing_failed("salt is not valid base64"))?;
        if salt_bytes.len() < SALT_LENGTH {
            return Err(hashing_failed("salt is too short"));
        }

        let params = Params::new(
            self.config.memory_kib,
            self.config.iterations,
            self.config.parallelism,
            Some(OUTPUT_LENGTH),
        )
        .map_err(|e| hashing_failed(&e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut output = [0u8; OUTPUT_LENGTH];
        argon2
            .hash_password_into(secret.as_bytes(), &salt_bytes, &mut output)
            .map_err(|e| hashing_failed(&e.to_string()))?;

        Ok(STANDARD.encode(output))
    }

    /// Recompute the digest of `secret` and compare it to `digest` in
    /// constant time
    pub fn matches(&self, secret: &str, digest: &str, salt: &str) -> Result<bool, AuthError> {
        let candidate = self.hash(secret, salt)?;
        Ok(constant_time_eq(candidate.as_bytes(), digest.as_bytes()))
    }
}

fn hashing_failed(reason: &str) -> AuthError {
    AuthError::HashingFailed {
        reason: reason.to_string(),
    }
}
