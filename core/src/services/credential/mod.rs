//! Salted credential hashing for passwords and one-time codes
//!
//! Digests are raw Argon2id output, base64 encoded. The salt is generated
//! once per account and stored next to the digests it was used for.

mod hasher;

pub use hasher::{CredentialHasher, CredentialHasherConfig, SALT_LENGTH};
