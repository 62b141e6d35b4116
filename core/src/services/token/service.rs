//! Main token service implementation

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use stazy_shared::config::auth::MIN_JWT_SECRET_BYTES;
use uuid::Uuid;

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

/// Issues and verifies signed identity tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl_seconds", &self.config.ttl_seconds)
            .field("issuer", &self.config.issuer)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Creates a new token service
    ///
    /// # Errors
    ///
    /// `TokenError::KeyTooShort` if the secret is shorter than 32 bytes,
    /// the HS256 minimum. Callers should treat this as a startup failure.
    pub fn new(config: TokenServiceConfig) -> Result<Self, TokenError> {
        let actual = config.secret.len();
        if actual < MIN_JWT_SECRET_BYTES {
            return Err(TokenError::KeyTooShort {
                min: MIN_JWT_SECRET_BYTES,
                actual,
            });
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Expiry is checked by hand so `now == exp` already counts as expired
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Lifetime of issued tokens in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.config.ttl_seconds
    }

    /// Issues a token for `subject`, valid for the configured TTL
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + self.config.ttl_seconds,
            nbf: now,
            iss: self.config.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign identity token");
            TokenError::TokenGenerationFailed
        })
    }

    /// Verifies a token and returns its claims
    ///
    /// # Errors
    ///
    /// * `TokenError::TokenInvalid` - bad signature, wrong issuer, malformed
    /// * `TokenError::TokenExpired` - valid signature but `now >= exp`
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::TokenInvalid)?;

        if data.claims.is_expired_at(Utc::now().timestamp()) {
            return Err(TokenError::TokenExpired);
        }

        Ok(data.claims)
    }

    /// Verifies a token and returns its subject
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.decode_claims(token).map(|claims| claims.sub)
    }

    /// Non-failing pre-check; a token that cannot be verified at all also
    /// counts as expired
    pub fn is_expired(&self, token: &str) -> bool {
        self.decode_claims(token).is_err()
    }
}
