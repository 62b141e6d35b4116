//! Main authentication service implementation

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use stazy_shared::config::OtpConfig;
use stazy_shared::validation::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::user::{OneTimeCode, User};
use crate::domain::value_objects::{AuthResponse, UserProfile};
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::credential::CredentialHasher;
use crate::services::mail::{password_reset_mail, verification_mail, MailContent, MailServiceTrait};
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;
use super::otp::generate_code;

/// Authentication service for the complete account flow
pub struct AuthService<U, M>
where
    U: UserRepository + ?Sized,
    M: MailServiceTrait + ?Sized,
{
    /// User repository for database operations
    user_repository: Arc<U>,
    /// Mail dispatcher for one-time codes
    mail_service: Arc<M>,
    /// Token service for identity tokens
    token_service: Arc<TokenService>,
    /// Hasher for passwords and one-time codes
    hasher: Arc<CredentialHasher>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<U, M> AuthService<U, M>
where
    U: UserRepository + ?Sized,
    M: MailServiceTrait + ?Sized,
{
    /// Create a new authentication service
    ///
    /// The code lifetime is clamped into the supported 5 to 15 minute window.
    pub fn new(
        user_repository: Arc<U>,
        mail_service: Arc<M>,
        token_service: Arc<TokenService>,
        hasher: Arc<CredentialHasher>,
        mut config: AuthServiceConfig,
    ) -> Self {
        config.otp_expiry_minutes = config
            .otp_expiry_minutes
            .clamp(OtpConfig::MIN_EXPIRY_MINUTES, OtpConfig::MAX_EXPIRY_MINUTES);

        Self {
            user_repository,
            mail_service,
            token_service,
            hasher,
            config,
        }
    }

    pub fn config(&self) -> &AuthServiceConfig {
        &self.config
    }

    /// Register a new account and log it in
    ///
    /// The account starts unverified; a verification code is mailed on a
    /// best-effort basis and the returned token is usable right away.
    ///
    /// # Errors
    ///
    /// * `ValidationError::InvalidEmail` / `TooShort` - bad input
    /// * `AuthError::DuplicateAccount` - email already registered
    pub async fn signup(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        self.validate_password(password)?;

        if self.user_repository.exists_by_email(&email).await? {
            return Err(AuthError::DuplicateAccount.into());
        }

        let salt = self.hasher.generate_salt();
        let password_hash = self.hasher.hash(password, &salt)?;
        let mut user = User::new(email, password_hash, salt);

        let code = generate_code();
        user.set_email_verification(self.issue_code(&user, &code)?);

        // Repository enforces email uniqueness for concurrent signups
        let user = self.user_repository.create(user).await?;
        tracing::info!(
            email = %mask_email(&user.email),
            user_id = %user.id,
            "Account created"
        );

        self.dispatch(&user.email, verification_mail(&code, self.config.otp_expiry_minutes))
            .await;

        self.auth_response(&user)
    }

    /// Log in with email and password
    ///
    /// # Errors
    ///
    /// * `AuthError::AccountNotFound` - no account for this email
    /// * `AuthError::InvalidCredentials` - wrong password
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);
        let user = self.find_user(&email).await?;

        if password.is_empty() || !self.hasher.matches(password, &user.password_hash, &user.salt)? {
            tracing::warn!(email = %mask_email(&email), "Login rejected: invalid credentials");
            return Err(AuthError::InvalidCredentials.into());
        }

        tracing::info!(email = %mask_email(&email), "Login succeeded");
        self.auth_response(&user)
    }

    /// Issue (or re-issue) an email verification code
    ///
    /// Returns when the new code expires. Any previous code is replaced.
    pub async fn send_email_verification(&self, email: &str) -> DomainResult<DateTime<Utc>> {
        let email = normalize_email(email);
        let mut user = self.find_user(&email).await?;

        if user.email_verified {
            return Err(AuthError::AlreadyVerified.into());
        }

        let code = generate_code();
        let otp = self.issue_code(&user, &code)?;
        let expires_at = otp.expires_at;
        user.set_email_verification(otp);
        self.user_repository.update(user).await?;

        self.dispatch(&email, verification_mail(&code, self.config.otp_expiry_minutes))
            .await;
        tracing::info!(email = %mask_email(&email), "Verification code issued");

        Ok(expires_at)
    }

    /// Consume an email verification code
    ///
    /// # Errors
    ///
    /// * `AuthError::AlreadyVerified` - nothing left to verify
    /// * `AuthError::InvalidToken` - no pending code, or the code does not match
    /// * `AuthError::TokenExpired` - the code matches but its window has passed
    pub async fn verify_email(&self, email: &str, code: &str) -> DomainResult<UserProfile> {
        let email = normalize_email(email);
        let mut user = self.find_user(&email).await?;

        if user.email_verified {
            return Err(AuthError::AlreadyVerified.into());
        }

        self.check_code(user.email_verification.as_ref(), code, &user.salt)?;

        user.mark_email_verified();
        let user = self.user_repository.update(user).await?;
        tracing::info!(email = %mask_email(&email), "Email verified");

        Ok(UserProfile::from(&user))
    }

    /// Mail a password reset code
    ///
    /// Unknown emails succeed silently so accounts cannot be enumerated.
    pub async fn send_password_reset(&self, email: &str) -> DomainResult<()> {
        let email = normalize_email(email);
        let Some(mut user) = self.user_repository.find_by_email(&email).await? else {
            tracing::info!(email = %mask_email(&email), "Password reset requested for unknown email");
            return Ok(());
        };

        let code = generate_code();
        let otp = self.issue_code(&user, &code)?;
        user.set_password_reset(otp);
        self.user_repository.update(user).await?;

        self.dispatch(&email, password_reset_mail(&code, self.config.otp_expiry_minutes))
            .await;
        tracing::info!(email = %mask_email(&email), "Password reset code issued");

        Ok(())
    }

    /// Consume a password reset code and set a new password
    ///
    /// The new password is hashed with the account's existing salt.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidToken` - unknown email, no pending code, or mismatch
    /// * `AuthError::TokenExpired` - the code matches but its window has passed
    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        self.validate_password(new_password)?;

        let email = normalize_email(email);
        let mut user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidToken)?;

        self.check_code(user.password_reset.as_ref(), code, &user.salt)?;

        let password_hash = self.hasher.hash(new_password, &user.salt)?;
        user.change_password(password_hash);
        self.user_repository.update(user).await?;
        tracing::info!(email = %mask_email(&email), "Password reset");

        Ok(())
    }

    /// Fill in name and phone number
    ///
    /// # Errors
    ///
    /// * `AuthError::EmailNotVerified` - email must be verified first
    /// * `AuthError::ProfileAlreadyComplete` - unless overwrite is allowed
    /// * `ValidationError::RequiredField` - a blank field
    pub async fn complete_profile(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
    ) -> DomainResult<UserProfile> {
        let email = normalize_email(email);
        let mut user = self.find_user(&email).await?;

        if !user.email_verified {
            return Err(AuthError::EmailNotVerified.into());
        }
        if user.profile_completed && !self.config.allow_profile_overwrite {
            return Err(AuthError::ProfileAlreadyComplete.into());
        }

        let first_name = required("firstName", first_name)?;
        let last_name = required("lastName", last_name)?;
        let phone_number = required("phoneNumber", phone_number)?;

        user.complete_profile(first_name, last_name, phone_number);
        let user = self.user_repository.update(user).await?;
        tracing::info!(email = %mask_email(&email), "Profile completed");

        Ok(UserProfile::from(&user))
    }

    /// Public view of an account
    pub async fn profile(&self, email: &str) -> DomainResult<UserProfile> {
        let email = normalize_email(email);
        let user = self.find_user(&email).await?;
        Ok(UserProfile::from(&user))
    }

    async fn find_user(&self, email: &str) -> DomainResult<User> {
        self.user_repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::AccountNotFound.into())
    }

    fn validate_password(&self, password: &str) -> DomainResult<()> {
        if password.chars().count() < self.config.min_password_length {
            return Err(ValidationError::TooShort {
                field: "password".to_string(),
                min: self.config.min_password_length,
            }
            .into());
        }
        Ok(())
    }

    fn issue_code(&self, user: &User, code: &str) -> DomainResult<OneTimeCode> {
        let code_hash = self.hasher.hash(code, &user.salt)?;
        let expires_at = Utc::now() + Duration::minutes(self.config.otp_expiry_minutes);
        Ok(OneTimeCode::new(code_hash, expires_at))
    }

    /// Mismatch wins over expiry, so an expired code is only reported as
    /// such to someone who knows it
    fn check_code(&self, pending: Option<&OneTimeCode>, code: &str, salt: &str) -> DomainResult<()> {
        let pending = pending.ok_or(AuthError::InvalidToken)?;
        let code = code.trim();

        if code.is_empty() || !self.hasher.matches(code, &pending.code_hash, salt)? {
            return Err(AuthError::InvalidToken.into());
        }
        if pending.is_expired_at(Utc::now()) {
            return Err(AuthError::TokenExpired.into());
        }
        Ok(())
    }

    async fn dispatch(&self, to: &str, mail: MailContent) {
        match self.mail_service.send(to, &mail.subject, &mail.body).await {
            Ok(message_id) => {
                tracing::debug!(email = %mask_email(to), message_id = %message_id, "Mail sent");
            }
            Err(e) => {
                tracing::warn!(email = %mask_email(to), error = %e, "Mail delivery failed");
            }
        }
    }

    fn auth_response(&self, user: &User) -> DomainResult<AuthResponse> {
        let token = self.token_service.issue(&user.email)?;
        Ok(AuthResponse::for_user(
            token,
            self.token_service.ttl_seconds(),
            user,
        ))
    }
}

fn required(field: &str, value: &str) -> DomainResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        }
        .into());
    }
    Ok(value.to_string())
}
