//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Emails are stored normalized (trimmed, lowercase); callers normalize
/// before lookup. Implementations must enforce email uniqueness.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No account for this email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Persist a new user
    ///
    /// # Errors
    /// * `AuthError::DuplicateAccount` - the email is already registered
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Overwrite an existing user
    ///
    /// # Errors
    /// * `DomainError::NotFound` - no user with this id
    async fn update(&self, user: User) -> Result<User, DomainError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
}
