//! Domain-specific error types and error handling.

mod types;

pub use types::{
    AuthError, BookingError, ListingError, TokenError, ValidationError, WishlistError,
};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Business rule violation: {message}")]
    BusinessRule { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Listing(#[from] ListingError),

    #[error(transparent)]
    Wishlist(#[from] WishlistError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Shorthand for wrapping an unexpected failure from a collaborator
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bridged_errors_keep_their_message() {
        let err: DomainError = BookingError::BookingConflict.into();
        assert_eq!(err.to_string(), "Listing is already booked for the requested dates");

        let err: DomainError = TokenError::TokenExpired.into();
        assert!(matches!(err, DomainError::Token(TokenError::TokenExpired)));
    }

    #[test]
    fn test_internal_shorthand() {
        let err = DomainError::internal("pool closed");
        assert_eq!(err.to_string(), "Internal error: pool closed");
    }
}
