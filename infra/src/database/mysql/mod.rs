//! MySQL implementations of the core repository traits.
//!
//! Ids are stored as `CHAR(36)` strings, money as `DECIMAL`, and listing
//! references as a `(kind, id)` column pair.

mod booking_repository_impl;
mod listing_repository_impl;
mod message_repository_impl;
mod user_repository_impl;
mod wishlist_repository_impl;

pub use booking_repository_impl::MySqlBookingRepository;
pub use listing_repository_impl::MySqlListingRepository;
pub use message_repository_impl::MySqlMessageRepository;
pub use user_repository_impl::MySqlUserRepository;
pub use wishlist_repository_impl::MySqlWishlistRepository;

use stazy_core::errors::DomainError;
use uuid::Uuid;

/// Wrap a driver error as an internal domain error with some context
pub(crate) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        tracing::error!(error = %e, "{}", context);
        DomainError::Internal {
            message: format!("{}: {}", context, e),
        }
    }
}

pub(crate) fn parse_uuid(value: &str, column: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID in {}: {}", column, e),
    })
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map_or(false, |db| db.is_unique_violation())
}
