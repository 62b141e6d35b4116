//! Booking repository trait.
//!
//! Overlap checks for property stays are part of the write operations
//! themselves: `create_checked` and `update_status_checked` must run the
//! check and the write as one serialized unit per property (a row lock in
//! SQL, the write lock in memory), so two overlapping stays can never both
//! end up CONFIRMED.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::booking::{Booking, BookingStatus};
use crate::domain::entities::listing::ListingRef;
use crate::errors::DomainError;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError>;

    /// Insert a booking. For a property stay with a date range, fail with
    /// `BookingError::BookingConflict` if a CONFIRMED stay on the same
    /// property overlaps it.
    async fn create_checked(&self, booking: Booking) -> Result<Booking, DomainError>;

    /// Set the status of a booking. When moving a property stay to
    /// CONFIRMED, fail with `BookingError::BookingConflict` if another
    /// CONFIRMED stay on the same property overlaps it.
    ///
    /// With `enforce_transitions`, the move is validated against the status
    /// read under the same lock as the write.
    ///
    /// # Errors
    /// * `BookingError::BookingNotFound` - no booking with this id
    /// * `BookingError::InvalidTransition` - only with `enforce_transitions`
    async fn update_status_checked(
        &self,
        id: Uuid,
        status: BookingStatus,
        enforce_transitions: bool,
    ) -> Result<Booking, DomainError>;

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>, DomainError>;

    async fn find_by_host(&self, host_id: Uuid) -> Result<Vec<Booking>, DomainError>;

    async fn find_by_listing(&self, target: ListingRef) -> Result<Vec<Booking>, DomainError>;

    /// Returns whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
