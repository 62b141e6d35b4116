//! Mock implementation of BookingRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::booking::{Booking, BookingStatus};
use crate::domain::entities::listing::ListingRef;
use crate::errors::{BookingError, DomainError};

use super::trait_::BookingRepository;

/// In-memory booking repository; the write lock serializes conflict
/// checks with the writes that depend on them
#[derive(Clone, Default)]
pub struct MockBookingRepository {
    bookings: Arc<RwLock<HashMap<Uuid, Booking>>>,
}

impl MockBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a booking as-is, bypassing conflict checks
    pub async fn insert_raw(&self, booking: Booking) {
        self.bookings.write().await.insert(booking.id, booking);
    }

    fn conflicts(bookings: &HashMap<Uuid, Booking>, candidate: &Booking) -> bool {
        let Some(range) = candidate.blocking_range() else {
            return false;
        };
        bookings
            .values()
            .filter(|b| b.id != candidate.id)
            .any(|b| b.blocks(candidate.listing.id, &range))
    }

    fn sorted(mut bookings: Vec<Booking>) -> Vec<Booking> {
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bookings
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        Ok(bookings.get(&id).cloned())
    }

    async fn create_checked(&self, booking: Booking) -> Result<Booking, DomainError> {
        let mut bookings = self.bookings.write().await;

        if Self::conflicts(&bookings, &booking) {
            return Err(BookingError::BookingConflict.into());
        }

        bookings.insert(booking.id, booking.clone());
        Ok(booking)
    }

    async fn update_status_checked(
        &self,
        id: Uuid,
        status: BookingStatus,
        enforce_transitions: bool,
    ) -> Result<Booking, DomainError> {
        let mut bookings = self.bookings.write().await;

        let mut updated = bookings
            .get(&id)
            .cloned()
            .ok_or(BookingError::BookingNotFound)?;
        if enforce_transitions {
            updated.status.ensure_transition(status)?;
        }
        updated.set_status(status);

        if status == BookingStatus::Confirmed && Self::conflicts(&bookings, &updated) {
            return Err(BookingError::BookingConflict.into());
        }

        bookings.insert(id, updated.clone());
        Ok(updated)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        Ok(Self::sorted(
            bookings.values().filter(|b| b.user_id == user_id).cloned().collect(),
        ))
    }

    async fn find_by_host(&self, host_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        Ok(Self::sorted(
            bookings.values().filter(|b| b.host_id == host_id).cloned().collect(),
        ))
    }

    async fn find_by_listing(&self, target: ListingRef) -> Result<Vec<Booking>, DomainError> {
        let bookings = self.bookings.read().await;
        Ok(Self::sorted(
            bookings.values().filter(|b| b.listing == target).cloned().collect(),
        ))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut bookings = self.bookings.write().await;
        Ok(bookings.remove(&id).is_some())
    }
}
