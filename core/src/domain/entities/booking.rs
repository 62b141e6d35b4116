//! Booking entity and its status lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::listing::{ListingKind, ListingRef};
use crate::domain::value_objects::DateRange;
use crate::errors::BookingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
            BookingStatus::Rejected => "REJECTED",
        }
    }

    /// Transition graph used when strict transitions are enabled:
    /// PENDING -> CONFIRMED | REJECTED | CANCELLED,
    /// CONFIRMED -> CANCELLED | COMPLETED.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
                | (Confirmed, Completed)
        )
    }

    /// `InvalidTransition` unless `next` is reachable from this status
    pub fn ensure_transition(&self, next: BookingStatus) -> Result<(), BookingError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(BookingError::InvalidTransition {
                from: self.to_string(),
                to: next.to_string(),
            })
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Ok(BookingStatus::Pending),
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "CANCELLED" | "CANCELED" => Ok(BookingStatus::Cancelled),
            "COMPLETED" => Ok(BookingStatus::Completed),
            "REJECTED" => Ok(BookingStatus::Rejected),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// A request by a user to book one listing
///
/// `listing` never changes after creation. `host_id` is the owner's user id,
/// denormalized so hosts can list their bookings without a join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub host_id: Uuid,
    pub listing: ListingRef,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub number_of_guests: u32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to create a booking once pricing has been resolved
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: Uuid,
    pub host_id: Uuid,
    pub listing: ListingRef,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub number_of_guests: u32,
    pub total_price: Decimal,
    pub special_requests: Option<String>,
}

impl Booking {
    /// Creates a PENDING booking
    pub fn new(new: NewBooking) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            host_id: new.host_id,
            listing: new.listing,
            start_date: new.start_date,
            end_date: new.end_date,
            number_of_guests: new.number_of_guests,
            total_price: new.total_price,
            status: BookingStatus::Pending,
            special_requests: new.special_requests,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn date_range(&self) -> Option<DateRange> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => DateRange::new(start, end).ok(),
            _ => None,
        }
    }

    /// Date range that takes part in overlap checks: properties only
    pub fn blocking_range(&self) -> Option<DateRange> {
        if self.listing.kind == ListingKind::Property {
            self.date_range()
        } else {
            None
        }
    }

    /// Whether this booking occupies `range` on the same property as a
    /// CONFIRMED stay
    pub fn blocks(&self, property_id: Uuid, range: &DateRange) -> bool {
        self.status == BookingStatus::Confirmed
            && self.listing.kind == ListingKind::Property
            && self.listing.id == property_id
            && self.date_range().map_or(false, |r| r.overlaps(range))
    }

    pub fn set_status(&mut self, status: BookingStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}
