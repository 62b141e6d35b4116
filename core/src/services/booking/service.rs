//! Main booking service implementation

use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use stazy_shared::validation::{mask_email, normalize_email};

use crate::domain::entities::booking::{Booking, BookingStatus, NewBooking};
use crate::domain::entities::listing::{Bookable, Listing, ListingKind, ListingRef};
use crate::domain::entities::user::User;
use crate::domain::value_objects::DateRange;
use crate::errors::{BookingError, DomainError, DomainResult, ValidationError};
use crate::repositories::{BookingRepository, ListingRepository, UserRepository};

use super::config::BookingPolicy;
use super::types::CreateBookingCommand;

/// Booking workflow over users, listings and bookings
pub struct BookingService<U, L, B>
where
    U: UserRepository + ?Sized,
    L: ListingRepository + ?Sized,
    B: BookingRepository + ?Sized,
{
    user_repository: Arc<U>,
    listing_repository: Arc<L>,
    booking_repository: Arc<B>,
    policy: BookingPolicy,
}

impl<U, L, B> BookingService<U, L, B>
where
    U: UserRepository + ?Sized,
    L: ListingRepository + ?Sized,
    B: BookingRepository + ?Sized,
{
    pub fn new(
        user_repository: Arc<U>,
        listing_repository: Arc<L>,
        booking_repository: Arc<B>,
        policy: BookingPolicy,
    ) -> Self {
        Self {
            user_repository,
            listing_repository,
            booking_repository,
            policy,
        }
    }

    pub fn policy(&self) -> &BookingPolicy {
        &self.policy
    }

    /// Create a PENDING booking for `user_email`
    ///
    /// Properties are priced per night and require a range of at least one
    /// night that does not overlap a CONFIRMED stay. Services and
    /// experiences cost their flat price; their dates are optional.
    ///
    /// # Errors
    ///
    /// * `BookingError::UserNotFound` - unknown requesting user
    /// * `BookingError::InvalidBookingType` - unknown listing kind
    /// * `BookingError::EntityNotFound` - no such listing
    /// * `BookingError::HostNotFound` - the listing's owner has no account
    /// * `BookingError::InvalidDateRange` - missing, reversed or empty stay
    /// * `BookingError::BookingConflict` - overlaps a confirmed stay
    pub async fn create_booking(
        &self,
        user_email: &str,
        command: CreateBookingCommand,
    ) -> DomainResult<Booking> {
        let user = self.require_user(user_email).await?;

        let kind: ListingKind = command
            .booking_type
            .parse()
            .map_err(|_| BookingError::InvalidBookingType)?;
        let listing = self
            .find_listing(ListingRef::new(kind, command.entity_id))
            .await?;
        let host = self
            .user_repository
            .find_by_email(&normalize_email(listing.owner_email()))
            .await?
            .ok_or(BookingError::HostNotFound)?;

        if self.policy.reject_unavailable_listings && !listing.is_available() {
            return Err(DomainError::BusinessRule {
                message: format!("{} is not available for booking", kind.display_name()),
            });
        }

        if command.number_of_guests < 1 {
            return Err(ValidationError::OutOfRange {
                field: "numberOfGuests".to_string(),
                min: "1".to_string(),
                max: u32::MAX.to_string(),
            }
            .into());
        }

        let total_price = price_for(&listing, command.start_date, command.end_date)?;

        let booking = Booking::new(NewBooking {
            user_id: user.id,
            host_id: host.id,
            listing: listing.listing_ref(),
            start_date: command.start_date,
            end_date: command.end_date,
            number_of_guests: command.number_of_guests,
            total_price,
            special_requests: command
                .special_requests
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        });

        let booking = self.booking_repository.create_checked(booking).await?;
        tracing::info!(
            booking_id = %booking.id,
            kind = %kind,
            listing_id = %booking.listing.id,
            total_price = %booking.total_price,
            "Booking created"
        );

        Ok(booking)
    }

    /// Change a booking's status on behalf of the listing owner
    ///
    /// Confirming a property stay re-checks overlap against the other
    /// confirmed stays of that property.
    ///
    /// # Errors
    ///
    /// * `BookingError::BookingNotFound` - no such booking
    /// * `BookingError::NotOwner` - `acting_email` does not own the listing
    /// * `BookingError::InvalidStatus` - unparseable status
    /// * `BookingError::InvalidTransition` - only with strict transitions
    /// * `BookingError::BookingConflict` - confirming would double-book
    pub async fn update_status(
        &self,
        booking_id: Uuid,
        status: &str,
        acting_email: &str,
    ) -> DomainResult<Booking> {
        let booking = self.require_booking(booking_id).await?;
        let listing = self.find_listing(booking.listing).await?;
        self.require_owner(&listing, acting_email)?;

        let next: BookingStatus = status.parse().map_err(|_| BookingError::InvalidStatus)?;

        if self.policy.strict_transitions {
            booking.status.ensure_transition(next)?;
        }

        // The repository re-validates against the status it reads under lock
        let updated = self
            .booking_repository
            .update_status_checked(booking_id, next, self.policy.strict_transitions)
            .await?;
        tracing::info!(
            booking_id = %booking_id,
            from = %booking.status,
            to = %next,
            host = %mask_email(acting_email),
            "Booking status updated"
        );

        Ok(updated)
    }

    /// Bookings made by `user_email`, newest first
    pub async fn bookings_for_user(&self, user_email: &str) -> DomainResult<Vec<Booking>> {
        let user = self.require_user(user_email).await?;
        self.booking_repository.find_by_user(user.id).await
    }

    /// Bookings on any listing owned by `host_email`, newest first
    pub async fn bookings_for_host(&self, host_email: &str) -> DomainResult<Vec<Booking>> {
        let host = self
            .user_repository
            .find_by_email(&normalize_email(host_email))
            .await?
            .ok_or(BookingError::HostNotFound)?;
        self.booking_repository.find_by_host(host.id).await
    }

    /// Bookings of one property; only its host may look
    pub async fn bookings_for_property(
        &self,
        property_id: Uuid,
        acting_email: &str,
    ) -> DomainResult<Vec<Booking>> {
        let target = ListingRef::new(ListingKind::Property, property_id);
        let listing = self.find_listing(target).await?;
        self.require_owner(&listing, acting_email)?;

        self.booking_repository.find_by_listing(target).await
    }

    /// Delete a booking; allowed for the guest who made it and for the
    /// listing owner
    pub async fn delete_booking(&self, booking_id: Uuid, acting_email: &str) -> DomainResult<()> {
        let booking = self.require_booking(booking_id).await?;
        let acting_email = normalize_email(acting_email);

        let is_guest = self
            .user_repository
            .find_by_email(&acting_email)
            .await?
            .map_or(false, |u| u.id == booking.user_id);
        let is_owner = match self.listing_repository.find(booking.listing).await? {
            Some(listing) => normalize_email(listing.owner_email()) == acting_email,
            None => false,
        };

        if !is_guest && !is_owner {
            return Err(BookingError::NotOwner.into());
        }

        if !self.booking_repository.delete(booking_id).await? {
            return Err(BookingError::BookingNotFound.into());
        }
        tracing::info!(booking_id = %booking_id, by = %mask_email(&acting_email), "Booking deleted");

        Ok(())
    }

    async fn require_user(&self, email: &str) -> DomainResult<User> {
        self.user_repository
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or_else(|| BookingError::UserNotFound.into())
    }

    async fn require_booking(&self, id: Uuid) -> DomainResult<Booking> {
        self.booking_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| BookingError::BookingNotFound.into())
    }

    async fn find_listing(&self, target: ListingRef) -> DomainResult<Listing> {
        self.listing_repository
            .find(target)
            .await?
            .ok_or_else(|| {
                BookingError::EntityNotFound {
                    kind: target.kind.display_name().to_string(),
                }
                .into()
            })
    }

    fn require_owner(&self, listing: &Listing, acting_email: &str) -> DomainResult<()> {
        if normalize_email(listing.owner_email()) != normalize_email(acting_email) {
            tracing::warn!(
                listing_id = %listing.id(),
                acting = %mask_email(acting_email),
                "Rejected booking access by non-owner"
            );
            return Err(BookingError::NotOwner.into());
        }
        Ok(())
    }
}

/// Total price: nightly price times nights for a property, the flat price
/// for anything else
fn price_for(
    listing: &Listing,
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
) -> Result<Decimal, BookingError> {
    match listing.kind() {
        ListingKind::Property => {
            let (Some(start), Some(end)) = (start, end) else {
                return Err(BookingError::InvalidDateRange);
            };
            let nights = DateRange::new(start, end)?.nights();
            if nights < 1 {
                return Err(BookingError::InvalidDateRange);
            }
            Ok(listing.price() * Decimal::from(nights))
        }
        ListingKind::Service | ListingKind::Experience => {
            if let (Some(start), Some(end)) = (start, end) {
                DateRange::new(start, end)?;
            }
            Ok(listing.price())
        }
    }
}
