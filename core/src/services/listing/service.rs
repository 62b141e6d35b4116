//! Owner-gated listing management

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use stazy_shared::validation::{mask_email, normalize_email};

use crate::domain::entities::booking::BookingStatus;
use crate::domain::entities::listing::{Bookable, Listing, ListingKind, ListingRef};
use crate::errors::{DomainResult, ListingError};
use crate::repositories::{BookingRepository, ListingRepository};

use super::types::ListingDraft;

/// Create, replace, delete and toggle listings on behalf of their owner
pub struct ListingService<L, B>
where
    L: ListingRepository + ?Sized,
    B: BookingRepository + ?Sized,
{
    listing_repository: Arc<L>,
    booking_repository: Arc<B>,
}

impl<L, B> ListingService<L, B>
where
    L: ListingRepository + ?Sized,
    B: BookingRepository + ?Sized,
{
    pub fn new(listing_repository: Arc<L>, booking_repository: Arc<B>) -> Self {
        Self {
            listing_repository,
            booking_repository,
        }
    }

    /// Publish a new listing owned by `owner_email`
    ///
    /// New listings start available. The kind in `kind` must agree with the
    /// draft's details.
    ///
    /// # Errors
    ///
    /// * `ListingError::InvalidKind` - unknown listing kind
    /// * `ListingError::KindMismatch` - details belong to another kind
    /// * `ValidationError` - blank text, non-positive price or capacity
    pub async fn create(
        &self,
        owner_email: &str,
        kind: &str,
        draft: ListingDraft,
    ) -> DomainResult<Listing> {
        let kind = parse_kind(kind)?;
        check_draft(kind, &draft)?;

        let owner_email = normalize_email(owner_email);
        let listing = draft.into_listing(Uuid::new_v4(), owner_email, true, Utc::now());
        let listing = self.listing_repository.create(listing).await?;

        tracing::info!(
            kind = %listing.kind(),
            listing_id = %listing.id(),
            owner = %mask_email(listing.owner_email()),
            "Listing created"
        );
        Ok(listing)
    }

    /// Replace the listing's descriptive fields
    ///
    /// The id, owner, availability flag and creation time are kept.
    ///
    /// # Errors
    ///
    /// * `ListingError::NotFound` - no such listing
    /// * `ListingError::NotOwner` - `acting_email` does not own it
    pub async fn update(
        &self,
        acting_email: &str,
        kind: &str,
        id: Uuid,
        draft: ListingDraft,
    ) -> DomainResult<Listing> {
        let target = ListingRef::new(parse_kind(kind)?, id);
        check_draft(target.kind, &draft)?;
        let current = self.owned_listing(target, acting_email).await?;

        let listing = draft.into_listing(
            current.id(),
            current.owner_email().to_string(),
            current.is_available(),
            current.created_at(),
        );
        let listing = self.listing_repository.update(listing).await?;

        tracing::debug!(kind = %target.kind, listing_id = %target.id, "Listing updated");
        Ok(listing)
    }

    /// Flip whether the listing accepts bookings
    pub async fn toggle_availability(
        &self,
        acting_email: &str,
        kind: &str,
        id: Uuid,
    ) -> DomainResult<Listing> {
        let target = ListingRef::new(parse_kind(kind)?, id);
        let mut listing = self.owned_listing(target, acting_email).await?;

        let available = listing.toggle_availability();
        let listing = self.listing_repository.update(listing).await?;

        tracing::info!(
            kind = %target.kind,
            listing_id = %target.id,
            available,
            "Listing availability changed"
        );
        Ok(listing)
    }

    /// Remove a listing
    ///
    /// # Errors
    ///
    /// * `ListingError::NotFound` - no such listing
    /// * `ListingError::NotOwner` - `acting_email` does not own it
    /// * `ListingError::HasActiveBookings` - a PENDING or CONFIRMED booking
    ///   still points at the listing
    pub async fn delete(&self, acting_email: &str, kind: &str, id: Uuid) -> DomainResult<()> {
        let target = ListingRef::new(parse_kind(kind)?, id);
        self.owned_listing(target, acting_email).await?;

        let active = self
            .booking_repository
            .find_by_listing(target)
            .await?
            .iter()
            .any(|b| matches!(b.status, BookingStatus::Pending | BookingStatus::Confirmed));
        if active {
            return Err(ListingError::HasActiveBookings.into());
        }

        if !self.listing_repository.delete(target).await? {
            return Err(not_found(target.kind).into());
        }

        tracing::info!(kind = %target.kind, listing_id = %target.id, "Listing deleted");
        Ok(())
    }

    /// Every listing of `kind` the caller owns, newest first, including
    /// unavailable ones
    pub async fn owned_by(&self, owner_email: &str, kind: &str) -> DomainResult<Vec<Listing>> {
        let kind = parse_kind(kind)?;
        self.listing_repository
            .find_by_owner(kind, &normalize_email(owner_email))
            .await
    }

    async fn owned_listing(&self, target: ListingRef, acting_email: &str) -> DomainResult<Listing> {
        let listing = self
            .listing_repository
            .find(target)
            .await?
            .ok_or_else(|| not_found(target.kind))?;

        if normalize_email(listing.owner_email()) != normalize_email(acting_email) {
            tracing::warn!(
                listing_id = %target.id,
                acting = %mask_email(acting_email),
                "Rejected listing change by non-owner"
            );
            return Err(ListingError::NotOwner.into());
        }
        Ok(listing)
    }
}

fn parse_kind(kind: &str) -> Result<ListingKind, ListingError> {
    kind.parse().map_err(|_| ListingError::InvalidKind)
}

fn not_found(kind: ListingKind) -> ListingError {
    ListingError::NotFound {
        kind: kind.display_name().to_string(),
    }
}

fn check_draft(kind: ListingKind, draft: &ListingDraft) -> DomainResult<()> {
    if draft.kind() != kind {
        return Err(ListingError::KindMismatch {
            expected: kind.to_string(),
        }
        .into());
    }
    draft.validate()?;
    Ok(())
}
