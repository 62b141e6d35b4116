//! Listing repository trait.
//!
//! Search and filter queries live outside this service. Booking and wishlist
//! workflows look listings up by tagged reference; hosts manage their own.

use async_trait::async_trait;

use crate::domain::entities::listing::{Listing, ListingKind, ListingRef};
use crate::errors::DomainError;

#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Find the listing a tagged reference points at
    async fn find(&self, target: ListingRef) -> Result<Option<Listing>, DomainError>;

    async fn create(&self, listing: Listing) -> Result<Listing, DomainError>;

    /// Overwrite the stored listing with the same reference
    ///
    /// Gives `DomainError::NotFound` when no such listing exists.
    async fn update(&self, listing: Listing) -> Result<Listing, DomainError>;

    /// Remove a listing; returns whether a row existed
    async fn delete(&self, target: ListingRef) -> Result<bool, DomainError>;

    /// Listings of `kind` owned by `owner_email`, newest first
    async fn find_by_owner(
        &self,
        kind: ListingKind,
        owner_email: &str,
    ) -> Result<Vec<Listing>, DomainError>;
}
