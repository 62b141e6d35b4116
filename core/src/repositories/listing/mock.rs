//! Mock implementation of ListingRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::listing::{Bookable, Listing, ListingKind, ListingRef};
use crate::errors::DomainError;

use super::trait_::ListingRepository;

#[derive(Clone, Default)]
pub struct MockListingRepository {
    listings: Arc<RwLock<HashMap<ListingRef, Listing>>>,
}

impl MockListingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListingRepository for MockListingRepository {
    async fn find(&self, target: ListingRef) -> Result<Option<Listing>, DomainError> {
        let listings = self.listings.read().await;
        Ok(listings.get(&target).cloned())
    }

    async fn create(&self, listing: Listing) -> Result<Listing, DomainError> {
        let mut listings = self.listings.write().await;
        listings.insert(listing.listing_ref(), listing.clone());
        Ok(listing)
    }

    async fn update(&self, listing: Listing) -> Result<Listing, DomainError> {
        let mut listings = self.listings.write().await;
        match listings.get_mut(&listing.listing_ref()) {
            Some(stored) => {
                *stored = listing.clone();
                Ok(listing)
            }
            None => Err(DomainError::NotFound {
                resource: format!("{} {}", listing.kind().display_name(), listing.id()),
            }),
        }
    }

    async fn delete(&self, target: ListingRef) -> Result<bool, DomainError> {
        let mut listings = self.listings.write().await;
        Ok(listings.remove(&target).is_some())
    }

    async fn find_by_owner(
        &self,
        kind: ListingKind,
        owner_email: &str,
    ) -> Result<Vec<Listing>, DomainError> {
        let listings = self.listings.read().await;
        let mut owned: Vec<Listing> = listings
            .values()
            .filter(|l| l.kind() == kind && l.owner_email().eq_ignore_ascii_case(owner_email))
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(owned)
    }
}
