//! Saved listings per user

use std::sync::Arc;
use uuid::Uuid;

use stazy_shared::validation::{mask_email, normalize_email};

use crate::domain::entities::listing::{ListingKind, ListingRef};
use crate::domain::entities::wishlist::WishlistItem;
use crate::errors::{DomainResult, WishlistError};
use crate::repositories::{ListingRepository, WishlistRepository};

pub struct WishlistService<L, W>
where
    L: ListingRepository + ?Sized,
    W: WishlistRepository + ?Sized,
{
    listing_repository: Arc<L>,
    wishlist_repository: Arc<W>,
}

impl<L, W> WishlistService<L, W>
where
    L: ListingRepository + ?Sized,
    W: WishlistRepository + ?Sized,
{
    pub fn new(listing_repository: Arc<L>, wishlist_repository: Arc<W>) -> Self {
        Self {
            listing_repository,
            wishlist_repository,
        }
    }

    /// Save a listing to the user's wishlist
    ///
    /// # Errors
    ///
    /// * `WishlistError::InvalidItemType` - unknown listing kind
    /// * `WishlistError::EntityNotFound` - no such listing
    /// * `WishlistError::AlreadyInWishlist` - saved before
    pub async fn add(
        &self,
        user_email: &str,
        item_type: &str,
        entity_id: Uuid,
    ) -> DomainResult<WishlistItem> {
        let target = parse_target(item_type, entity_id)?;
        let user_email = normalize_email(user_email);

        if self.listing_repository.find(target).await?.is_none() {
            return Err(WishlistError::EntityNotFound {
                kind: target.kind.display_name().to_string(),
            }
            .into());
        }

        let item = self
            .wishlist_repository
            .add(WishlistItem::new(user_email, target))
            .await?;
        tracing::debug!(
            user = %mask_email(&item.user_email),
            kind = %target.kind,
            entity_id = %target.id,
            "Added to wishlist"
        );

        Ok(item)
    }

    /// Remove a listing; removing something not saved is not an error
    pub async fn remove(&self, user_email: &str, item_type: &str, entity_id: Uuid) -> DomainResult<()> {
        let target = parse_target(item_type, entity_id)?;
        self.wishlist_repository
            .remove(&normalize_email(user_email), target)
            .await?;
        Ok(())
    }

    /// Saved listings, newest first
    pub async fn list(&self, user_email: &str) -> DomainResult<Vec<WishlistItem>> {
        self.wishlist_repository
            .find_by_user(&normalize_email(user_email))
            .await
    }

    pub async fn count(&self, user_email: &str) -> DomainResult<u64> {
        self.wishlist_repository
            .count_by_user(&normalize_email(user_email))
            .await
    }

    pub async fn contains(
        &self,
        user_email: &str,
        item_type: &str,
        entity_id: Uuid,
    ) -> DomainResult<bool> {
        let target = parse_target(item_type, entity_id)?;
        self.wishlist_repository
            .exists(&normalize_email(user_email), target)
            .await
    }
}

fn parse_target(item_type: &str, entity_id: Uuid) -> Result<ListingRef, WishlistError> {
    let kind: ListingKind = item_type.parse().map_err(|_| WishlistError::InvalidItemType)?;
    Ok(ListingRef::new(kind, entity_id))
}
