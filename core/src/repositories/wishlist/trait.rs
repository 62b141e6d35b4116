//! Wishlist repository trait.

use async_trait::async_trait;

use crate::domain::entities::listing::ListingRef;
use crate::domain::entities::wishlist::WishlistItem;
use crate::errors::DomainError;

#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// # Errors
    /// * `WishlistError::AlreadyInWishlist` - the user already saved this listing
    async fn add(&self, item: WishlistItem) -> Result<WishlistItem, DomainError>;

    /// Returns whether an entry was removed
    async fn remove(&self, user_email: &str, target: ListingRef) -> Result<bool, DomainError>;

    /// Newest first
    async fn find_by_user(&self, user_email: &str) -> Result<Vec<WishlistItem>, DomainError>;

    async fn count_by_user(&self, user_email: &str) -> Result<u64, DomainError>;

    async fn exists(&self, user_email: &str, target: ListingRef) -> Result<bool, DomainError>;
}
