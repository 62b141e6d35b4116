//! Mock implementation of WishlistRepository for testing

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::listing::ListingRef;
use crate::domain::entities::wishlist::WishlistItem;
use crate::errors::{DomainError, WishlistError};

use super::trait_::WishlistRepository;

#[derive(Clone, Default)]
pub struct MockWishlistRepository {
    items: Arc<RwLock<Vec<WishlistItem>>>,
}

impl MockWishlistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WishlistRepository for MockWishlistRepository {
    async fn add(&self, item: WishlistItem) -> Result<WishlistItem, DomainError> {
        let mut items = self.items.write().await;

        if items
            .iter()
            .any(|i| i.user_email == item.user_email && i.target == item.target)
        {
            return Err(WishlistError::AlreadyInWishlist.into());
        }

        items.push(item.clone());
        Ok(item)
    }

    async fn remove(&self, user_email: &str, target: ListingRef) -> Result<bool, DomainError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| !(i.user_email == user_email && i.target == target));
        Ok(items.len() != before)
    }

    async fn find_by_user(&self, user_email: &str) -> Result<Vec<WishlistItem>, DomainError> {
        let items = self.items.read().await;
        let mut found: Vec<WishlistItem> = items
            .iter()
            .filter(|i| i.user_email == user_email)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn count_by_user(&self, user_email: &str) -> Result<u64, DomainError> {
        let items = self.items.read().await;
        Ok(items.iter().filter(|i| i.user_email == user_email).count() as u64)
    }

    async fn exists(&self, user_email: &str, target: ListingRef) -> Result<bool, DomainError> {
        let items = self.items.read().await;
        Ok(items
            .iter()
            .any(|i| i.user_email == user_email && i.target == target))
    }
}
