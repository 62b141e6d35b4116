//! Wishlist entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::listing::ListingRef;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: Uuid,
    pub user_email: String,
    pub target: ListingRef,
    pub created_at: DateTime<Utc>,
}

impl WishlistItem {
    pub fn new(user_email: String, target: ListingRef) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_email,
            target,
            created_at: Utc::now(),
        }
    }
}
