use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use stazy_core::domain::entities::wishlist::WishlistItem;

/// Body of `POST /wishlist/add`, also the query of remove and check
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WishlistTargetRequest {
    pub entity_id: Uuid,
    #[validate(length(min = 1, message = "is required"))]
    pub item_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItemResponse {
    pub id: Uuid,
    pub item_type: String,
    pub entity_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<WishlistItem> for WishlistItemResponse {
    fn from(item: WishlistItem) -> Self {
        Self {
            id: item.id,
            item_type: item.target.kind.as_str().to_string(),
            entity_id: item.target.id,
            created_at: item.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishlistCountResponse {
    pub count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistCheckResponse {
    pub in_wishlist: bool,
}
