//! MySQL implementation of the WishlistRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use stazy_core::domain::entities::listing::{ListingKind, ListingRef};
use stazy_core::domain::entities::wishlist::WishlistItem;
use stazy_core::errors::{DomainError, WishlistError};
use stazy_core::repositories::WishlistRepository;

use super::{db_error, is_unique_violation, parse_uuid};

/// MySQL implementation of WishlistRepository
///
/// `(user_email, item_kind, item_id)` is unique in `wishlist_items`.
pub struct MySqlWishlistRepository {
    pool: MySqlPool,
}

impl MySqlWishlistRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_item(row: &MySqlRow) -> Result<WishlistItem, DomainError> {
        let get_err = |column: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", column, e),
        };

        let id: String = row.try_get("id").map_err(|e| get_err("id", e))?;
        let kind: String = row.try_get("item_kind").map_err(|e| get_err("item_kind", e))?;
        let item_id: String = row.try_get("item_id").map_err(|e| get_err("item_id", e))?;
        let kind: ListingKind = kind
            .parse()
            .map_err(|e: String| DomainError::Internal { message: e })?;

        Ok(WishlistItem {
            id: parse_uuid(&id, "wishlist_items.id")?,
            user_email: row.try_get("user_email").map_err(|e| get_err("user_email", e))?,
            target: ListingRef::new(kind, parse_uuid(&item_id, "wishlist_items.item_id")?),
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| get_err("created_at", e))?,
        })
    }
}

#[async_trait]
impl WishlistRepository for MySqlWishlistRepository {
    async fn add(&self, item: WishlistItem) -> Result<WishlistItem, DomainError> {
        let result = sqlx::query(
            "INSERT INTO wishlist_items (id, user_email, item_kind, item_id, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(item.id.to_string())
        .bind(&item.user_email)
        .bind(item.target.kind.as_str())
        .bind(item.target.id.to_string())
        .bind(item.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(item),
            Err(e) if is_unique_violation(&e) => Err(WishlistError::AlreadyInWishlist.into()),
            Err(e) => Err(db_error("Failed to add wishlist item")(e)),
        }
    }

    async fn remove(&self, user_email: &str, target: ListingRef) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "DELETE FROM wishlist_items WHERE user_email = ? AND item_kind = ? AND item_id = ?",
        )
        .bind(user_email)
        .bind(target.kind.as_str())
        .bind(target.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to remove wishlist item"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_user(&self, user_email: &str) -> Result<Vec<WishlistItem>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_email, item_kind, item_id, created_at
            FROM wishlist_items
            WHERE user_email = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_email)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list wishlist"))?;

        rows.iter().map(Self::row_to_item).collect()
    }

    async fn count_by_user(&self, user_email: &str) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM wishlist_items WHERE user_email = ?")
            .bind(user_email)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to count wishlist"))?;

        let total: i64 = row
            .try_get("total")
            .map_err(db_error("Failed to read wishlist count"))?;
        Ok(total.max(0) as u64)
    }

    async fn exists(&self, user_email: &str, target: ListingRef) -> Result<bool, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total FROM wishlist_items
            WHERE user_email = ? AND item_kind = ? AND item_id = ?
            "#,
        )
        .bind(user_email)
        .bind(target.kind.as_str())
        .bind(target.id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to check wishlist"))?;

        let total: i64 = row
            .try_get("total")
            .map_err(db_error("Failed to read wishlist count"))?;
        Ok(total > 0)
    }
}
