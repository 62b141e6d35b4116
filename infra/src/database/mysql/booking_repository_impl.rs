//! MySQL implementation of the BookingRepository trait.
//!
//! Guarded writes lock the property row (`SELECT ... FOR UPDATE`) as their
//! first statement, then look for overlapping CONFIRMED stays with a
//! locking read. Concurrent creates and confirmations for one property are
//! serialized by the database, and each sees the others' committed rows.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, Row, Transaction};
use uuid::Uuid;

use stazy_core::domain::entities::booking::{Booking, BookingStatus};
use stazy_core::domain::entities::listing::{ListingKind, ListingRef};
use stazy_core::domain::value_objects::DateRange;
use stazy_core::errors::{BookingError, DomainError};
use stazy_core::repositories::BookingRepository;

use super::{db_error, parse_uuid};

const BOOKING_COLUMNS: &str = r#"
    id, user_id, host_id, listing_kind, listing_id, start_date, end_date,
    number_of_guests, total_price, status, special_requests, created_at, updated_at
"#;

/// MySQL implementation of BookingRepository
pub struct MySqlBookingRepository {
    pool: MySqlPool,
}

impl MySqlBookingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Booking entity
    fn row_to_booking(row: &MySqlRow) -> Result<Booking, DomainError> {
        let get_err = |column: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", column, e),
        };

        let id: String = row.try_get("id").map_err(|e| get_err("id", e))?;
        let user_id: String = row.try_get("user_id").map_err(|e| get_err("user_id", e))?;
        let host_id: String = row.try_get("host_id").map_err(|e| get_err("host_id", e))?;
        let listing_kind: String = row
            .try_get("listing_kind")
            .map_err(|e| get_err("listing_kind", e))?;
        let listing_id: String = row
            .try_get("listing_id")
            .map_err(|e| get_err("listing_id", e))?;
        let status: String = row.try_get("status").map_err(|e| get_err("status", e))?;

        Ok(Booking {
            id: parse_uuid(&id, "bookings.id")?,
            user_id: parse_uuid(&user_id, "bookings.user_id")?,
            host_id: parse_uuid(&host_id, "bookings.host_id")?,
            listing: ListingRef::new(
                parse_kind(&listing_kind)?,
                parse_uuid(&listing_id, "bookings.listing_id")?,
            ),
            start_date: row
                .try_get::<Option<NaiveDate>, _>("start_date")
                .map_err(|e| get_err("start_date", e))?,
            end_date: row
                .try_get::<Option<NaiveDate>, _>("end_date")
                .map_err(|e| get_err("end_date", e))?,
            number_of_guests: row
                .try_get::<u32, _>("number_of_guests")
                .map_err(|e| get_err("number_of_guests", e))?,
            total_price: row
                .try_get::<Decimal, _>("total_price")
                .map_err(|e| get_err("total_price", e))?,
            status: parse_status(&status)?,
            special_requests: row
                .try_get("special_requests")
                .map_err(|e| get_err("special_requests", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| get_err("created_at", e))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| get_err("updated_at", e))?,
        })
    }

    /// Lock the property row; every guarded write on one property queues here
    async fn lock_property(
        tx: &mut Transaction<'_, MySql>,
        property_id: Uuid,
    ) -> Result<(), DomainError> {
        sqlx::query("SELECT id FROM properties WHERE id = ? FOR UPDATE")
            .bind(property_id.to_string())
            .fetch_optional(&mut **tx)
            .await
            .map_err(db_error("Failed to lock property"))?;
        Ok(())
    }

    /// Look for a CONFIRMED stay overlapping `range`, ignoring booking
    /// `exclude`. A locking read, so it sees rows committed after the
    /// transaction's snapshot.
    async fn has_conflict(
        tx: &mut Transaction<'_, MySql>,
        property_id: Uuid,
        range: &DateRange,
        exclude: Uuid,
    ) -> Result<bool, DomainError> {
        let query = r#"
            SELECT COUNT(*) AS conflicts
            FROM bookings
            WHERE listing_kind = 'PROPERTY'
                AND listing_id = ?
                AND status = 'CONFIRMED'
                AND id <> ?
                AND start_date <= ?
                AND end_date >= ?
            FOR SHARE
        "#;

        let row = sqlx::query(query)
            .bind(property_id.to_string())
            .bind(exclude.to_string())
            .bind(range.end())
            .bind(range.start())
            .fetch_one(&mut **tx)
            .await
            .map_err(db_error("Failed to check booking overlap"))?;

        let conflicts: i64 = row
            .try_get("conflicts")
            .map_err(db_error("Failed to read overlap count"))?;
        Ok(conflicts > 0)
    }

    async fn find_many(&self, filter: &str, values: &[String]) -> Result<Vec<Booking>, DomainError> {
        let query = format!(
            "SELECT {} FROM bookings WHERE {} ORDER BY created_at DESC",
            BOOKING_COLUMNS, filter
        );

        let mut q = sqlx::query(&query);
        for value in values {
            q = q.bind(value);
        }

        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list bookings"))?;

        rows.iter().map(Self::row_to_booking).collect()
    }
}

fn parse_kind(value: &str) -> Result<ListingKind, DomainError> {
    value.parse().map_err(|e: String| DomainError::Internal { message: e })
}

fn parse_status(value: &str) -> Result<BookingStatus, DomainError> {
    value.parse().map_err(|e: String| DomainError::Internal { message: e })
}

#[async_trait]
impl BookingRepository for MySqlBookingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>, DomainError> {
        let query = format!("SELECT {} FROM bookings WHERE id = ? LIMIT 1", BOOKING_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to load booking"))?;

        row.as_ref().map(Self::row_to_booking).transpose()
    }

    async fn create_checked(&self, booking: Booking) -> Result<Booking, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        if let Some(range) = booking.blocking_range() {
            Self::lock_property(&mut tx, booking.listing.id).await?;
            if Self::has_conflict(&mut tx, booking.listing.id, &range, booking.id).await? {
                return Err(BookingError::BookingConflict.into());
            }
        }

        let query = r#"
            INSERT INTO bookings (
                id, user_id, host_id, listing_kind, listing_id, start_date, end_date,
                number_of_guests, total_price, status, special_requests, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(booking.id.to_string())
            .bind(booking.user_id.to_string())
            .bind(booking.host_id.to_string())
            .bind(booking.listing.kind.as_str())
            .bind(booking.listing.id.to_string())
            .bind(booking.start_date)
            .bind(booking.end_date)
            .bind(booking.number_of_guests)
            .bind(booking.total_price)
            .bind(booking.status.as_str())
            .bind(&booking.special_requests)
            .bind(booking.created_at)
            .bind(booking.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to create booking"))?;

        tx.commit().await.map_err(db_error("Failed to commit booking"))?;

        Ok(booking)
    }

    async fn update_status_checked(
        &self,
        id: Uuid,
        status: BookingStatus,
        enforce_transitions: bool,
    ) -> Result<Booking, DomainError> {
        // The listing a booking points at never changes, so it can be read
        // before the transaction to learn which property row to lock first
        let target: Option<(String, String)> =
            sqlx::query_as("SELECT listing_kind, listing_id FROM bookings WHERE id = ?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error("Failed to load booking"))?;
        let (kind, listing_id) = target.ok_or(BookingError::BookingNotFound)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        if parse_kind(&kind)? == ListingKind::Property {
            Self::lock_property(&mut tx, parse_uuid(&listing_id, "bookings.listing_id")?).await?;
        }

        let query = format!(
            "SELECT {} FROM bookings WHERE id = ? LIMIT 1 FOR UPDATE",
            BOOKING_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error("Failed to load booking"))?
            .ok_or(BookingError::BookingNotFound)?;
        let mut booking = Self::row_to_booking(&row)?;

        if enforce_transitions {
            booking.status.ensure_transition(status)?;
        }

        if status == BookingStatus::Confirmed {
            if let Some(range) = booking.blocking_range() {
                if Self::has_conflict(&mut tx, booking.listing.id, &range, booking.id).await? {
                    return Err(BookingError::BookingConflict.into());
                }
            }
        }

        booking.set_status(status);
        sqlx::query("UPDATE bookings SET status = ?, updated_at = ? WHERE id = ?")
            .bind(booking.status.as_str())
            .bind(booking.updated_at)
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to update booking status"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit status update"))?;

        Ok(booking)
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        self.find_many("user_id = ?", &[user_id.to_string()]).await
    }

    async fn find_by_host(&self, host_id: Uuid) -> Result<Vec<Booking>, DomainError> {
        self.find_many("host_id = ?", &[host_id.to_string()]).await
    }

    async fn find_by_listing(&self, target: ListingRef) -> Result<Vec<Booking>, DomainError> {
        self.find_many(
            "listing_kind = ? AND listing_id = ?",
            &[target.kind.as_str().to_string(), target.id.to_string()],
        )
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete booking"))?;

        Ok(result.rows_affected() > 0)
    }
}
