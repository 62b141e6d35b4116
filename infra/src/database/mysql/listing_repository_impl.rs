//! MySQL implementation of the ListingRepository trait.
//!
//! Each listing kind has its own table; lookups dispatch on the kind of the
//! tagged reference, writes on the variant of the listing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use stazy_core::domain::entities::listing::{
    Bookable, Experience, Listing, ListingKind, ListingRef, Property, ServiceOffer,
};
use stazy_core::errors::DomainError;
use stazy_core::repositories::ListingRepository;

use super::{db_error, parse_uuid};

/// MySQL implementation of ListingRepository
pub struct MySqlListingRepository {
    pool: MySqlPool,
}

fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::MySql> + sqlx::Type<sqlx::MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    })
}

impl MySqlListingRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_property(row: &MySqlRow) -> Result<Property, DomainError> {
        let id: String = column(row, "id")?;
        Ok(Property {
            id: parse_uuid(&id, "properties.id")?,
            title: column(row, "title")?,
            description: column(row, "description")?,
            location: column(row, "location")?,
            price: column::<Decimal>(row, "price")?,
            weekend_price: column::<Option<Decimal>>(row, "weekend_price")?,
            category: column(row, "category")?,
            property_type: column(row, "property_type")?,
            max_guests: column::<u32>(row, "max_guests")?,
            host_email: column(row, "host_email")?,
            is_available: column(row, "is_available")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }

    fn row_to_service(row: &MySqlRow) -> Result<ServiceOffer, DomainError> {
        let id: String = column(row, "id")?;
        Ok(ServiceOffer {
            id: parse_uuid(&id, "service_offers.id")?,
            title: column(row, "title")?,
            description: column(row, "description")?,
            location: column(row, "location")?,
            price: column::<Decimal>(row, "price")?,
            duration_minutes: column::<u32>(row, "duration_minutes")?,
            provider_email: column(row, "provider_email")?,
            is_available: column(row, "is_available")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }

    fn row_to_experience(row: &MySqlRow) -> Result<Experience, DomainError> {
        let id: String = column(row, "id")?;
        Ok(Experience {
            id: parse_uuid(&id, "experiences.id")?,
            title: column(row, "title")?,
            description: column(row, "description")?,
            location: column(row, "location")?,
            price: column::<Decimal>(row, "price")?,
            duration_hours: column::<u32>(row, "duration_hours")?,
            host_email: column(row, "host_email")?,
            host_name: column(row, "host_name")?,
            max_participants: column::<u32>(row, "max_participants")?,
            is_available: column(row, "is_available")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }

    fn row_to_listing(kind: ListingKind, row: &MySqlRow) -> Result<Listing, DomainError> {
        Ok(match kind {
            ListingKind::Property => Listing::Property(Self::row_to_property(row)?),
            ListingKind::Service => Listing::Service(Self::row_to_service(row)?),
            ListingKind::Experience => Listing::Experience(Self::row_to_experience(row)?),
        })
    }

    /// Column naming the owner in the table for `kind`
    pub(crate) fn owner_column(kind: ListingKind) -> &'static str {
        match kind {
            ListingKind::Service => "provider_email",
            ListingKind::Property | ListingKind::Experience => "host_email",
        }
    }

    /// Table holding listings of `kind`
    pub(crate) fn table_for(kind: ListingKind) -> &'static str {
        match kind {
            ListingKind::Property => "properties",
            ListingKind::Service => "service_offers",
            ListingKind::Experience => "experiences",
        }
    }
}

#[async_trait]
impl ListingRepository for MySqlListingRepository {
    async fn find(&self, target: ListingRef) -> Result<Option<Listing>, DomainError> {
        let query = format!(
            "SELECT * FROM {} WHERE id = ? LIMIT 1",
            Self::table_for(target.kind)
        );

        let row = sqlx::query(&query)
            .bind(target.id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to load listing"))?;

        row.map(|row| Self::row_to_listing(target.kind, &row))
            .transpose()
    }

    async fn create(&self, listing: Listing) -> Result<Listing, DomainError> {
        let result = match &listing {
            Listing::Property(p) => {
                sqlx::query(
                    r#"
                    INSERT INTO properties (
                        id, title, description, location, price, weekend_price,
                        category, property_type, max_guests, host_email, is_available, created_at
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(p.id.to_string())
                .bind(&p.title)
                .bind(&p.description)
                .bind(&p.location)
                .bind(p.price)
                .bind(p.weekend_price)
                .bind(&p.category)
                .bind(&p.property_type)
                .bind(p.max_guests)
                .bind(&p.host_email)
                .bind(p.is_available)
                .bind(p.created_at)
                .execute(&self.pool)
                .await
            }
            Listing::Service(s) => {
                sqlx::query(
                    r#"
                    INSERT INTO service_offers (
                        id, title, description, location, price, duration_minutes,
                        provider_email, is_available, created_at
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(s.id.to_string())
                .bind(&s.title)
                .bind(&s.description)
                .bind(&s.location)
                .bind(s.price)
                .bind(s.duration_minutes)
                .bind(&s.provider_email)
                .bind(s.is_available)
                .bind(s.created_at)
                .execute(&self.pool)
                .await
            }
            Listing::Experience(e) => {
                sqlx::query(
                    r#"
                    INSERT INTO experiences (
                        id, title, description, location, price, duration_hours,
                        host_email, host_name, max_participants, is_available, created_at
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(e.id.to_string())
                .bind(&e.title)
                .bind(&e.description)
                .bind(&e.location)
                .bind(e.price)
                .bind(e.duration_hours)
                .bind(&e.host_email)
                .bind(&e.host_name)
                .bind(e.max_participants)
                .bind(e.is_available)
                .bind(e.created_at)
                .execute(&self.pool)
                .await
            }
        };

        result.map_err(db_error("Failed to create listing"))?;
        Ok(listing)
    }

    async fn update(&self, listing: Listing) -> Result<Listing, DomainError> {
        let result = match &listing {
            Listing::Property(p) => {
                sqlx::query(
                    r#"
                    UPDATE properties
                    SET title = ?, description = ?, location = ?, price = ?, weekend_price = ?,
                        category = ?, property_type = ?, max_guests = ?, is_available = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&p.title)
                .bind(&p.description)
                .bind(&p.location)
                .bind(p.price)
                .bind(p.weekend_price)
                .bind(&p.category)
                .bind(&p.property_type)
                .bind(p.max_guests)
                .bind(p.is_available)
                .bind(p.id.to_string())
                .execute(&self.pool)
                .await
            }
            Listing::Service(s) => {
                sqlx::query(
                    r#"
                    UPDATE service_offers
                    SET title = ?, description = ?, location = ?, price = ?,
                        duration_minutes = ?, is_available = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&s.title)
                .bind(&s.description)
                .bind(&s.location)
                .bind(s.price)
                .bind(s.duration_minutes)
                .bind(s.is_available)
                .bind(s.id.to_string())
                .execute(&self.pool)
                .await
            }
            Listing::Experience(e) => {
                sqlx::query(
                    r#"
                    UPDATE experiences
                    SET title = ?, description = ?, location = ?, price = ?, duration_hours = ?,
                        host_name = ?, max_participants = ?, is_available = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&e.title)
                .bind(&e.description)
                .bind(&e.location)
                .bind(e.price)
                .bind(e.duration_hours)
                .bind(&e.host_name)
                .bind(e.max_participants)
                .bind(e.is_available)
                .bind(e.id.to_string())
                .execute(&self.pool)
                .await
            }
        };

        let affected = result
            .map_err(db_error("Failed to update listing"))?
            .rows_affected();
        // Zero affected rows also covers an update that changed nothing
        if affected == 0 && self.find(listing.listing_ref()).await?.is_none() {
            return Err(DomainError::NotFound {
                resource: format!("{} {}", listing.kind().display_name(), listing.id()),
            });
        }
        Ok(listing)
    }

    async fn delete(&self, target: ListingRef) -> Result<bool, DomainError> {
        let query = format!("DELETE FROM {} WHERE id = ?", Self::table_for(target.kind));

        let result = sqlx::query(&query)
            .bind(target.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete listing"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_owner(
        &self,
        kind: ListingKind,
        owner_email: &str,
    ) -> Result<Vec<Listing>, DomainError> {
        let query = format!(
            "SELECT * FROM {} WHERE {} = ? ORDER BY created_at DESC",
            Self::table_for(kind),
            Self::owner_column(kind)
        );

        let rows = sqlx::query(&query)
            .bind(owner_email)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to load listings by owner"))?;

        rows.iter()
            .map(|row| Self::row_to_listing(kind, row))
            .collect()
    }
}
