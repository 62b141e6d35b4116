//! Input types for listing management

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::listing::{Experience, Listing, ListingKind, Property, ServiceOffer};
use crate::errors::ValidationError;

pub const MAX_TITLE_LENGTH: usize = 200;

/// Fields a host supplies when creating or replacing a listing
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    /// Nightly price for properties, flat price otherwise
    pub price: Decimal,
    pub details: ListingDetails,
}

/// Kind-specific part of a [`ListingDraft`]
#[derive(Debug, Clone, PartialEq)]
pub enum ListingDetails {
    Property {
        weekend_price: Option<Decimal>,
        category: String,
        property_type: String,
        max_guests: u32,
    },
    Service {
        duration_minutes: u32,
    },
    Experience {
        duration_hours: u32,
        host_name: String,
        max_participants: u32,
    },
}

impl ListingDetails {
    pub fn kind(&self) -> ListingKind {
        match self {
            ListingDetails::Property { .. } => ListingKind::Property,
            ListingDetails::Service { .. } => ListingKind::Service,
            ListingDetails::Experience { .. } => ListingKind::Experience,
        }
    }
}

fn required(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn positive(field: &str, value: u32) -> Result<(), ValidationError> {
    if value == 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "1".to_string(),
            max: u32::MAX.to_string(),
        });
    }
    Ok(())
}

fn positive_price(field: &str, value: Decimal) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: "0.01".to_string(),
            max: "unbounded".to_string(),
        });
    }
    Ok(())
}

impl ListingDraft {
    pub fn kind(&self) -> ListingKind {
        self.details.kind()
    }

    /// Check the draft before it is stored
    pub fn validate(&self) -> Result<(), ValidationError> {
        required("title", &self.title)?;
        if self.title.trim().chars().count() > MAX_TITLE_LENGTH {
            return Err(ValidationError::TooLong {
                field: "title".to_string(),
                max: MAX_TITLE_LENGTH,
            });
        }
        required("location", &self.location)?;
        positive_price("price", self.price)?;

        match &self.details {
            ListingDetails::Property {
                weekend_price,
                category,
                property_type,
                max_guests,
            } => {
                if let Some(weekend_price) = weekend_price {
                    positive_price("weekendPrice", *weekend_price)?;
                }
                required("category", category)?;
                required("propertyType", property_type)?;
                positive("maxGuests", *max_guests)
            }
            ListingDetails::Service { duration_minutes } => {
                positive("durationMinutes", *duration_minutes)
            }
            ListingDetails::Experience {
                duration_hours,
                host_name,
                max_participants,
            } => {
                positive("durationHours", *duration_hours)?;
                required("hostName", host_name)?;
                positive("maxParticipants", *max_participants)
            }
        }
    }

    /// Build the stored listing; text fields are trimmed
    pub(crate) fn into_listing(
        self,
        id: Uuid,
        owner_email: String,
        is_available: bool,
        created_at: DateTime<Utc>,
    ) -> Listing {
        let title = self.title.trim().to_string();
        let description = self.description.trim().to_string();
        let location = self.location.trim().to_string();

        match self.details {
            ListingDetails::Property {
                weekend_price,
                category,
                property_type,
                max_guests,
            } => Listing::Property(Property {
                id,
                title,
                description,
                location,
                price: self.price,
                weekend_price,
                category: category.trim().to_string(),
                property_type: property_type.trim().to_string(),
                max_guests,
                host_email: owner_email,
                is_available,
                created_at,
            }),
            ListingDetails::Service { duration_minutes } => Listing::Service(ServiceOffer {
                id,
                title,
                description,
                location,
                price: self.price,
                duration_minutes,
                provider_email: owner_email,
                is_available,
                created_at,
            }),
            ListingDetails::Experience {
                duration_hours,
                host_name,
                max_participants,
            } => Listing::Experience(Experience {
                id,
                title,
                description,
                location,
                price: self.price,
                duration_hours,
                host_email: owner_email,
                host_name: host_name.trim().to_string(),
                max_participants,
                is_available,
                created_at,
            }),
        }
    }
}
