use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use stazy_core::domain::entities::listing::{Bookable, Listing, ListingKind};
use stazy_core::services::{ListingDetails, ListingDraft};

use crate::handlers::ApiError;

/// Body of listing create and replace requests
///
/// Kind-specific fields are optional on the wire; the ones the path's kind
/// needs are checked in [`ListingRequest::into_draft`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListingRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1 to 200 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 5000, message = "must be at most 5000 characters"))]
    pub description: String,
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters"))]
    pub location: String,
    pub price: Decimal,
    pub weekend_price: Option<Decimal>,
    pub category: Option<String>,
    pub property_type: Option<String>,
    pub max_guests: Option<u32>,
    pub duration_minutes: Option<u32>,
    pub duration_hours: Option<u32>,
    pub host_name: Option<String>,
    pub max_participants: Option<u32>,
}

fn missing(field: &str) -> ApiError {
    ApiError::BadRequest {
        message: "Invalid request data".to_string(),
        fields: vec![(field.to_string(), "is required".to_string())],
    }
}

impl ListingRequest {
    /// Pick the fields `kind` uses; a missing one is a 400 naming it
    pub fn into_draft(self, kind: ListingKind) -> Result<ListingDraft, ApiError> {
        let details = match kind {
            ListingKind::Property => ListingDetails::Property {
                weekend_price: self.weekend_price,
                category: self.category.ok_or_else(|| missing("category"))?,
                property_type: self.property_type.ok_or_else(|| missing("propertyType"))?,
                max_guests: self.max_guests.ok_or_else(|| missing("maxGuests"))?,
            },
            ListingKind::Service => ListingDetails::Service {
                duration_minutes: self.duration_minutes.ok_or_else(|| missing("durationMinutes"))?,
            },
            ListingKind::Experience => ListingDetails::Experience {
                duration_hours: self.duration_hours.ok_or_else(|| missing("durationHours"))?,
                host_name: self.host_name.ok_or_else(|| missing("hostName"))?,
                max_participants: self.max_participants.ok_or_else(|| missing("maxParticipants"))?,
            },
        };

        Ok(ListingDraft {
            title: self.title,
            description: self.description,
            location: self.location,
            price: self.price,
            details,
        })
    }
}

/// A listing as returned to its owner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub id: Uuid,
    pub kind: ListingKind,
    pub title: String,
    pub description: String,
    pub location: String,
    pub price: Decimal,
    pub owner_email: String,
    pub is_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekend_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_guests: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_hours: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    pub created_at: DateTime<Utc>,
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        let mut response = Self {
            id: listing.id(),
            kind: listing.kind(),
            title: listing.title().to_string(),
            description: String::new(),
            location: listing.location().to_string(),
            price: listing.price(),
            owner_email: listing.owner_email().to_string(),
            is_available: listing.is_available(),
            weekend_price: None,
            category: None,
            property_type: None,
            max_guests: None,
            duration_minutes: None,
            duration_hours: None,
            host_name: None,
            max_participants: None,
            created_at: listing.created_at(),
        };

        match listing {
            Listing::Property(p) => {
                response.description = p.description;
                response.weekend_price = p.weekend_price;
                response.category = Some(p.category);
                response.property_type = Some(p.property_type);
                response.max_guests = Some(p.max_guests);
            }
            Listing::Service(s) => {
                response.description = s.description;
                response.duration_minutes = Some(s.duration_minutes);
            }
            Listing::Experience(e) => {
                response.description = e.description;
                response.duration_hours = Some(e.duration_hours);
                response.host_name = Some(e.host_name);
                response.max_participants = Some(e.max_participants);
            }
        }
        response
    }
}
