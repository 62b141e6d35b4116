use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use stazy_core::domain::entities::booking::{Booking, BookingStatus};
use stazy_core::services::CreateBookingCommand;

fn default_guests() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub entity_id: Uuid,
    #[validate(length(min = 1, message = "is required"))]
    pub booking_type: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default = "default_guests")]
    pub number_of_guests: u32,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub special_requests: Option<String>,
}

impl From<CreateBookingRequest> for CreateBookingCommand {
    fn from(request: CreateBookingRequest) -> Self {
        Self {
            booking_type: request.booking_type,
            entity_id: request.entity_id,
            start_date: request.start_date,
            end_date: request.end_date,
            number_of_guests: request.number_of_guests,
            special_requests: request.special_requests,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    pub booking_id: Uuid,
    #[validate(length(min = 1, message = "is required"))]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub host_id: Uuid,
    pub booking_type: String,
    pub entity_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub number_of_guests: u32,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            user_id: booking.user_id,
            host_id: booking.host_id,
            booking_type: booking.listing.kind.as_str().to_string(),
            entity_id: booking.listing.id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            number_of_guests: booking.number_of_guests,
            total_price: booking.total_price,
            status: booking.status,
            special_requests: booking.special_requests,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}
