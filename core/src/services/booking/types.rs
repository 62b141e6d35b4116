//! Input types for the booking service

use chrono::NaiveDate;
use uuid::Uuid;

/// Already-parsed booking request
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    /// PROPERTY, SERVICE or EXPERIENCE (case-insensitive)
    pub booking_type: String,
    pub entity_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub number_of_guests: u32,
    pub special_requests: Option<String>,
}
