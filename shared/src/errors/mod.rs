//! Shared error response structure and error codes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_details(mut self, details: HashMap<String, serde_json::Value>) -> Self {
        self.details = Some(details);
        self
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes shared by the API and its clients
pub mod error_codes {
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const NOT_FOUND: &str = "not_found";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const FORBIDDEN: &str = "forbidden";
    pub const INTERNAL_ERROR: &str = "internal_error";
    pub const TOKEN_INVALID: &str = "token_invalid";
    pub const TOKEN_EXPIRED: &str = "token_expired";
    pub const ACCOUNT_NOT_FOUND: &str = "account_not_found";
    pub const INVALID_CREDENTIALS: &str = "invalid_credentials";
    pub const DUPLICATE_ACCOUNT: &str = "duplicate_account";
    pub const INVALID_CODE: &str = "invalid_code";
    pub const CODE_EXPIRED: &str = "code_expired";
    pub const ALREADY_VERIFIED: &str = "already_verified";
    pub const EMAIL_NOT_VERIFIED: &str = "email_not_verified";
    pub const PROFILE_ALREADY_COMPLETE: &str = "profile_already_complete";
    pub const USER_NOT_FOUND: &str = "user_not_found";
    pub const HOST_NOT_FOUND: &str = "host_not_found";
    pub const ENTITY_NOT_FOUND: &str = "entity_not_found";
    pub const BOOKING_NOT_FOUND: &str = "booking_not_found";
    pub const INVALID_BOOKING_TYPE: &str = "invalid_booking_type";
    pub const INVALID_STATUS: &str = "invalid_status";
    pub const INVALID_TRANSITION: &str = "invalid_transition";
    pub const INVALID_DATE_RANGE: &str = "invalid_date_range";
    pub const BOOKING_CONFLICT: &str = "booking_conflict";
    pub const NOT_OWNER: &str = "not_owner";
    pub const INVALID_LISTING_KIND: &str = "invalid_listing_kind";
    pub const LISTING_KIND_MISMATCH: &str = "listing_kind_mismatch";
    pub const LISTING_HAS_ACTIVE_BOOKINGS: &str = "listing_has_active_bookings";
    pub const INVALID_ITEM_TYPE: &str = "invalid_item_type";
    pub const ALREADY_IN_WISHLIST: &str = "already_in_wishlist";
    pub const BUSINESS_RULE: &str = "business_rule_violation";
}
