//! Conversion of domain errors into HTTP responses
//!
//! Every failure leaving a handler goes through [`ApiError`], so clients
//! always receive an [`ErrorResponse`] body with a stable snake_case code.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use stazy_core::errors::{
    AuthError, BookingError, DomainError, ListingError, TokenError, ValidationError,
    WishlistError,
};
use stazy_shared::errors::{error_codes, ErrorResponse};

const GENERIC_SERVER_ERROR: &str = "An internal error occurred";

/// Error type returned by every handler
#[derive(Debug)]
pub enum ApiError {
    /// A typed failure from the core services
    Domain(DomainError),
    /// Malformed or invalid request data caught before reaching a service
    BadRequest {
        message: String,
        fields: Vec<(String, String)>,
    },
    /// Missing bearer token on a protected route
    MissingToken,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Stable error code sent to clients
    pub fn code(&self) -> &'static str {
        self.classify().1
    }

    /// Status code and error code for this failure
    fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Domain(error) => classify_domain(error),
            ApiError::BadRequest { .. } => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
            ApiError::MissingToken => (StatusCode::UNAUTHORIZED, error_codes::UNAUTHORIZED),
        }
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::Domain(error) => match error {
                DomainError::Internal { .. }
                | DomainError::Auth(AuthError::HashingFailed { .. })
                | DomainError::Token(TokenError::KeyTooShort { .. })
                | DomainError::Token(TokenError::TokenGenerationFailed) => {
                    GENERIC_SERVER_ERROR.to_string()
                }
                other => other.to_string(),
            },
            ApiError::BadRequest { message, .. } => message.clone(),
            ApiError::MissingToken => "Missing or invalid Authorization header".to_string(),
        }
    }
}

fn classify_domain(error: &DomainError) -> (StatusCode, &'static str) {
    use error_codes::*;

    match error {
        DomainError::Validation { .. } | DomainError::ValidationErr(_) => {
            (StatusCode::BAD_REQUEST, VALIDATION_ERROR)
        }
        DomainError::BusinessRule { .. } => (StatusCode::BAD_REQUEST, BUSINESS_RULE),
        DomainError::NotFound { .. } => (StatusCode::NOT_FOUND, NOT_FOUND),
        DomainError::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED),
        DomainError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR),

        DomainError::Auth(auth) => match auth {
            AuthError::AccountNotFound => (StatusCode::NOT_FOUND, ACCOUNT_NOT_FOUND),
            AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS),
            AuthError::DuplicateAccount => (StatusCode::CONFLICT, DUPLICATE_ACCOUNT),
            AuthError::InvalidToken => (StatusCode::BAD_REQUEST, INVALID_CODE),
            AuthError::TokenExpired => (StatusCode::BAD_REQUEST, CODE_EXPIRED),
            AuthError::AlreadyVerified => (StatusCode::CONFLICT, ALREADY_VERIFIED),
            AuthError::EmailNotVerified => (StatusCode::FORBIDDEN, EMAIL_NOT_VERIFIED),
            AuthError::ProfileAlreadyComplete => (StatusCode::CONFLICT, PROFILE_ALREADY_COMPLETE),
            AuthError::HashingFailed { .. } => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR),
        },

        DomainError::Token(token) => match token {
            TokenError::TokenInvalid => (StatusCode::UNAUTHORIZED, TOKEN_INVALID),
            TokenError::TokenExpired => (StatusCode::UNAUTHORIZED, TOKEN_EXPIRED),
            TokenError::KeyTooShort { .. } | TokenError::TokenGenerationFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
            }
        },

        DomainError::Booking(booking) => match booking {
            BookingError::UserNotFound => (StatusCode::NOT_FOUND, USER_NOT_FOUND),
            BookingError::InvalidBookingType => (StatusCode::BAD_REQUEST, INVALID_BOOKING_TYPE),
            BookingError::EntityNotFound { .. } => (StatusCode::NOT_FOUND, ENTITY_NOT_FOUND),
            BookingError::HostNotFound => (StatusCode::NOT_FOUND, HOST_NOT_FOUND),
            BookingError::BookingNotFound => (StatusCode::NOT_FOUND, BOOKING_NOT_FOUND),
            BookingError::InvalidDateRange => (StatusCode::BAD_REQUEST, INVALID_DATE_RANGE),
            BookingError::BookingConflict => (StatusCode::CONFLICT, BOOKING_CONFLICT),
            BookingError::NotOwner => (StatusCode::FORBIDDEN, NOT_OWNER),
            BookingError::InvalidStatus => (StatusCode::BAD_REQUEST, INVALID_STATUS),
            BookingError::InvalidTransition { .. } => (StatusCode::BAD_REQUEST, INVALID_TRANSITION),
        },

        DomainError::Listing(listing) => match listing {
            ListingError::InvalidKind => (StatusCode::BAD_REQUEST, INVALID_LISTING_KIND),
            ListingError::NotFound { .. } => (StatusCode::NOT_FOUND, ENTITY_NOT_FOUND),
            ListingError::NotOwner => (StatusCode::FORBIDDEN, NOT_OWNER),
            ListingError::KindMismatch { .. } => (StatusCode::BAD_REQUEST, LISTING_KIND_MISMATCH),
            ListingError::HasActiveBookings => (StatusCode::CONFLICT, LISTING_HAS_ACTIVE_BOOKINGS),
        },

        DomainError::Wishlist(wishlist) => match wishlist {
            WishlistError::InvalidItemType => (StatusCode::BAD_REQUEST, INVALID_ITEM_TYPE),
            WishlistError::EntityNotFound { .. } => (StatusCode::NOT_FOUND, ENTITY_NOT_FOUND),
            WishlistError::AlreadyInWishlist => (StatusCode::CONFLICT, ALREADY_IN_WISHLIST),
        },
    }
}

/// Field named by a validation failure, if any
fn validation_field(error: &DomainError) -> Option<&str> {
    match error {
        DomainError::ValidationErr(
            ValidationError::RequiredField { field }
            | ValidationError::InvalidFormat { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. },
        ) => Some(field.as_str()),
        DomainError::ValidationErr(ValidationError::InvalidEmail) => Some("email"),
        _ => None,
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Domain(error) => write!(f, "{}", error),
            ApiError::BadRequest { message, .. } => write!(f, "{}", message),
            ApiError::MissingToken => write!(f, "missing bearer token"),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        ApiError::Domain(error)
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        ApiError::Domain(error.into())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.classify().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, code) = self.classify();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed with an internal error");
        } else {
            tracing::debug!(error = %self, code, "Request rejected");
        }

        let mut body = ErrorResponse::new(code, self.client_message());
        match self {
            ApiError::Domain(error) => {
                if let Some(field) = validation_field(error) {
                    body = body.add_detail("field", field);
                }
            }
            ApiError::BadRequest { fields, .. } if !fields.is_empty() => {
                for (field, reason) in fields {
                    body = body.add_detail(field.clone(), reason);
                }
            }
            _ => {}
        }

        HttpResponse::build(status).json(body)
    }
}
