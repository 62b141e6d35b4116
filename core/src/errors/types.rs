//! Error types for authentication, identity tokens, bookings, listings,
//! wishlists and input validation.
//!
//! Messages here are safe to show to clients. The presentation layer maps
//! each variant to a status code and a stable error code.

use thiserror::Error;

/// Authentication and account workflow errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("No account is registered for this email")]
    AccountNotFound,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    DuplicateAccount,

    /// Wrong, missing or already consumed one-time code
    #[error("Invalid or already used code")]
    InvalidToken,

    /// The code matched but its validity window has passed
    #[error("Code has expired, request a new one")]
    TokenExpired,

    #[error("Email is already verified")]
    AlreadyVerified,

    #[error("Email must be verified first")]
    EmailNotVerified,

    #[error("Profile is already complete")]
    ProfileAlreadyComplete,

    #[error("Credential hashing failed: {reason}")]
    HashingFailed { reason: String },
}

/// Identity token errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is invalid")]
    TokenInvalid,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Signing key too short: {actual} bytes, need at least {min}")]
    KeyTooShort { min: usize, actual: usize },

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Booking workflow errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("User not found")]
    UserNotFound,

    #[error("Invalid booking type")]
    InvalidBookingType,

    #[error("{kind} not found")]
    EntityNotFound { kind: String },

    #[error("Host not found")]
    HostNotFound,

    #[error("Booking not found")]
    BookingNotFound,

    #[error("Invalid date range")]
    InvalidDateRange,

    #[error("Listing is already booked for the requested dates")]
    BookingConflict,

    #[error("You are not the owner of this listing")]
    NotOwner,

    #[error("Invalid booking status")]
    InvalidStatus,

    #[error("Cannot move booking from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

/// Listing management errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListingError {
    #[error("Invalid listing kind")]
    InvalidKind,

    #[error("{kind} not found")]
    NotFound { kind: String },

    #[error("You are not the owner of this listing")]
    NotOwner,

    #[error("Listing details do not match kind {expected}")]
    KindMismatch { expected: String },

    #[error("Listing has pending or confirmed bookings")]
    HasActiveBookings,
}

/// Wishlist errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WishlistError {
    #[error("Invalid item type")]
    InvalidItemType,

    #[error("{kind} not found")]
    EntityNotFound { kind: String },

    #[error("Item is already in the wishlist")]
    AlreadyInWishlist,
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Too short: {field} (min: {min})")]
    TooShort { field: String, min: usize },

    #[error("Too long: {field} (max: {max})")]
    TooLong { field: String, max: usize },

    #[error("Out of range: {field} (min: {min}, max: {max})")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    #[error("Invalid email")]
    InvalidEmail,
}
