//! # Stazy Core
//!
//! Core business logic and domain layer for the Stazy backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience. Submodule names overlap
// across layers (`booking`, `listing`, ...), so items are listed explicitly.
pub use domain::{
    AuthResponse, Bookable, Booking, BookingStatus, ChatMessage, Claims, DateRange, Experience,
    Listing, ListingKind, ListingRef, NewBooking, OneTimeCode, Property, ServiceOffer, User,
    UserProfile, WishlistItem,
};
pub use errors::{
    AuthError, BookingError, DomainError, DomainResult, ListingError, TokenError,
    ValidationError, WishlistError,
};
pub use repositories::{
    BookingRepository, ListingRepository, MessageRepository, UserRepository, WishlistRepository,
};
pub use services::{
    AuthService, AuthServiceConfig, BookingPolicy, BookingService, ChatHub, ChatService,
    CreateBookingCommand, CredentialHasher, CredentialHasherConfig, ListingDetails, ListingDraft,
    ListingService, MailServiceTrait, TokenService, TokenServiceConfig, WishlistService,
};
