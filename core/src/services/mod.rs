//! Business services containing domain logic and use cases.

pub mod auth;
pub mod booking;
pub mod chat;
pub mod credential;
pub mod listing;
pub mod mail;
pub mod token;
pub mod wishlist;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig};
pub use booking::{BookingPolicy, BookingService, CreateBookingCommand};
pub use chat::{ChatHub, ChatService};
pub use credential::{CredentialHasher, CredentialHasherConfig};
pub use listing::{ListingDetails, ListingDraft, ListingService};
pub use mail::{MailServiceTrait, MockMailService};
pub use token::{TokenService, TokenServiceConfig};
pub use wishlist::WishlistService;
