//! Domain entities representing core business objects.

pub mod booking;
pub mod listing;
pub mod message;
pub mod token;
pub mod user;
pub mod wishlist;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use booking::{Booking, BookingStatus, NewBooking};
pub use listing::{Bookable, Experience, Listing, ListingKind, ListingRef, Property, ServiceOffer};
pub use message::ChatMessage;
pub use token::Claims;
pub use user::{OneTimeCode, User};
pub use wishlist::WishlistItem;
