//! Repository interfaces for persistence, each with an in-memory mock.

pub mod booking;
pub mod listing;
pub mod message;
pub mod user;
pub mod wishlist;

pub use booking::{BookingRepository, MockBookingRepository};
pub use listing::{ListingRepository, MockListingRepository};
pub use message::{MessageRepository, MockMessageRepository};
pub use user::{MockUserRepository, UserRepository};
pub use wishlist::{MockWishlistRepository, WishlistRepository};
