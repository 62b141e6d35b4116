//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod date_range;

pub use auth_response::{AuthResponse, UserProfile};
pub use date_range::DateRange;
