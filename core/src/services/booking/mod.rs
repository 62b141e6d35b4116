//! Booking service module
//!
//! Resolves the booked listing across the three listing kinds, prices the
//! booking, and gates status changes on listing ownership. Overlap checks
//! for property stays run inside the repository's guarded writes.

mod config;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::BookingPolicy;
pub use service::BookingService;
pub use types::CreateBookingCommand;
