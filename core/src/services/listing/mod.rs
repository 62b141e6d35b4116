//! Listing management service module
//!
//! Hosts and providers create and maintain their own listings. Every write
//! is gated on the caller owning the listing.

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::ListingService;
pub use types::{ListingDetails, ListingDraft};
