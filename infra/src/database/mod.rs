//! Database module - MySQL implementations using SQLx
//!
//! This module provides database access layer implementations including:
//! - Connection pool management
//! - Repository implementations for every core repository trait
//! - Transaction support
//! - Database migrations

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{
    MySqlBookingRepository, MySqlListingRepository, MySqlMessageRepository, MySqlUserRepository,
    MySqlWishlistRepository,
};
