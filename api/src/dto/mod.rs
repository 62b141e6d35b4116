//! Request and response bodies
//!
//! Field names are camelCase on the wire.

pub mod auth;
pub mod booking;
pub mod chat;
pub mod listing;
pub mod wishlist;
