//! Unit tests for domain entities

mod listing_tests;
mod user_tests;
