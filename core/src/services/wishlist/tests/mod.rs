//! Tests for wishlist service

#[cfg(test)]
mod service_tests;
