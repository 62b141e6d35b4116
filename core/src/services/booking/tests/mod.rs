//! Tests for booking service

#[cfg(test)]
mod mocks;
