//! Tests for listing service
