//! Tests for chat service
