//! Tests for the booking repository mock
