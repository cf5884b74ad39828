//! Tests for the reminder sweep
