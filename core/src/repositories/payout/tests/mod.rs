//! Tests for the payout repository mock
