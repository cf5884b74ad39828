//! Tests for the wallet repository mock

#[cfg(test)]
mod mock_tests;
