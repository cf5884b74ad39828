//! Tests for the booking state machine service

#[cfg(test)]
mod service_tests;
