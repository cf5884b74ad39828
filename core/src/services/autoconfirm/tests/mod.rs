//! Tests for the auto-confirm policy and sweep

#[cfg(test)]
mod policy_tests;
#[cfg(test)]
mod sweep_tests;
