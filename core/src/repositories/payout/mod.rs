//! Payout repository module.

mod r#trait;
pub use r#trait::PayoutRepository;

mod mock;
pub use mock::MockPayoutRepository;

#[cfg(test)]
mod tests;
