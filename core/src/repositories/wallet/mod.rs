//! Wallet repository module.

mod r#trait;
pub use r#trait::WalletRepository;

mod mock;
pub use mock::MockWalletRepository;

#[cfg(test)]
mod tests;
