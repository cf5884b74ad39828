//! Repository interfaces for the stores behind the booking core, with
//! in-memory mock implementations used by unit and integration tests.

pub mod booking;
pub mod payout;
pub mod wallet;

pub use booking::{BookingRepository, MockBookingRepository};
pub use payout::{MockPayoutRepository, PayoutRepository};
pub use wallet::{MockWalletRepository, WalletRepository};
