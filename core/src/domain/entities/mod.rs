//! Domain entities representing core business objects.

pub mod booking;
pub mod payout;
pub mod wallet;

// Re-export commonly used types
pub use booking::{
    Booking, BookingStatus, CancelActor, CancellationPolicy, ConfirmationKind, PaymentMethod,
    PaymentStatus, RefundRecord, ReminderKind, AUTO_CONFIRM_DELAY_HOURS,
};
pub use payout::{Payout, PayoutStatus};
pub use wallet::{Wallet, WalletTransaction, WalletTransactionKind};
