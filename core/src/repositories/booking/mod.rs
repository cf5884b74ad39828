//! Booking repository module.

mod r#trait;
pub use r#trait::BookingRepository;

mod mock;
pub use mock::MockBookingRepository;

#[cfg(test)]
mod tests;
