//! Domain-specific error types for the booking lifecycle
//!
//! This module provides error type definitions for booking state transitions
//! and the side effects they trigger. User-facing messages are kept generic;
//! the structured details carry the offending booking and status pair for
//! clients that need them.

use sn_shared::types::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;
use uuid::Uuid;

/// Booking lifecycle errors
///
/// These errors abort an operation before any side effect runs. Status names
/// in `InvalidTransition` are the lowercase wire values (`"pending"`,
/// `"confirmed"`, ...).
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid status transition for booking {booking_id}: {from} -> {to}")]
    InvalidTransition {
        booking_id: Uuid,
        from: String,
        to: String,
    },

    #[error("Booking {booking_id} is missing required data: {field}")]
    MissingData { booking_id: Uuid, field: String },
}

/// Side-effect errors
///
/// Failures of the follow-up work a committed transition triggers. These are
/// never propagated as operation errors: the orchestrator logs them and
/// reports them in the transition outcome, and the committed status change
/// stands.
#[derive(Error, Debug, Clone)]
pub enum SideEffectError {
    #[error("Notification dispatch failed for booking {booking_id} ({template}): {reason}")]
    NotificationDispatch {
        booking_id: Uuid,
        template: String,
        reason: String,
    },

    #[error("Payout update failed for booking {booking_id}: {reason}")]
    PayoutUpdate { booking_id: Uuid, reason: String },

    #[error("Wallet credit failed for booking {booking_id}: {reason}")]
    WalletUpdate { booking_id: Uuid, reason: String },
}

impl IntoErrorResponse for BookingError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            BookingError::InvalidTransition {
                booking_id,
                from,
                to,
            } => ErrorResponse::new(
                error_codes::INVALID_TRANSITION,
                "This booking can no longer be moved to the requested status",
            )
            .add_detail("booking_id", booking_id.to_string())
            .add_detail("from", from)
            .add_detail("to", to),

            BookingError::MissingData { booking_id, field } => ErrorResponse::new(
                error_codes::MISSING_DATA,
                "The booking record is missing data required for this operation",
            )
            .add_detail("booking_id", booking_id.to_string())
            .add_detail("field", field),
        }
    }
}
