//! Notification payload types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Template identifiers for the guest- and host-facing messages the booking
/// lifecycle produces
///
/// The dispatcher maps these to provider templates; the core only chooses
/// which one applies and supplies the structured details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationTemplate {
    /// Host: a guest requested a reservation
    BookingRequested,
    /// Guest: the host approved the request
    BookingConfirmed,
    /// Guest: the request was confirmed automatically
    BookingAutoConfirmed,
    /// Guest: the host declined the request
    BookingRejected,
    /// Guest: the booking was cancelled, with the refund breakdown
    BookingCancelled,
    /// Guest: the stay is complete
    BookingCompletedGuest,
    /// Host: the stay is complete
    BookingCompletedHost,
    /// Guest: check-in is one day away
    CheckInReminderOneDay,
    /// Guest: check-in is today
    CheckInReminderDayOf,
    /// Guest: please review the completed stay
    ReviewReminder,
}

impl NotificationTemplate {
    /// Convert to string representation for logging and storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BookingRequested => "BOOKING_REQUESTED",
            Self::BookingConfirmed => "BOOKING_CONFIRMED",
            Self::BookingAutoConfirmed => "BOOKING_AUTO_CONFIRMED",
            Self::BookingRejected => "BOOKING_REJECTED",
            Self::BookingCancelled => "BOOKING_CANCELLED",
            Self::BookingCompletedGuest => "BOOKING_COMPLETED_GUEST",
            Self::BookingCompletedHost => "BOOKING_COMPLETED_HOST",
            Self::CheckInReminderOneDay => "CHECK_IN_REMINDER_ONE_DAY",
            Self::CheckInReminderDayOf => "CHECK_IN_REMINDER_DAY_OF",
            Self::ReviewReminder => "REVIEW_REMINDER",
        }
    }
}

/// A message handed to the notification dispatcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// User the message is addressed to
    pub recipient: Uuid,

    /// Which template applies
    pub template: NotificationTemplate,

    /// Structured details the template renders (booking id, refund figures,
    /// rejection reason, ...)
    pub details: serde_json::Value,
}

impl Notification {
    /// Creates a new notification
    pub fn new(recipient: Uuid, template: NotificationTemplate, details: serde_json::Value) -> Self {
        Self {
            recipient,
            template,
            details,
        }
    }
}
