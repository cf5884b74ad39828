//! Business services containing domain logic and use cases.

pub mod autoconfirm;
pub mod booking;
pub mod notification;
pub mod refund;
pub mod reminder;

// Re-export commonly used types
pub use autoconfirm::{
    check_eligibility, AutoConfirmConfig, AutoConfirmEligibility, AutoConfirmSweep,
    IneligibilityReason, SweepResult,
};
pub use booking::{
    plan_transition, BookingService, BookingTransition, CompletionSweepConfig,
    CompletionSweepResult, CompletionSweepService, NewBookingRequest, SideEffect,
    TransitionOutcome, TransitionPlan,
};
pub use notification::{
    MockNotificationDispatcher, NoOpNotificationDispatcher, Notification, NotificationDispatcher,
    NotificationTemplate,
};
pub use refund::calculate_refund;
pub use reminder::{ReminderConfig, ReminderService, ReminderSweepResult};
