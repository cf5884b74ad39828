//! Booking service orchestrating the reservation lifecycle
//!
//! The service owns the load → plan → persist → execute-effects sequence.
//! Planning is pure (`transition.rs`); persistence goes through the
//! booking repository's compare-and-set so a concurrent transition on the
//! same booking surfaces as `InvalidTransition` instead of double-applying
//! side effects.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use sn_shared::config::RefundPolicyConfig;

use crate::domain::entities::booking::{Booking, CancelActor, ConfirmationKind};
use crate::domain::entities::payout::Payout;
use crate::errors::{DomainError, DomainResult, SideEffectError};
use crate::repositories::{BookingRepository, PayoutRepository, WalletRepository};
use crate::services::notification::{Notification, NotificationDispatcher, NotificationTemplate};

use super::transition::plan_transition;
use super::types::{BookingTransition, NewBookingRequest, SideEffect, TransitionOutcome};

/// Service managing booking lifecycle transitions and their side effects
pub struct BookingService<B, P, W, N>
where
    B: BookingRepository,
    P: PayoutRepository,
    W: WalletRepository,
    N: NotificationDispatcher,
{
    booking_repository: Arc<B>,
    payout_repository: Arc<P>,
    wallet_repository: Arc<W>,
    notification_dispatcher: Arc<N>,
    policy_config: RefundPolicyConfig,
}

impl<B, P, W, N> BookingService<B, P, W, N>
where
    B: BookingRepository,
    P: PayoutRepository,
    W: WalletRepository,
    N: NotificationDispatcher,
{
    /// Create a new booking service
    ///
    /// # Arguments
    ///
    /// * `booking_repository` - Store for booking documents
    /// * `payout_repository` - Store for host payout records
    /// * `wallet_repository` - Store for guest wallet balances
    /// * `notification_dispatcher` - Outbound notification channel
    /// * `policy_config` - Refund tier thresholds and admin deduction rate
    pub fn new(
        booking_repository: Arc<B>,
        payout_repository: Arc<P>,
        wallet_repository: Arc<W>,
        notification_dispatcher: Arc<N>,
        policy_config: RefundPolicyConfig,
    ) -> Self {
        Self {
            booking_repository,
            payout_repository,
            wallet_repository,
            notification_dispatcher,
            policy_config,
        }
    }

    /// Create a pending booking from a reservation request
    ///
    /// Persists the booking, opens the host's payout record in `Pending`,
    /// and notifies the host of the new request. The host notification is
    /// best-effort; a dispatch failure is logged and does not fail the
    /// creation.
    ///
    /// # Arguments
    ///
    /// * `request` - The validated reservation inputs
    ///
    /// # Returns
    ///
    /// The persisted pending booking
    pub async fn create_booking(&self, request: NewBookingRequest) -> DomainResult<Booking> {
        if let Some(check_out) = request.check_out {
            if check_out <= request.check_in {
                return Err(DomainError::Validation {
                    message: "Check-out date must be after check-in date".to_string(),
                });
            }
        }
        if request.base_price < Decimal::ZERO || request.service_fee < Decimal::ZERO {
            return Err(DomainError::Validation {
                message: "Booking amounts cannot be negative".to_string(),
            });
        }

        let booking = Booking::new(
            request.guest_id,
            request.host_id,
            request.listing_id,
            request.check_in,
            request.check_out,
            request.base_price,
            request.service_fee,
            request.payment_method,
            request.cancellation_policy,
        );
        let created = self.booking_repository.create(booking).await?;

        let payout = Payout::new(created.id, created.host_id, created.total_amount);
        self.payout_repository.create(payout).await?;

        tracing::info!(
            booking_id = %created.id,
            guest_id = %created.guest_id,
            host_id = %created.host_id,
            total_amount = %created.total_amount,
            event = "booking_created",
            "New booking request created"
        );

        let notification = Notification::new(
            created.host_id,
            NotificationTemplate::BookingRequested,
            serde_json::json!({
                "booking_id": created.id,
                "listing_id": created.listing_id,
                "check_in": created.check_in,
            }),
        );
        if let Err(reason) = self.notification_dispatcher.dispatch(&notification).await {
            tracing::warn!(
                booking_id = %created.id,
                reason = reason,
                event = "notification_failed",
                "Failed to notify host of new booking request"
            );
        }

        Ok(created)
    }

    /// Confirm a pending booking
    ///
    /// # Arguments
    ///
    /// * `booking_id` - The booking to confirm
    /// * `kind` - Whether a host approved or the timeout policy fired
    /// * `now` - Instant the confirmation takes effect
    pub async fn confirm_booking(
        &self,
        booking_id: Uuid,
        kind: ConfirmationKind,
        now: DateTime<Utc>,
    ) -> DomainResult<TransitionOutcome> {
        self.apply_transition(booking_id, BookingTransition::Confirm { kind }, now)
            .await
    }

    /// Reject a pending booking
    ///
    /// # Arguments
    ///
    /// * `booking_id` - The booking to reject
    /// * `reason` - Host's reason, forwarded to the guest when given
    /// * `now` - Instant the rejection takes effect
    pub async fn reject_booking(
        &self,
        booking_id: Uuid,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> DomainResult<TransitionOutcome> {
        self.apply_transition(booking_id, BookingTransition::Reject { reason }, now)
            .await
    }

    /// Cancel a pending or confirmed booking
    ///
    /// Computes the refund under the booking's policy tier, records the
    /// breakdown on the booking, moves the payout to `REFUNDED`, and, for
    /// wallet payments with a positive refund, credits the guest's wallet.
    ///
    /// # Arguments
    ///
    /// * `booking_id` - The booking to cancel
    /// * `initiated_by` - Which party cancelled
    /// * `now` - Cancellation instant, also used for refund computation
    pub async fn cancel_booking(
        &self,
        booking_id: Uuid,
        initiated_by: CancelActor,
        now: DateTime<Utc>,
    ) -> DomainResult<TransitionOutcome> {
        self.apply_transition(booking_id, BookingTransition::Cancel { initiated_by }, now)
            .await
    }

    /// Complete a confirmed booking whose stay has ended
    ///
    /// # Arguments
    ///
    /// * `booking_id` - The booking to complete
    /// * `now` - Instant the completion takes effect
    pub async fn complete_booking(
        &self,
        booking_id: Uuid,
        now: DateTime<Utc>,
    ) -> DomainResult<TransitionOutcome> {
        self.apply_transition(booking_id, BookingTransition::Complete, now)
            .await
    }

    /// Load, plan, persist, and execute a transition
    ///
    /// Validation failures and concurrent-modification conflicts abort
    /// before any side effect runs. Once the compare-and-set write has
    /// succeeded the transition is committed: side-effect failures are
    /// logged and reported in the outcome, never used to revert it.
    async fn apply_transition(
        &self,
        booking_id: Uuid,
        transition: BookingTransition,
        now: DateTime<Utc>,
    ) -> DomainResult<TransitionOutcome> {
        let booking = self
            .booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("Booking {}", booking_id),
            })?;

        let plan = plan_transition(&booking, &transition, now, &self.policy_config)?;

        let persisted = self
            .booking_repository
            .update_if_status(plan.booking, plan.from)
            .await?;

        tracing::info!(
            booking_id = %persisted.id,
            from = plan.from.as_str(),
            to = plan.to.as_str(),
            event = "booking_transition",
            "Booking status transition committed"
        );

        let (notifications_sent, side_effect_failures) =
            self.execute_effects(&persisted, &plan.effects, now).await;

        Ok(TransitionOutcome {
            booking: persisted,
            refund: plan.refund,
            notifications_sent,
            side_effect_failures,
        })
    }

    /// Execute planned side effects, isolating failures
    ///
    /// Effects run in plan order. Each failure is logged as a warning and
    /// collected; it never stops the remaining effects.
    async fn execute_effects(
        &self,
        booking: &Booking,
        effects: &[SideEffect],
        now: DateTime<Utc>,
    ) -> (usize, Vec<SideEffectError>) {
        let mut notifications_sent = 0;
        let mut failures = Vec::new();

        for effect in effects {
            match effect {
                SideEffect::Notify {
                    recipient,
                    template,
                    details,
                } => {
                    let notification = Notification::new(*recipient, *template, details.clone());
                    match self.notification_dispatcher.dispatch(&notification).await {
                        Ok(_) => notifications_sent += 1,
                        Err(reason) => {
                            tracing::warn!(
                                booking_id = %booking.id,
                                template = template.as_str(),
                                reason = reason,
                                event = "notification_failed",
                                "Notification dispatch failed after transition"
                            );
                            failures.push(SideEffectError::NotificationDispatch {
                                booking_id: booking.id,
                                template: template.as_str().to_string(),
                                reason,
                            });
                        }
                    }
                }
                SideEffect::UpdatePayout { status } => {
                    match self
                        .payout_repository
                        .update_status(booking.id, *status, now)
                        .await
                    {
                        Ok(payout) => {
                            tracing::info!(
                                booking_id = %booking.id,
                                payout_id = %payout.id,
                                status = status.as_str(),
                                event = "payout_updated",
                                "Payout status updated"
                            );
                        }
                        Err(e) => {
                            tracing::warn!(
                                booking_id = %booking.id,
                                status = status.as_str(),
                                error = %e,
                                event = "payout_update_failed",
                                "Payout status update failed after transition"
                            );
                            failures.push(SideEffectError::PayoutUpdate {
                                booking_id: booking.id,
                                reason: e.to_string(),
                            });
                        }
                    }
                }
                SideEffect::CreditWallet {
                    user_id,
                    amount,
                    description,
                } => {
                    match self
                        .wallet_repository
                        .credit(*user_id, *amount, Some(booking.id), description.clone(), now)
                        .await
                    {
                        Ok(transaction) => {
                            tracing::info!(
                                booking_id = %booking.id,
                                user_id = %user_id,
                                amount = %amount,
                                transaction_id = %transaction.id,
                                event = "wallet_credited",
                                "Refund credited to guest wallet"
                            );
                        }
                        Err(e) => {
                            tracing::warn!(
                                booking_id = %booking.id,
                                user_id = %user_id,
                                amount = %amount,
                                error = %e,
                                event = "wallet_credit_failed",
                                "Wallet credit failed after transition"
                            );
                            failures.push(SideEffectError::WalletUpdate {
                                booking_id: booking.id,
                                reason: e.to_string(),
                            });
                        }
                    }
                }
            }
        }

        (notifications_sent, failures)
    }
}
