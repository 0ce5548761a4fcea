//! Delivery progress port
//!
//! Callbacks fired by the delivery loop for each attempt outcome.

use std::time::Duration;
use survey_domain::DeliveryFailure;

/// Callback for attempt-level progress during delivery
///
/// Implementations live in the presentation layer (console output) or
/// forward events elsewhere (see
/// [`ChannelProgress`](crate::use_cases::delivery_stream::ChannelProgress)).
pub trait DeliveryProgress: Send + Sync {
    /// Called before each network attempt
    fn on_attempt_start(&self, _attempt: u32, _max_attempts: u32) {}

    /// Called after a failed attempt.
    ///
    /// `next_delay` is the backoff before the next attempt, or zero when
    /// this was the last attempt.
    fn on_attempt_failed(&self, attempt: u32, failure: &DeliveryFailure, next_delay: Duration);

    /// Called once the payload was delivered
    fn on_delivered(&self, _attempt: u32) {}

    /// Called when every attempt failed
    fn on_exhausted(&self, _attempts: u32, _failure: &DeliveryFailure) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoDeliveryProgress;

impl DeliveryProgress for NoDeliveryProgress {
    fn on_attempt_failed(&self, _attempt: u32, _failure: &DeliveryFailure, _next_delay: Duration) {}
}
