//! Interval scheduler driving the dispatcher.
//!
//! The cadence is deployment configuration, not behavior: the loop fires
//! once immediately on startup and then every `interval`. Missed ticks are
//! delayed rather than bursted, so invocations never overlap and at most
//! one dispatch is in flight at any instant.

use std::time::Duration;

use chrono::Utc;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use wallpush_transport::MessagingTransport;

use crate::dispatch::{DispatchOutcome, Dispatcher};

pub struct Scheduler<T> {
    dispatcher: Dispatcher<T>,
    interval: Duration,
}

impl<T: MessagingTransport> Scheduler<T> {
    pub fn new(dispatcher: Dispatcher<T>, interval: Duration) -> Self {
        Self {
            dispatcher,
            interval,
        }
    }

    /// Run the dispatch loop. Runs indefinitely until the task is cancelled.
    ///
    /// Each tick runs one invocation to its terminal state. Dispatch never
    /// surfaces an error, so a failed invocation leaves the loop (and the
    /// cadence) untouched.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            interval_secs = self.interval.as_secs(),
            "Dispatch scheduler started"
        );

        loop {
            ticker.tick().await;

            let invocation_id = Uuid::new_v4();
            tracing::info!(%invocation_id, "Scheduled update triggered");

            match self.dispatcher.dispatch_once(Utc::now()).await {
                DispatchOutcome::Delivered {
                    attempt,
                    delivery_id,
                } => {
                    tracing::info!(
                        %invocation_id,
                        attempt,
                        delivery_id = %delivery_id,
                        "Refresh broadcast delivered"
                    );
                }
                DispatchOutcome::Exhausted {
                    attempts,
                    last_error,
                } => {
                    tracing::error!(
                        %invocation_id,
                        attempts,
                        last_error = %last_error,
                        "Refresh broadcast failed"
                    );
                }
            }
        }
    }
}
