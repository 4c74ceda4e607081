//! Retrying broadcast dispatcher.
//!
//! One invocation builds one payload and tries to deliver it, retrying on
//! failure up to a bounded count with a fixed inter-attempt delay. All
//! transport errors are absorbed here — the caller always gets a benign
//! completion, never an `Err`, so the hosting scheduler cannot be tricked
//! into its own retry storm.

use std::time::Duration;

use chrono::{DateTime, Utc};

use wallpush_common::types::{AttemptOutcome, DeliveryId, DispatchAttempt, NotificationPayload};
use wallpush_transport::MessagingTransport;

/// Fixed-count retry with a fixed inter-attempt delay.
///
/// Deliberately not exponential: attempts are few and the whole sequence
/// must stay well inside one scheduler slot.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_delay: Duration::from_millis(500),
        }
    }
}

/// Terminal state of one invocation.
///
/// `Exhausted` is a non-crashing outcome: operators see it in the logs,
/// nothing else does.
#[derive(Debug)]
pub enum DispatchOutcome {
    Delivered {
        /// 1-based attempt the send succeeded on.
        attempt: u32,
        delivery_id: DeliveryId,
    },
    Exhausted {
        attempts: u32,
        /// Detail of the final failed attempt.
        last_error: String,
    },
}

/// Sends the daily refresh broadcast through an injected transport.
pub struct Dispatcher<T> {
    transport: T,
    topic: String,
    policy: RetryPolicy,
}

impl<T: MessagingTransport> Dispatcher<T> {
    pub fn new(transport: T, topic: &str) -> Self {
        Self::with_policy(transport, topic, RetryPolicy::default())
    }

    pub fn with_policy(transport: T, topic: &str, policy: RetryPolicy) -> Self {
        Self {
            transport,
            topic: topic.to_string(),
            policy,
        }
    }

    /// Run one invocation: build the payload stamped with `now`, then
    /// attempt delivery until it succeeds or the policy is exhausted.
    ///
    /// The payload is built once and resent unchanged on every retry, so
    /// all attempts of an invocation carry the same timestamp. Attempts are
    /// strictly serialized; the only suspension points are the send await
    /// and the retry delay.
    pub async fn dispatch_once(&self, now: DateTime<Utc>) -> DispatchOutcome {
        let payload = NotificationPayload::daily_refresh(&self.topic, now);
        let mut last_error = String::new();

        for attempt in 1..=self.policy.max_attempts {
            match self.transport.send(&payload).await {
                Ok(delivery_id) => {
                    let record = DispatchAttempt {
                        attempt,
                        outcome: AttemptOutcome::Delivered(delivery_id.clone()),
                    };
                    tracing::info!(
                        attempt = record.attempt,
                        outcome = %record.outcome,
                        topic = %payload.topic,
                        "Update message sent"
                    );
                    return DispatchOutcome::Delivered {
                        attempt,
                        delivery_id,
                    };
                }
                Err(e) => {
                    let record = DispatchAttempt {
                        attempt,
                        outcome: AttemptOutcome::Failed(e.to_string()),
                    };
                    tracing::warn!(
                        attempt = record.attempt,
                        outcome = %record.outcome,
                        "Delivery attempt failed"
                    );
                    last_error = e.to_string();

                    if attempt < self.policy.max_attempts {
                        tokio::time::sleep(self.policy.retry_delay).await;
                    }
                }
            }
        }

        tracing::error!(
            attempts = self.policy.max_attempts,
            last_error = %last_error,
            "All delivery attempts failed"
        );
        DispatchOutcome::Exhausted {
            attempts: self.policy.max_attempts,
            last_error,
        }
    }
}
