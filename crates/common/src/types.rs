use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message type tag carried in every refresh broadcast.
pub const MESSAGE_TYPE_DAILY_REFRESH: &str = "daily_refresh";

/// How long the messaging backend keeps trying to deliver before discarding.
pub const PAYLOAD_TTL_SECONDS: u32 = 3600;

/// Delivery priority requested from the messaging backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Normal,
}

/// Silent data-only broadcast payload, built once per invocation.
///
/// Carries no notification-display fields on purpose: receiving devices get
/// the message in their background handler and decide locally whether to
/// refresh. The timestamp is stamped when the payload is built and reused
/// unchanged across retries of the same invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPayload {
    /// Message tag receivers switch on (e.g. `daily_refresh`).
    pub message_type: String,
    /// Dispatch time, ISO-8601 on the wire.
    pub timestamp: DateTime<Utc>,
    /// Requested delivery priority.
    pub priority: Priority,
    /// Time-to-live in seconds.
    pub ttl_seconds: u32,
    /// Broadcast topic all subscribed devices receive on.
    pub topic: String,
}

impl NotificationPayload {
    /// Build the daily refresh broadcast for `topic`, stamped with `now`.
    pub fn daily_refresh(topic: &str, now: DateTime<Utc>) -> Self {
        Self {
            message_type: MESSAGE_TYPE_DAILY_REFRESH.to_string(),
            timestamp: now,
            priority: Priority::High,
            ttl_seconds: PAYLOAD_TTL_SECONDS,
            topic: topic.to_string(),
        }
    }
}

/// Opaque identifier the transport returns for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryId(pub String);

impl std::fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of a single delivery attempt. Transient — exists only for
/// logging within one invocation, never persisted.
#[derive(Debug, Clone)]
pub struct DispatchAttempt {
    /// 1-based attempt index.
    pub attempt: u32,
    pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    Delivered(DeliveryId),
    Failed(String),
}

impl std::fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptOutcome::Delivered(id) => write!(f, "delivered ({})", id),
            AttemptOutcome::Failed(detail) => write!(f, "failed ({})", detail),
        }
    }
}
