//! Messaging transport for topic broadcasts.
//!
//! Defines the `MessagingTransport` seam the dispatcher sends through, plus
//! the concrete FCM HTTP v1 implementation and its service-account auth.

use async_trait::async_trait;
use thiserror::Error;

use wallpush_common::types::{DeliveryId, NotificationPayload};

pub mod auth;
pub mod fcm;

pub use fcm::FcmTransport;

/// Errors a delivery attempt can fail with.
///
/// The dispatcher treats every variant the same way (retryable); the split
/// exists only so logs show what actually went wrong.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Delivery rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// A push-messaging broadcast API keyed by topic.
#[async_trait]
pub trait MessagingTransport: Send + Sync {
    /// Send one payload to its topic. Returns the backend's identifier for
    /// the accepted message.
    async fn send(&self, payload: &NotificationPayload) -> Result<DeliveryId, TransportError>;
}
