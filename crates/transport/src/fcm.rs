//! FCM HTTP v1 transport.
//!
//! Maps a `NotificationPayload` onto the v1 `messages:send` wire format.
//! The message is data-only — it never carries a `notification` key, so
//! devices receive it silently in their background handler.

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use wallpush_common::types::{DeliveryId, NotificationPayload, Priority};

use crate::auth::TokenProvider;
use crate::{MessagingTransport, TransportError};

/// v1 request envelope: `{"message": {...}}`.
#[derive(Debug, Serialize)]
struct SendRequest {
    message: Message,
}

#[derive(Debug, Serialize)]
struct Message {
    topic: String,
    data: MessageData,
    android: AndroidConfig,
}

/// Custom key/value data the app's background handler receives.
#[derive(Debug, Serialize)]
struct MessageData {
    #[serde(rename = "type")]
    message_type: String,
    timestamp: String,
}

#[derive(Debug, Serialize)]
struct AndroidConfig {
    priority: Priority,
    /// v1 encodes TTL as a duration string, e.g. `"3600s"`.
    ttl: String,
}

/// Success response: `{"name": "projects/<p>/messages/<id>"}`.
#[derive(Debug, Deserialize)]
struct SendResponse {
    name: String,
}

impl SendRequest {
    fn from_payload(payload: &NotificationPayload) -> Self {
        Self {
            message: Message {
                topic: payload.topic.clone(),
                data: MessageData {
                    message_type: payload.message_type.clone(),
                    timestamp: payload
                        .timestamp
                        .to_rfc3339_opts(SecondsFormat::Millis, true),
                },
                android: AndroidConfig {
                    priority: payload.priority,
                    ttl: format!("{}s", payload.ttl_seconds),
                },
            },
        }
    }
}

/// Topic broadcast client for the FCM v1 API.
pub struct FcmTransport {
    http: reqwest::Client,
    send_url: String,
    tokens: TokenProvider,
}

impl FcmTransport {
    /// `endpoint` is the API base URL (no trailing path), `project_id` the
    /// Firebase project the topic lives in.
    pub fn new(endpoint: &str, project_id: &str, tokens: TokenProvider) -> Self {
        Self {
            http: reqwest::Client::new(),
            send_url: send_url(endpoint, project_id),
            tokens,
        }
    }
}

fn send_url(endpoint: &str, project_id: &str) -> String {
    format!(
        "{}/v1/projects/{}/messages:send",
        endpoint.trim_end_matches('/'),
        project_id
    )
}

#[async_trait::async_trait]
impl MessagingTransport for FcmTransport {
    async fn send(&self, payload: &NotificationPayload) -> Result<DeliveryId, TransportError> {
        let bearer = self.tokens.bearer_token().await?;
        let request = SendRequest::from_payload(payload);

        let response = self
            .http
            .post(&self.send_url)
            .bearer_auth(bearer)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Rejected { status, body });
        }

        let accepted: SendResponse = response.json().await?;
        tracing::debug!(name = %accepted.name, "FCM accepted message");
        Ok(DeliveryId(accepted.name))
    }
}
