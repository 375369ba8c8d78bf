//! Fan-out delivery
//!
//! `Dispatcher::dispatch` serializes each message once, then spawns one
//! task per (message, endpoint) pair. The returned handles may be dropped:
//! dropping a tokio `JoinHandle` detaches the task, which is exactly what
//! the publish handler does. A panic inside an attempt stays inside its
//! task.
//!
//! An attempt succeeds only on status 200. Connection errors, timeouts and
//! any other status are logged as `DeliveryFailed` and forgotten.

use std::time::Duration;

use reqwest::{Client, StatusCode, header};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::dispatch::message::{PublishMessage, PushEnvelope};
use crate::utils::{PubSubError, Result};

#[derive(Debug)]
pub enum DeliveryOutcome {
    Delivered { endpoint: String, message_id: String },
    Failed(PubSubError),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: Client,
}

impl Dispatcher {
    /// Build a dispatcher whose every delivery attempt is bounded by `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Launch deliveries of every message to every endpoint and return
    /// without waiting for any of them.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(
        &self,
        messages: Vec<PublishMessage>,
        endpoints: &[String],
    ) -> Result<Vec<JoinHandle<DeliveryOutcome>>> {
        let mut handles = Vec::with_capacity(messages.len() * endpoints.len());

        for msg in messages {
            let envelope = PushEnvelope::new(msg);
            let body = serde_json::to_vec(&envelope)?;
            let message_id = envelope.message.message_id;

            for endpoint in endpoints {
                let client = self.client.clone();
                let endpoint = endpoint.clone();
                let body = body.clone();
                let message_id = message_id.clone();
                handles.push(tokio::spawn(async move {
                    deliver(client, endpoint, body, message_id).await
                }));
            }
        }

        debug!(attempts = handles.len(), "launched deliveries");
        Ok(handles)
    }
}

async fn deliver(
    client: Client,
    endpoint: String,
    body: Vec<u8>,
    message_id: String,
) -> DeliveryOutcome {
    let len = body.len();
    let sent = client
        .post(&endpoint)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .send()
        .await;

    let reason = match sent {
        Ok(resp) if resp.status() == StatusCode::OK => {
            debug!(%endpoint, %message_id, len, "message delivered");
            return DeliveryOutcome::Delivered {
                endpoint,
                message_id,
            };
        }
        Ok(resp) => format!("endpoint returned status {}", resp.status()),
        Err(e) if e.is_timeout() => format!("timed out: {e}"),
        Err(e) => e.to_string(),
    };

    let err = PubSubError::DeliveryFailed { endpoint, reason };
    warn!(%message_id, error = %err, "delivery failed, not retrying");
    DeliveryOutcome::Failed(err)
}
