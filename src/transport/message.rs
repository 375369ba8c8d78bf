//! Request and response bodies of the REST surface.
//!
//! Field names follow the Pub/Sub v1 JSON representation (`pushConfig`,
//! `pushEndpoint`), so the official client libraries can talk to the
//! emulator unchanged.

use serde::{Deserialize, Serialize};

use crate::dispatch::PublishMessage;
use crate::utils::{PubSubError, Result};

pub const TOPIC_PREFIX: &str = "projects/localhost/topics/";
pub const SUBSCRIPTION_PREFIX: &str = "projects/localhost/subscriptions/";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PushConfig {
    pub push_endpoint: String,
}

/// Body of `PUT .../subscriptions/{subId}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub topic: String,
    pub push_config: Option<PushConfig>,
}

impl SubscriptionRequest {
    /// Short topic name with the `projects/localhost/topics/` prefix removed.
    pub fn topic_name(&self) -> Result<&str> {
        self.topic.strip_prefix(TOPIC_PREFIX).ok_or_else(|| {
            PubSubError::MalformedRequest(format!(
                "topic {} is not of the form {TOPIC_PREFIX}<name>",
                self.topic
            ))
        })
    }

    pub fn push_endpoint(&self) -> Result<&str> {
        match &self.push_config {
            Some(cfg) if !cfg.push_endpoint.is_empty() => Ok(&cfg.push_endpoint),
            _ => Err(PubSubError::MalformedRequest(
                "pushConfig.pushEndpoint is required".to_string(),
            )),
        }
    }
}

/// Body of `POST .../topics/{topic}:publish`.
#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    #[serde(default)]
    pub messages: Vec<PublishMessage>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TopicResource {
    pub name: String,
}

impl TopicResource {
    pub fn new(name: &str) -> Self {
        Self {
            name: format!("{TOPIC_PREFIX}{name}"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResource {
    pub name: String,
    pub topic: String,
    pub push_config: PushConfig,
}

impl SubscriptionResource {
    pub fn new(id: &str, topic: &str, endpoint: &str) -> Self {
        Self {
            name: format!("{SUBSCRIPTION_PREFIX}{id}"),
            topic: format!("{TOPIC_PREFIX}{topic}"),
            push_config: PushConfig {
                push_endpoint: endpoint.to_string(),
            },
        }
    }
}
