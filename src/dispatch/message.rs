//! Message definitions for push delivery
//!
//! `PublishMessage` is what a publisher hands in; `PushEnvelope` is the JSON
//! body POSTed to each endpoint:
//!
//! ```json
//! {"message": {"attributes": {}, "data": "...", "message_id": "aBcDe"},
//!  "subscription": "Subscription"}
//! ```
//!
//! The `subscription` field carries a fixed placeholder, not the id of the
//! receiving subscription.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const SUBSCRIPTION_PLACEHOLDER: &str = "Subscription";

const MESSAGE_ID_LEN: usize = 5;
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishMessage {
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushMessage {
    pub attributes: HashMap<String, String>,
    pub data: String,
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushEnvelope {
    pub message: PushMessage,
    pub subscription: String,
}

impl PushEnvelope {
    /// Wrap a published message, assigning it a fresh message id.
    pub fn new(msg: PublishMessage) -> Self {
        Self {
            message: PushMessage {
                attributes: msg.attributes,
                data: msg.data,
                message_id: generate_message_id(),
            },
            subscription: SUBSCRIPTION_PLACEHOLDER.to_string(),
        }
    }
}

/// Short random id of ASCII letters. Not globally unique; collisions are
/// merely unlikely at emulator scale.
pub fn generate_message_id() -> String {
    let mut rng = rand::rng();
    (0..MESSAGE_ID_LEN)
        .map(|_| LETTERS[rng.random_range(0..LETTERS.len())] as char)
        .collect()
}
