//! A single push endpoint attached to a topic.

use serde::Serialize;

pub type SubscriptionId = String;

/// A registered push endpoint. Immutable once created; the only lifecycle
/// event after creation is removal from its owning topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub endpoint: String,
}

impl Subscription {
    pub fn new(id: impl Into<SubscriptionId>, endpoint: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            endpoint: endpoint.into(),
        }
    }
}
