//! Topic management
//!
//! A `Topic` owns the subscriptions attached to one topic name. The
//! subscription map sits behind the topic's own reader/writer lock, so
//! subscribing to one topic never contends with traffic on another.
//!
//! Concurrency note: every method takes the lock for the duration of a
//! single map access only. Endpoint snapshots are copied out before the
//! lock is released and are never affected by later mutations.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::broker::subscription::{Subscription, SubscriptionId};
use crate::utils::{PubSubError, Result};

#[derive(Debug)]
pub struct Topic {
    name: String,
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
}

impl Topic {
    /// Create a new topic with no subscriptions.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            subscriptions: RwLock::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach a subscription. Fails if `id` is already present on this topic.
    ///
    /// Uniqueness across topics is enforced by
    /// [`Registry::create_subscription`](crate::broker::Registry::create_subscription),
    /// which is the only caller.
    pub(crate) fn add_subscription(&self, id: &str, endpoint: &str) -> Result<()> {
        let mut subs = self.subscriptions.write();
        if subs.contains_key(id) {
            return Err(PubSubError::SubscriptionExists(id.to_string()));
        }
        subs.insert(id.to_string(), Subscription::new(id, endpoint));
        Ok(())
    }

    pub fn remove_subscription(&self, id: &str) -> Result<Subscription> {
        self.subscriptions
            .write()
            .remove(id)
            .ok_or_else(|| PubSubError::SubscriptionNotFound(id.to_string()))
    }

    pub fn get_subscription(&self, id: &str) -> Result<Subscription> {
        self.subscriptions
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| PubSubError::SubscriptionNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.subscriptions.read().contains_key(id)
    }

    /// Snapshot of every current push endpoint. Empty topics yield an empty vec.
    pub fn list_endpoints(&self) -> Vec<String> {
        self.subscriptions
            .read()
            .values()
            .map(|s| s.endpoint.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.read().is_empty()
    }
}
