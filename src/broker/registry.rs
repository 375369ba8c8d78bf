//! Topic registry
//!
//! The registry owns every topic, keyed by name. It is the only shared state
//! the HTTP layer touches besides the dispatcher, and is handed to request
//! handlers as an explicitly constructed value rather than a process global.
//!
//! Locking is two-level:
//! - the registry's `RwLock` guards insert and lookup of topics only;
//! - each `Topic` guards its own subscription map.
//!
//! Lookups clone the topic's `Arc` out and drop the registry lock before any
//! topic method runs. The single exception is `create_subscription`, which
//! holds the registry write lock while it checks every topic for the id and
//! inserts, so that two concurrent creates can never place one id on two
//! topics. That critical section is pure map work; no lock is ever held
//! across network I/O.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::broker::subscription::Subscription;
use crate::broker::topic::Topic;
use crate::utils::{PubSubError, Result};

type TopicMap = HashMap<String, Arc<Topic>>;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    topics: Arc<RwLock<TopicMap>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_topic(&self, name: &str) -> Result<Arc<Topic>> {
        let mut topics = self.topics.write();
        if topics.contains_key(name) {
            return Err(PubSubError::TopicExists(name.to_string()));
        }
        let topic = Arc::new(Topic::new(name));
        topics.insert(name.to_string(), topic.clone());
        info!(topic = name, "created topic");
        Ok(topic)
    }

    pub fn get_topic(&self, name: &str) -> Result<Arc<Topic>> {
        self.topics
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| PubSubError::TopicNotFound(name.to_string()))
    }

    /// Walks every topic looking for `id`. Linear in the total number of
    /// subscriptions.
    pub fn find_subscription(&self, id: &str) -> Result<(Arc<Topic>, Subscription)> {
        let topics = self.topics.read();
        find_in(&topics, id).ok_or_else(|| PubSubError::SubscriptionNotFound(id.to_string()))
    }

    /// Attach a push endpoint to an existing topic. The id must not be in
    /// use on any topic.
    pub fn create_subscription(&self, topic: &str, id: &str, endpoint: &str) -> Result<Arc<Topic>> {
        let topics = self.topics.write();
        let owner = topics
            .get(topic)
            .cloned()
            .ok_or_else(|| PubSubError::TopicNotFound(topic.to_string()))?;
        if find_in(&topics, id).is_some() {
            return Err(PubSubError::SubscriptionExists(id.to_string()));
        }
        owner.add_subscription(id, endpoint)?;
        drop(topics);

        info!(subscription = id, topic, endpoint, "created subscription");
        Ok(owner)
    }

    pub fn remove_subscription(&self, id: &str) -> Result<Subscription> {
        let (topic, _) = self.find_subscription(id)?;
        let removed = topic.remove_subscription(id)?;
        info!(subscription = id, topic = topic.name(), "deleted subscription");
        Ok(removed)
    }

    /// Endpoint snapshot used by a publish call.
    pub fn endpoints(&self, topic: &str) -> Result<Vec<String>> {
        let endpoints = self.get_topic(topic)?.list_endpoints();
        debug!(topic, count = endpoints.len(), "resolved endpoints");
        Ok(endpoints)
    }

    pub fn topic_names(&self) -> Vec<String> {
        self.topics.read().keys().cloned().collect()
    }
}

fn find_in(topics: &TopicMap, id: &str) -> Option<(Arc<Topic>, Subscription)> {
    topics.values().find_map(|topic| {
        topic
            .get_subscription(id)
            .ok()
            .map(|sub| (topic.clone(), sub))
    })
}
