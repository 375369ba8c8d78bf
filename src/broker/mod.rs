//! The `broker` module holds the in-memory topic/subscription registry.

pub mod registry;
pub mod subscription;
pub mod topic;

pub use registry::Registry;
pub use subscription::{Subscription, SubscriptionId};
pub use topic::Topic;
