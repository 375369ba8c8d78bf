//! # PushSub
//!
//! `pushsub` is an in-memory emulator of a push-style publish/subscribe
//! service. Clients create topics, attach HTTP push endpoints to them as
//! subscriptions, and publish messages; every published message is POSTed
//! to each endpoint of the topic concurrently, best-effort.
//!
//! ## Core Modules
//!
//! - `broker`: the topic/subscription registry, safe for concurrent use.
//! - `dispatch`: the fan-out delivery path and the push envelope format.
//! - `transport`: the Pub/Sub-style REST surface.
//! - `config`: server and delivery configuration loading.
//! - `utils`: the shared error type and logging bootstrap.
//!
//! Nothing is persisted: all state is lost when the process exits.

pub mod broker;
pub mod config;
pub mod dispatch;
pub mod transport;
pub mod utils;
