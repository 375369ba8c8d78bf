//! The `dispatch` module turns one published message into independent,
//! concurrent push deliveries, one per subscription endpoint.
//!
//! Delivery is best-effort: each attempt runs in its own detached task with
//! a bounded timeout, failures are logged and never retried, and the caller
//! gets control back as soon as every attempt has been launched.

pub mod dispatcher;
pub mod message;

pub use dispatcher::{DeliveryOutcome, Dispatcher};
pub use message::{PublishMessage, PushEnvelope, PushMessage};

#[cfg(test)]
mod tests;
