//! The `transport` module is the HTTP surface of the emulator.
//!
//! It decodes Pub/Sub-style REST requests, forwards them to the registry
//! and the dispatcher, and maps errors to plain-text 400 responses.

pub mod http;
pub mod message;

pub use http::{AppState, router, serve};
