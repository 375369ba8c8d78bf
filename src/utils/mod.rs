//! The `utils` module provides definitions shared across the `pushsub` crate:
//! the error taxonomy used by the registry, dispatcher and HTTP layer, and
//! the logging bootstrap used by the binary and the tests.

pub mod error;
pub mod logging;

pub use error::{PubSubError, Result};
