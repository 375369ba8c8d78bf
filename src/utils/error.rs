//! The `error` module defines the error type shared by every layer of the
//! emulator.
//!
//! Caller errors (`AlreadyExists`, `NotFound`, `MalformedRequest` classes)
//! surface synchronously as a 400 with the message as plain text. Delivery
//! errors are only ever logged by the dispatcher.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PubSubError {
    #[error("could not create topic {0}, it already exists")]
    TopicExists(String),

    #[error("could not create subscription {0}, it already exists")]
    SubscriptionExists(String),

    #[error("topic {0} does not exist")]
    TopicNotFound(String),

    #[error("no subscription with id {0} found")]
    SubscriptionNotFound(String),

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("delivery to {endpoint} failed: {reason}")]
    DeliveryFailed { endpoint: String, reason: String },

    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl PubSubError {
    pub fn is_already_exists(&self) -> bool {
        matches!(
            self,
            PubSubError::TopicExists(_) | PubSubError::SubscriptionExists(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PubSubError::TopicNotFound(_) | PubSubError::SubscriptionNotFound(_)
        )
    }

    fn status(&self) -> StatusCode {
        match self {
            PubSubError::TopicExists(_)
            | PubSubError::SubscriptionExists(_)
            | PubSubError::TopicNotFound(_)
            | PubSubError::SubscriptionNotFound(_)
            | PubSubError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            PubSubError::DeliveryFailed { .. } => StatusCode::BAD_GATEWAY,
            PubSubError::HttpClient(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for PubSubError {
    fn from(err: serde_json::Error) -> Self {
        PubSubError::MalformedRequest(err.to_string())
    }
}

impl IntoResponse for PubSubError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, error = %self, "request rejected");
        (status, self.to_string()).into_response()
    }
}

pub type Result<T> = std::result::Result<T, PubSubError>;
