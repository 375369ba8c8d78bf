//! HTTP transport
//!
//! Routes (all under `/v1/projects/localhost`):
//! - `PUT    /topics/{topicName}`          create a topic
//! - `GET    /topics/{topicName}`          look a topic up
//! - `POST   /topics/{topic}:publish`      publish a batch of messages
//! - `PUT    /subscriptions/{subId}`       attach a push endpoint to a topic
//! - `GET    /subscriptions/{subId}`       look a subscription up
//! - `DELETE /subscriptions/{subId}`       remove a subscription
//! - `GET    /subscriptions`               liveness probe
//!
//! `{topic}:publish` is a single path segment, so the POST handler receives
//! the whole segment and strips the `:publish` verb itself.
//!
//! Publishing answers 204 as soon as the deliveries are launched; their
//! outcomes never reach the publisher.

use std::future::Future;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{Instrument, debug, info, info_span};

use crate::broker::Registry;
use crate::dispatch::Dispatcher;
use crate::transport::message::{
    PublishRequest, SubscriptionRequest, SubscriptionResource, TopicResource,
};
use crate::utils::Result;

pub const HEALTH_BODY: &str = "pub sub is running OK!!";

const PUBLISH_VERB: &str = ":publish";

#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: Registry,
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(registry: Registry, dispatcher: Dispatcher) -> Self {
        Self {
            registry,
            dispatcher,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/projects/localhost/topics/{topic}",
            put(create_topic).get(get_topic).post(publish),
        )
        .route("/v1/projects/localhost/subscriptions", get(health))
        .route(
            "/v1/projects/localhost/subscriptions/{sub_id}",
            put(create_subscription)
                .get(get_subscription)
                .delete(delete_subscription),
        )
        .layer(middleware::from_fn(trace))
        .with_state(state)
}

/// Serve the emulator on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

async fn trace(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().to_string();
    let span = info_span!("http", %method, %uri);
    async move {
        let res = next.run(req).await;
        debug!(status = %res.status(), "request handled");
        res
    }
    .instrument(span)
    .await
}

async fn create_topic(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<Json<TopicResource>> {
    state.registry.create_topic(&topic)?;
    Ok(Json(TopicResource::new(&topic)))
}

async fn get_topic(
    State(state): State<AppState>,
    Path(topic): Path<String>,
) -> Result<Json<TopicResource>> {
    let topic = state.registry.get_topic(&topic)?;
    Ok(Json(TopicResource::new(topic.name())))
}

async fn publish(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    body: Bytes,
) -> Result<Response> {
    let Some(topic) = segment.strip_suffix(PUBLISH_VERB) else {
        return Ok(StatusCode::NOT_FOUND.into_response());
    };

    let payload: PublishRequest = serde_json::from_slice(&body)?;
    let endpoints = state.registry.endpoints(topic)?;
    let count = payload.messages.len();

    // Handles are dropped on purpose: the deliveries keep running detached.
    let _ = state.dispatcher.dispatch(payload.messages, &endpoints)?;

    info!(topic, messages = count, endpoints = endpoints.len(), "published to topic");
    Ok(StatusCode::NO_CONTENT.into_response())
}

async fn create_subscription(
    State(state): State<AppState>,
    Path(sub_id): Path<String>,
    body: Bytes,
) -> Result<Json<SubscriptionResource>> {
    let req: SubscriptionRequest = serde_json::from_slice(&body)?;
    let topic = req.topic_name()?;
    let endpoint = req.push_endpoint()?;

    state.registry.create_subscription(topic, &sub_id, endpoint)?;
    Ok(Json(SubscriptionResource::new(&sub_id, topic, endpoint)))
}

async fn get_subscription(
    State(state): State<AppState>,
    Path(sub_id): Path<String>,
) -> Result<Json<SubscriptionResource>> {
    let (topic, sub) = state.registry.find_subscription(&sub_id)?;
    Ok(Json(SubscriptionResource::new(
        &sub.id,
        topic.name(),
        &sub.endpoint,
    )))
}

async fn delete_subscription(
    State(state): State<AppState>,
    Path(sub_id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    state.registry.remove_subscription(&sub_id)?;
    Ok(Json(json!({})))
}

async fn health() -> &'static str {
    HEALTH_BODY
}
