use std::collections::HashMap;
use std::time::Duration;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use futures::future::join_all;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use super::message::{SUBSCRIPTION_PLACEHOLDER, generate_message_id};
use super::{DeliveryOutcome, Dispatcher, PublishMessage, PushEnvelope};
use crate::utils::PubSubError;

#[derive(Debug)]
struct Received {
    path: String,
    content_type: Option<String>,
    envelope: PushEnvelope,
}

/// Local push receiver: `/ok` answers 200, `/fail` 500, `/created` 201,
/// `/slow` sleeps past any test timeout.
async fn start_receiver() -> (String, mpsc::UnboundedReceiver<Received>) {
    let (tx, rx) = mpsc::unbounded_channel();

    fn record(
        tx: &mpsc::UnboundedSender<Received>,
        path: &str,
        headers: &HeaderMap,
        body: &Bytes,
    ) {
        let _ = tx.send(Received {
            path: path.to_string(),
            content_type: headers
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            envelope: serde_json::from_slice(body).unwrap(),
        });
    }

    let app = Router::new()
        .route(
            "/ok",
            post(
                |State(tx): State<mpsc::UnboundedSender<Received>>, headers: HeaderMap, body: Bytes| async move {
                    record(&tx, "/ok", &headers, &body);
                    StatusCode::OK
                },
            ),
        )
        .route(
            "/fail",
            post(
                |State(tx): State<mpsc::UnboundedSender<Received>>, headers: HeaderMap, body: Bytes| async move {
                    record(&tx, "/fail", &headers, &body);
                    StatusCode::INTERNAL_SERVER_ERROR
                },
            ),
        )
        .route(
            "/created",
            post(
                |State(tx): State<mpsc::UnboundedSender<Received>>, headers: HeaderMap, body: Bytes| async move {
                    record(&tx, "/created", &headers, &body);
                    StatusCode::CREATED
                },
            ),
        )
        .route(
            "/slow",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                StatusCode::OK
            }),
        )
        .with_state(tx);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), rx)
}

fn message(data: &str) -> PublishMessage {
    PublishMessage {
        attributes: HashMap::new(),
        data: data.to_string(),
    }
}

fn dispatcher() -> Dispatcher {
    Dispatcher::new(Duration::from_millis(500)).unwrap()
}

#[test]
fn test_message_id_shape() {
    let id = generate_message_id();
    assert_eq!(id.len(), 5);
    assert!(id.chars().all(|c| c.is_ascii_alphabetic()));
}

#[test]
fn test_envelope_wire_shape() {
    let mut attributes = HashMap::new();
    attributes.insert("kind".to_string(), "order".to_string());
    let envelope = PushEnvelope::new(PublishMessage {
        attributes,
        data: "aGVsbG8=".to_string(),
    });

    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["subscription"], SUBSCRIPTION_PLACEHOLDER);
    assert_eq!(value["message"]["data"], "aGVsbG8=");
    assert_eq!(value["message"]["attributes"]["kind"], "order");
    assert_eq!(
        value["message"]["message_id"].as_str().unwrap(),
        envelope.message.message_id
    );
}

#[test]
fn test_publish_message_defaults() {
    let msg: PublishMessage = serde_json::from_str("{}").unwrap();
    assert!(msg.attributes.is_empty());
    assert!(msg.data.is_empty());
}

#[tokio::test]
async fn test_single_endpoint_receives_message() {
    let (base, mut rx) = start_receiver().await;
    let endpoints = vec![format!("{base}/ok")];

    let handles = dispatcher()
        .dispatch(vec![message("hello")], &endpoints)
        .unwrap();
    assert_eq!(handles.len(), 1);

    let received = rx.recv().await.unwrap();
    assert_eq!(received.path, "/ok");
    assert_eq!(received.content_type.as_deref(), Some("application/json"));
    assert_eq!(received.envelope.message.data, "hello");
    assert!(!received.envelope.message.message_id.is_empty());
    assert_eq!(received.envelope.subscription, SUBSCRIPTION_PLACEHOLDER);

    let outcomes = join_all(handles).await;
    assert!(outcomes[0].as_ref().unwrap().is_delivered());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_no_endpoints_no_attempts() {
    let handles = dispatcher()
        .dispatch(vec![message("a"), message("b")], &[])
        .unwrap();
    assert!(handles.is_empty());
}

#[tokio::test]
async fn test_failing_endpoint_does_not_affect_others() {
    let (base, mut rx) = start_receiver().await;
    let endpoints = vec![format!("{base}/fail"), format!("{base}/ok")];

    let handles = dispatcher()
        .dispatch(vec![message("shared")], &endpoints)
        .unwrap();
    let outcomes: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert_eq!(outcomes.iter().filter(|o| o.is_delivered()).count(), 1);
    assert!(outcomes.iter().any(|o| matches!(
        o,
        DeliveryOutcome::Failed(PubSubError::DeliveryFailed { endpoint, .. }) if endpoint.ends_with("/fail")
    )));

    let first = rx.recv().await.unwrap();
    let second = rx.recv().await.unwrap();
    assert_eq!(first.envelope.message, second.envelope.message);
    assert_eq!(first.envelope.message.data, "shared");
}

#[tokio::test]
async fn test_non_200_success_status_counts_as_failure() {
    let (base, mut rx) = start_receiver().await;
    let endpoints = vec![format!("{base}/created")];

    let handles = dispatcher()
        .dispatch(vec![message("x")], &endpoints)
        .unwrap();
    let outcome = join_all(handles).await.remove(0).unwrap();

    assert!(!outcome.is_delivered());
    assert_eq!(rx.recv().await.unwrap().path, "/created");
}

#[tokio::test]
async fn test_slow_endpoint_times_out_without_blocking_others() {
    let (base, mut rx) = start_receiver().await;
    let endpoints = vec![format!("{base}/slow"), format!("{base}/ok")];

    let started = std::time::Instant::now();
    let handles = dispatcher()
        .dispatch(vec![message("tick")], &endpoints)
        .unwrap();
    assert!(started.elapsed() < Duration::from_millis(500));

    let fast = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fast.path, "/ok");

    let outcomes: Vec<_> = join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
    assert!(!outcomes[0].is_delivered());
    assert!(outcomes[1].is_delivered());
}

#[tokio::test]
async fn test_unreachable_endpoint_fails() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let handles = dispatcher()
        .dispatch(vec![message("x")], &[format!("http://{addr}/hook")])
        .unwrap();
    let outcome = join_all(handles).await.remove(0).unwrap();
    assert!(matches!(
        outcome,
        DeliveryOutcome::Failed(PubSubError::DeliveryFailed { .. })
    ));
}

#[tokio::test]
async fn test_each_message_gets_own_id() {
    let (base, mut rx) = start_receiver().await;
    let endpoints = vec![format!("{base}/ok")];

    let handles = dispatcher()
        .dispatch(vec![message("one"), message("two")], &endpoints)
        .unwrap();
    join_all(handles).await;

    let mut by_data = HashMap::new();
    for _ in 0..2 {
        let r = rx.recv().await.unwrap();
        by_data.insert(r.envelope.message.data, r.envelope.message.message_id);
    }
    assert_eq!(by_data.len(), 2);
    assert!(by_data.contains_key("one") && by_data.contains_key("two"));
}
