mod common;

use axum::{http::StatusCode, routing::post, Json, Router};
use byte_roast::{
    app,
    client::{ClientState, RoastClient, RoastSession, RoastSource, SelectedImage},
    fallback::FALLBACK_ROASTS,
};
use serde_json::json;

use common::{config, dead_address, spawn, spawn_upstream};

fn selfie() -> SelectedImage {
    SelectedImage::new("selfie.png", "image/png", b"\x89PNG".to_vec()).unwrap()
}

/// A stand-in proxy that always answers with `status` and `body`.
async fn stub_proxy(status: StatusCode, body: serde_json::Value) -> String {
    let router = Router::new().route(
        "/api/roast",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );
    spawn(router).await
}

async fn roast_through(server: &str) -> RoastSession {
    let mut session = RoastSession::new();
    assert!(session.select(selfie()));
    let client = RoastClient::new(server);
    assert!(session.generate(&client).await.is_some());
    session
}

fn shown_outcome(session: &RoastSession) -> &byte_roast::client::RoastOutcome {
    match session.state() {
        ClientState::ResultShown { outcome, .. } => outcome,
        other => panic!("expected result-shown, got {}", other.as_str()),
    }
}

#[tokio::test]
async fn test_unreachable_proxy_falls_back() {
    let session = roast_through(&dead_address().await).await;

    let outcome = shown_outcome(&session);
    assert!(outcome.is_fallback());
    assert!(FALLBACK_ROASTS.contains(&outcome.text.as_str()));
}

#[tokio::test]
async fn test_error_status_falls_back() {
    let server = stub_proxy(StatusCode::BAD_GATEWAY, json!({ "error": "boom" })).await;
    let session = roast_through(&server).await;

    let outcome = shown_outcome(&session);
    assert!(FALLBACK_ROASTS.contains(&outcome.text.as_str()));
    match &outcome.source {
        RoastSource::Fallback { reason } => assert!(reason.contains("502")),
        RoastSource::Remote => panic!("expected a fallback"),
    }
}

#[tokio::test]
async fn test_blank_roast_falls_back() {
    let server = stub_proxy(StatusCode::OK, json!({ "roast": "   \n" })).await;
    let session = roast_through(&server).await;

    let outcome = shown_outcome(&session);
    assert!(outcome.is_fallback());
    assert!(FALLBACK_ROASTS.contains(&outcome.text.as_str()));
}

#[tokio::test]
async fn test_remote_roast_is_trimmed() {
    let server = stub_proxy(StatusCode::OK, json!({ "roast": "  nice haircut, did you lose a bet?\n" })).await;
    let session = roast_through(&server).await;

    let outcome = shown_outcome(&session);
    assert_eq!(outcome.source, RoastSource::Remote);
    assert_eq!(outcome.text, "nice haircut, did you lose a bet?");
}

#[tokio::test]
async fn test_end_to_end_through_proxy() {
    let (upstream, captured) =
        spawn_upstream(StatusCode::OK, r#"{"roast":"{\"roast\":\"nested text\"}"}"#).await;
    let server = spawn(app(config(&upstream))).await;

    let session = roast_through(&server).await;

    let outcome = shown_outcome(&session);
    assert_eq!(outcome.source, RoastSource::Remote);
    assert_eq!(outcome.text, "nested text");

    let seen = captured.lock().unwrap().clone().expect("upstream was called");
    assert_eq!(seen.bytes, b"\x89PNG");
    assert_eq!(seen.file_name.as_deref(), Some("selfie.png"));
}
