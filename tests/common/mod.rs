#![allow(dead_code)]

use axum::{
    body::Body,
    extract::Multipart,
    http::{header, HeaderMap, Request, StatusCode},
    routing::post,
    Router,
};
use byte_roast::config::{Config, DEFAULT_MAX_UPLOAD_BYTES};
use std::sync::{Arc, Mutex};

pub const BOUNDARY: &str = "byte-roast-test-boundary";
pub const TOKEN: &str = "test-token";

/// What a stub upstream saw of the forwarded request.
#[derive(Clone, Debug, Default)]
pub struct Captured {
    pub authorization: Option<String>,
    pub field: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

pub type CapturedSlot = Arc<Mutex<Option<Captured>>>;

/// Serves `body` with `status` to every POST on `/`, recording the first
/// multipart field of each request.
pub async fn spawn_upstream(status: StatusCode, body: &'static str) -> (String, CapturedSlot) {
    let captured: CapturedSlot = Arc::new(Mutex::new(None));
    let sink = captured.clone();

    let router = Router::new().route(
        "/",
        post(move |headers: HeaderMap, mut multipart: Multipart| {
            let sink = sink.clone();
            async move {
                let mut seen = Captured {
                    authorization: headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_owned),
                    ..Default::default()
                };
                if let Some(field) = multipart.next_field().await.unwrap() {
                    seen.field = field.name().map(str::to_owned);
                    seen.file_name = field.file_name().map(str::to_owned);
                    seen.content_type = field.content_type().map(str::to_owned);
                    seen.bytes = field.bytes().await.unwrap().to_vec();
                }
                *sink.lock().unwrap() = Some(seen);
                (status, body)
            }
        }),
    );

    (spawn(router).await, captured)
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A local address with nothing listening on it.
pub async fn dead_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

pub fn config(upstream_uri: &str) -> Config {
    Config {
        upstream_uri: upstream_uri.to_string(),
        api_token: Some(TOKEN.to_string()),
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
    }
}

pub fn file_part(field: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Vec<u8> {
    let mut part = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    part.extend_from_slice(bytes);
    part.extend_from_slice(b"\r\n");
    part
}

pub fn text_part(field: &str, value: &str) -> Vec<u8> {
    format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"\r\n\r\n{value}\r\n").into_bytes()
}

pub fn multipart_request(parts: &[Vec<u8>]) -> Request<Body> {
    let mut body: Vec<u8> = parts.concat();
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/roast")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn image_request(bytes: &[u8]) -> Request<Body> {
    multipart_request(&[file_part("image", "selfie.png", "image/png", bytes)])
}
