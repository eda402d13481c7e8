use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    response::Json,
};
use mime_guess::mime::Mime;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::config::Config;
use crate::error::RoastError;

/// Multipart field carrying the image, both inbound and upstream.
pub const IMAGE_FIELD: &str = "image";

pub struct AppState {
    pub config: Config,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoastResponse {
    pub roast: String,
}

struct UploadedImage {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

/// `POST /api/roast`
pub async fn roast(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<RoastResponse>, RoastError> {
    let image = read_image(multipart?).await?;

    log::info!(
        "📸 Received {} ({} bytes, {})",
        image.file_name.as_deref().unwrap_or("unnamed image"),
        image.bytes.len(),
        image.content_type.as_deref().unwrap_or("no content type"),
    );

    let roast = forward_image(&state, image).await.map_err(|e| {
        log::error!("Roast error: {}", e);
        e
    })?;

    log::info!("✅ Roast delivered ({} chars)", roast.chars().count());

    Ok(Json(RoastResponse { roast }))
}

/// Pulls the first `image` field out of the form. Other fields are skipped.
async fn read_image(mut multipart: Multipart) -> Result<UploadedImage, RoastError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let bytes = field.bytes().await?;

        return Ok(UploadedImage {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(RoastError::MissingImage)
}

async fn forward_image(state: &AppState, image: UploadedImage) -> Result<String, RoastError> {
    let mut part = Part::bytes(image.bytes.to_vec())
        .file_name(image.file_name.unwrap_or_else(|| IMAGE_FIELD.to_string()));
    if let Some(content_type) = image.content_type.filter(|ct| ct.parse::<Mime>().is_ok()) {
        part = part.mime_str(&content_type)?;
    }
    let form = Form::new().part(IMAGE_FIELD, part);

    let mut request = state.http.post(&state.config.upstream_uri).multipart(form);
    if let Some(token) = &state.config.api_token {
        request = request.bearer_auth(token);
    }

    log::info!("📤 Sending image to {}", state.config.upstream_uri);

    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;

    log::debug!("Upstream status: {}", status);
    log::debug!("Upstream body: {}", preview(&text, 500));

    if !status.is_success() {
        return Err(RoastError::Upstream {
            status: StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
            body: text,
        });
    }

    Ok(unwrap_roast(&text))
}

/// Normalizes an upstream body into plain roast text.
///
/// The upstream answers `{"roast": ...}`, where the value is sometimes itself a
/// JSON document carrying another `roast` field. Anything that does not fit
/// that shape, including bodies that are not JSON at all, is returned as the
/// raw text.
pub fn unwrap_roast(text: &str) -> String {
    extract_roast(text).unwrap_or_else(|| text.to_string())
}

fn extract_roast(text: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(text).ok()?;
    let roast = parsed.get("roast").filter(|v| is_truthy(v))?;

    match roast {
        Value::String(outer) if outer.starts_with('{') => {
            let nested: Value = serde_json::from_str(outer).ok()?;
            let roast = nested
                .get("roast")
                .filter(|v| is_truthy(v))
                .map(value_text)
                .unwrap_or_else(|| outer.clone());
            Some(roast)
        }
        other => Some(value_text(other)),
    }
}

/// JavaScript truthiness, which is what the upstream's contract was written against.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
