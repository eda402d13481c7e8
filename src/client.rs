//! Upload client: picks an image, previews it, asks the proxy for a roast and
//! falls back to a canned one when that does not work out.
//!
//! [`RoastSession`] owns the UI state as a single [`ClientState`] value, so a
//! session can never be loading without an image. [`RoastClient`] is the HTTP
//! side and never fails from the caller's point of view: every error ends in a
//! fallback roast.

use base64::{engine::general_purpose, Engine as _};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use thiserror::Error;

use crate::fallback::random_fallback;
use crate::proxy::{RoastResponse, IMAGE_FIELD};

pub const DEFAULT_SERVER: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not read image: {0}")]
    Io(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed: {0}")]
    Status(u16),

    #[error("Empty response from API")]
    EmptyRoast,
}

/// An image the user picked. Only `image/*` types can be constructed.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedImage {
    file_name: String,
    mime: String,
    bytes: Vec<u8>,
}

impl SelectedImage {
    /// Returns `None` for anything that is not an image.
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Option<Self> {
        let mime = mime.into();
        if !mime.starts_with("image/") {
            return None;
        }
        Some(Self {
            file_name: file_name.into(),
            mime,
            bytes,
        })
    }

    /// Loads a file, guessing its type from the extension. `Ok(None)` means the
    /// file is not an image.
    pub async fn from_path(path: &Path) -> Result<Option<Self>, ClientError> {
        let mime = match mime_guess::from_path(path).first() {
            Some(mime) => mime.to_string(),
            None => return Ok(None),
        };
        if !mime.starts_with("image/") {
            return Ok(None);
        }

        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| IMAGE_FIELD.to_string());

        Ok(Self::new(file_name, mime, bytes))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// `data:` URL suitable for an `<img src>` preview.
    pub fn preview_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RoastSource {
    Remote,
    /// The reason is what the user sees as a transient notice.
    Fallback { reason: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct RoastOutcome {
    pub text: String,
    pub source: RoastSource,
}

impl RoastOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, RoastSource::Fallback { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub image: SelectedImage,
    pub preview: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ClientState {
    #[default]
    Idle,
    ImageSelected(Selection),
    Loading(Selection),
    ResultShown {
        selection: Selection,
        outcome: RoastOutcome,
    },
}

impl ClientState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientState::Idle => "idle",
            ClientState::ImageSelected(_) => "image-selected",
            ClientState::Loading(_) => "loading",
            ClientState::ResultShown { .. } => "result-shown",
        }
    }
}

#[derive(Debug, Default)]
pub struct RoastSession {
    state: ClientState,
}

impl RoastSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Whether the "roast me" action is available.
    pub fn can_submit(&self) -> bool {
        matches!(
            self.state,
            ClientState::ImageSelected(_) | ClientState::ResultShown { .. }
        )
    }

    /// Selects a new image, dropping any previous result. Ignored while a
    /// request is in flight. Returns whether the selection took.
    pub fn select(&mut self, image: SelectedImage) -> bool {
        if matches!(self.state, ClientState::Loading(_)) {
            return false;
        }
        let preview = image.preview_data_url();
        self.state = ClientState::ImageSelected(Selection { image, preview });
        true
    }

    /// Moves to `Loading` and hands back the image to send, or `None` when
    /// there is nothing to submit.
    pub fn begin(&mut self) -> Option<SelectedImage> {
        let selection = match std::mem::take(&mut self.state) {
            ClientState::ImageSelected(selection) | ClientState::ResultShown { selection, .. } => selection,
            other => {
                self.state = other;
                return None;
            }
        };
        let image = selection.image.clone();
        self.state = ClientState::Loading(selection);
        Some(image)
    }

    /// Shows the outcome. Only meaningful while loading.
    pub fn finish(&mut self, outcome: RoastOutcome) -> bool {
        match std::mem::take(&mut self.state) {
            ClientState::Loading(selection) => {
                self.state = ClientState::ResultShown { selection, outcome };
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Runs one full round trip against the proxy.
    pub async fn generate(&mut self, client: &RoastClient) -> Option<&RoastOutcome> {
        let image = self.begin()?;
        let outcome = client.roast(&image).await;
        self.finish(outcome);

        match &self.state {
            ClientState::ResultShown { outcome, .. } => Some(outcome),
            _ => None,
        }
    }
}

/// Talks to a running proxy.
#[derive(Clone, Debug)]
pub struct RoastClient {
    endpoint: String,
    http: reqwest::Client,
}

impl RoastClient {
    /// `server` is the base URL the proxy is served from.
    pub fn new(server: &str) -> Self {
        Self {
            endpoint: format!("{}/api/roast", server.trim_end_matches('/')),
            http: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Asks for a roast. Failures turn into a fallback roast.
    pub async fn roast(&self, image: &SelectedImage) -> RoastOutcome {
        match self.request(image).await {
            Ok(text) => {
                log::info!("Roast delivered! 🔥");
                RoastOutcome {
                    text,
                    source: RoastSource::Remote,
                }
            }
            Err(e) => {
                log::warn!("API temporarily down 💥 ({}), using backup roast generator", e);
                RoastOutcome {
                    text: random_fallback().to_string(),
                    source: RoastSource::Fallback { reason: e.to_string() },
                }
            }
        }
    }

    async fn request(&self, image: &SelectedImage) -> Result<String, ClientError> {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let result: RoastResponse = response.json().await?;
        let roast = result.roast.trim();
        if roast.is_empty() {
            return Err(ClientError::EmptyRoast);
        }

        Ok(roast.to_string())
    }
}
