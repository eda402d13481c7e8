//! Byte Roast: upload an image, get roasted.
//!
//! The server side is a single proxy route that relays an uploaded image to an
//! external inference endpoint and normalizes its answer. The client side lives
//! in [`client`] and is shared by the `roast` command-line front end.

pub mod client;
pub mod config;
pub mod error;
pub mod fallback;
pub mod page;
pub mod proxy;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

pub use config::Config;
pub use error::RoastError;
pub use proxy::{unwrap_roast, AppState, RoastResponse};

/// Builds the application router: the page at `/` and the proxy at `/api/roast`.
pub fn app(config: Config) -> Router {
    let body_limit = config.max_upload_bytes;
    let state = Arc::new(AppState::new(config));

    Router::new()
        .route("/", get(page::index))
        .route("/api/roast", post(proxy::roast))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
