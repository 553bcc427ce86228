//! Upload form and conversion endpoint served by `santander-ynab-web`.

mod config;
mod flash;
mod routes;
mod upload;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::{DefaultBodyLimit, FromRef};
use axum::routing::{get, post};
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::{DEFAULT_MAX_UPLOAD_BYTES, WebArgs, WebConfig};
pub use upload::{ConvertedCsv, UploadRejection, check_filename, convert_upload, secure_filename};

/// State shared by the handlers. Built once from [`WebConfig`]; nothing in it
/// changes while serving.
#[derive(Clone)]
pub struct AppState {
    config: Arc<WebConfig>,
    key: Key,
}

impl AppState {
    pub fn new(config: WebConfig) -> Self {
        // signing keys must be 64 bytes, whatever the length of the secret
        let key = Key::from(Sha512::digest(config.secret.as_bytes()).as_slice());
        Self {
            config: Arc::new(config),
            key,
        }
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

pub fn router(config: WebConfig) -> Router {
    let body_limit = config.max_upload_bytes;

    Router::new()
        .route("/", get(routes::index))
        .route("/convert", post(routes::convert))
        .with_state(AppState::new(config))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn serve(config: WebConfig) -> Result<()> {
    let addr = config.bind;
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
