// ./crates/unnexted-server/src/assets.rs

use std::path::{Path, PathBuf};

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::app::AppState;
use unnexted::Mode;

/// Cache policy for the client bundle in production builds
pub const IMMUTABLE_CACHE: &str = "public, max-age=31536000, immutable";

/// The built hydration bundle on disk
#[derive(Debug, Clone)]
pub struct ClientAssets {
    bundle_path: PathBuf,
    mode: Mode,
}

impl ClientAssets {
    pub fn new(bundle_path: impl AsRef<Path>, mode: Mode) -> Self {
        Self {
            bundle_path: bundle_path.as_ref().to_path_buf(),
            mode,
        }
    }

    pub fn bundle_path(&self) -> &Path {
        &self.bundle_path
    }

    /// Rebuilt bundles must be picked up immediately during development
    pub fn cache_control(&self) -> &'static str {
        if self.mode.is_production() {
            IMMUTABLE_CACHE
        } else {
            "no-cache"
        }
    }
}

/// Axum handler that serves the client bundle, read fresh on every request.
pub async fn serve_client_js(State(state): State<AppState>) -> Response {
    let assets = &state.assets;

    match tokio::fs::read(assets.bundle_path()).await {
        Ok(bundle) => (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    "application/javascript; charset=utf-8",
                ),
                (header::CACHE_CONTROL, assets.cache_control()),
            ],
            bundle,
        )
            .into_response(),
        Err(e) => {
            warn!("Failed to serve client bundle {:?}: {}", assets.bundle_path(), e);
            (StatusCode::NOT_FOUND, "client bundle not built").into_response()
        }
    }
}
