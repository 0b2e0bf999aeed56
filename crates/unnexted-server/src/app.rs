use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::assets::{serve_client_js, ClientAssets};
use crate::pages;
use unnexted::{Config, SsrRenderer};
use unnexted_router::RouteTable;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<SsrRenderer>,
    pub assets: Arc<ClientAssets>,
}

/// Scan the pages directory and wire the renderer to the compiled-in pages
///
/// A malformed page file name aborts startup.
pub fn build_state(config: &Config) -> Result<AppState> {
    let table = RouteTable::build_with(&config.routing.pages_dir, &config.table_options())
        .with_context(|| format!("Failed to build routes from {}", config.routing.pages_dir))?;

    let registry = pages::registry();
    registry.verify(&table);

    let renderer = SsrRenderer::new(Arc::new(table), Arc::new(registry))
        .with_shell(config.document_shell())
        .with_not_found_page(config.routing.not_found_page.clone());

    Ok(AppState {
        renderer: Arc::new(renderer),
        assets: Arc::new(ClientAssets::new(&config.client.bundle_path, config.mode)),
    })
}

/// The HTTP surface: client script, static files, and pages for everything else
pub fn router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route(&config.client.script_path, get(serve_client_js))
        .nest_service("/static", ServeDir::new(&config.client.static_dir))
        .fallback(page_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Build the app and serve it until the process exits
pub async fn serve(config: Config) -> Result<()> {
    let state = build_state(&config)?;
    let app = router(state, &config);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running at http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

async fn page_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let page = state.renderer.render_page(uri.path()).await;
    let status = StatusCode::from_u16(page.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, [(header::CACHE_CONTROL, "no-cache")], Html(page.html)).into_response()
}
