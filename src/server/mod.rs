//! HTTP interface.
//!
//! One axum router serves the page shells, the JSON API, and the PDF parse
//! endpoint. All state lives in [`AppState`]; handlers reach the database
//! provider only through the core modules.

use crate::{
    config::categories::CategoryPalette, errors::Error, extract::gemini::GeminiClient,
    storage::StatementStore,
};
use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{delete, get, patch, post},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// JSON API handlers
pub mod api;
/// Page-shell handlers for the routed paths
pub mod pages;
/// Session capability and the `CurrentUser` extractor
pub mod session;

/// Everything a handler needs, shared behind an `Arc`.
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Statement blob store
    pub store: StatementStore,
    /// AI analysis client, when a key is configured
    pub analyzer: Option<GeminiClient>,
    /// Category-to-color lookup for the neighborhood
    pub palette: CategoryPalette,
    /// Signed preview-URL lifetime
    pub signed_url_expiry: Duration,
}

/// JSON error body: `{error, details?}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// User-facing error message
    pub error: String,
    /// Provider detail, when there is one worth passing through
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    /// Body with just a message.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            // Anonymous on a gated route: straight back to the entry page
            Self::NotAuthenticated => Redirect::to("/").into_response(),
            Self::Validation { message } => {
                (StatusCode::BAD_REQUEST, Json(ErrorBody::new(message))).into_response()
            }
            Self::NotFound { what } => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody::new(format!("{what} not found"))),
            )
                .into_response(),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody::new(other.to_string())),
            )
                .into_response(),
        }
    }
}

/// Builds the application router.
#[must_use]
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Pages
        .route("/", get(pages::home))
        .route("/signup", get(pages::signup))
        .route("/dashboard", get(pages::dashboard))
        .route("/neighborhood", get(pages::neighborhood))
        .route("/upload", get(pages::upload))
        .route("/banking", get(pages::banking))
        // Auth
        .route("/api/signup", post(api::signup))
        .route("/api/signin", post(api::signin))
        .route("/api/signout", post(api::signout))
        .route("/api/me", get(api::me))
        // Locations and amounts
        .route("/api/locations", get(api::locations_list).post(api::locations_create))
        .route("/api/locations/:id", patch(api::locations_update))
        .route(
            "/api/locations/:id/amounts",
            get(api::amounts_list).post(api::amounts_create),
        )
        .route("/api/amounts/:id", delete(api::amounts_delete))
        // Uploads
        .route("/api/uploads", get(api::uploads_list).post(api::uploads_create))
        .route("/api/uploads/:id/preview", get(api::upload_preview))
        // Scene
        .route("/api/neighborhood", get(api::neighborhood))
        // Extraction endpoint
        .route("/api/parse-pdf", post(api::parse_pdf))
        // Oversized selections must reach the pipeline's own validation
        .layer(DefaultBodyLimit::max(16 * 1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds the listener and serves until shutdown.
pub async fn run_server(state: Arc<AppState>, bind_addr: &str) -> crate::errors::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!("Listening on http://{bind_addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
