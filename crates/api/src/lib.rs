//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for deposit requests and accounts
//! - Error-to-response mapping
//! - Extractors that reject malformed input with the JSON error envelope
//! - Request/response types

pub mod error;
pub mod extract;
pub mod routes;

use axum::Router;
use backoffice_core::BackOffice;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ApiResult};

/// Application state shared across handlers.
///
/// Every handler takes the lock once, so operations apply atomically and in
/// the order their requests acquire it.
#[derive(Clone, Default)]
pub struct AppState {
    /// The canonical back-office data.
    pub office: Arc<RwLock<BackOffice>>,
}

impl AppState {
    /// Wraps a back-office for sharing across handlers.
    #[must_use]
    pub fn new(office: BackOffice) -> Self {
        Self {
            office: Arc::new(RwLock::new(office)),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
