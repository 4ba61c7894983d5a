//! # API REST
//!
//! REST API for certificate generation.
//!
//! Handles:
//! - HTTP endpoints with axum (`/api/certificate`, `/health`)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON error bodies, headers, CORS, request tracing)
//! - Serving the client bundle, with `index.html` for unmatched routes
//!
//! Uses `api-shared` for wire types and `certificado-core` for the compositing pipeline.

#![warn(rust_2018_idioms)]

pub mod config;
pub mod error;
pub mod handlers;

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{ErrorRes, HealthRes};
use certificado_core::CertificateService;

pub use config::ServerConfig;
pub use error::ApiError;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub certificates: CertificateService,
}

#[derive(OpenApi)]
#[openapi(
    paths(handlers::health, handlers::generate_certificate),
    components(schemas(HealthRes, ErrorRes))
)]
pub struct ApiDoc;

/// Build the application router.
///
/// When `static_root` is given, requests matching no route are served from it, falling back to
/// its `index.html` so client-side routes resolve.
pub fn router(state: AppState, static_root: Option<&Path>) -> Router {
    let mut app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/certificate", get(handlers::generate_certificate))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    if let Some(root) = static_root {
        let index = root.join("index.html");
        app = app.fallback_service(ServeDir::new(root).fallback(ServeFile::new(index)));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
