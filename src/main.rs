use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, ServerConfig};
use certificado_core::{CertificateService, CompositorConfig};

/// Main entry point for the Certificado server
///
/// Serves the certificate endpoint, the health check, the OpenAPI document and the client
/// bundle from one HTTP listener.
///
/// # Environment Variables
/// - `PORT`: listen port on all interfaces (default: 3000)
/// - `NODE_ENV`: `production` serves the bundle from `public`, anything else from `dist/public`
/// - `STATIC_DIR`: overrides the bundle root
/// - `CERTIFICATE_TEMPLATE_PATH`: template image (default: "client/public/certificate-template.png")
/// - `CERTIFICATE_FONT_DIR`: extra fonts loaded next to the system fonts
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - a configuration value is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("certificado_run=info".parse()?)
                .add_directive("api_rest=info".parse()?)
                .add_directive("certificado_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server_cfg = ServerConfig::from_env_values(
        std::env::var("PORT").ok(),
        std::env::var("NODE_ENV").ok(),
        std::env::var("STATIC_DIR").ok(),
    )?;
    let compositor_cfg = Arc::new(CompositorConfig::from_env_values(
        std::env::var("CERTIFICATE_TEMPLATE_PATH").ok(),
        std::env::var("CERTIFICATE_FONT_DIR").ok(),
    )?);

    if !compositor_cfg.template_path().is_file() {
        tracing::warn!(
            "Template {} not found; certificate requests will return 404 until it exists",
            compositor_cfg.template_path().display()
        );
    }

    let state = AppState {
        certificates: CertificateService::new(compositor_cfg),
    };
    let app = api_rest::router(state, Some(server_cfg.static_root()));

    let listener = tokio::net::TcpListener::bind(server_cfg.addr()).await?;
    tracing::info!(
        "++ Server running on http://localhost:{}/ (static root {})",
        server_cfg.port(),
        server_cfg.static_root().display()
    );
    axum::serve(listener, app).await?;

    Ok(())
}
