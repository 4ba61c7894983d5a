use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;
use utoipa::IntoParams;

use api_shared::{ErrorRes, HealthRes, HealthService};
use certificado_core::constants::PNG_CONTENT_TYPE;

use crate::error::ApiError;
use crate::AppState;

/// Query string of the certificate endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CertificateQuery {
    /// Holder name, printed upper-cased.
    pub nome: Option<String>,
    /// Tax id (CPF), printed as given.
    pub cpf: Option<String>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint.
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/certificate",
    params(CertificateQuery),
    responses(
        (status = 200, description = "PNG certificate sent as an attachment"),
        (status = 400, description = "nome or cpf missing", body = ErrorRes),
        (status = 404, description = "Template asset not found", body = ErrorRes),
        (status = 500, description = "Rendering failed", body = ErrorRes)
    )
)]
/// Generate a personalised certificate image.
///
/// Overlays the upper-cased name and the CPF onto the certificate template and returns the
/// composited PNG with a `certificado-<name>.png` attachment file name.
///
/// # Errors
/// - `400 Bad Request` if `nome` or `cpf` is missing or empty, or the query is malformed.
/// - `404 Not Found` if the template asset is absent.
/// - `500 Internal Server Error` if reading, decoding, compositing or encoding fails.
pub async fn generate_certificate(
    State(state): State<AppState>,
    query: Result<Query<CertificateQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            tracing::debug!("Unparseable certificate query: {}", rejection);
            CertificateQuery::default()
        }
    };

    let certificate = state
        .certificates
        .generate(query.nome.as_deref(), query.cpf.as_deref())
        .await?;

    tracing::info!(
        "Generated {} ({} bytes)",
        certificate.filename,
        certificate.png.len()
    );

    let disposition = HeaderValue::from_bytes(certificate.content_disposition.as_bytes())?;
    Ok((
        [
            (CONTENT_TYPE, HeaderValue::from_static(PNG_CONTENT_TYPE)),
            (CONTENT_DISPOSITION, disposition),
        ],
        certificate.png,
    )
        .into_response())
}
