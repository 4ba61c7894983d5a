//! Mapping compositor failures onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use api_shared::ErrorRes;
use certificado_core::{CertificateError, ErrorKind};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Certificate(#[from] CertificateError),
    #[error("invalid Content-Disposition header: {0}")]
    Header(#[from] axum::http::header::InvalidHeaderValue),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Certificate(e) => match e.kind() {
                ErrorKind::MissingParameters => StatusCode::BAD_REQUEST,
                ErrorKind::TemplateNotFound => StatusCode::NOT_FOUND,
                ErrorKind::RenderingFailure => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Header(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorRes {
        match self.status() {
            StatusCode::BAD_REQUEST => ErrorRes::missing_parameters(),
            StatusCode::NOT_FOUND => ErrorRes::template_not_found(),
            _ => ErrorRes::generation_failed(self.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match status {
            StatusCode::BAD_REQUEST => tracing::debug!("Certificate request rejected: {}", self),
            StatusCode::NOT_FOUND => tracing::warn!("Certificate template missing: {}", self),
            _ => tracing::error!("Certificate generation error: {:?}", self),
        }
        (status, Json(self.body())).into_response()
    }
}
