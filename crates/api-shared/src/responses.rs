//! JSON error bodies returned by the certificate endpoint.
//!
//! The messages are user facing and in Portuguese, matching the client.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MISSING_PARAMETERS_MESSAGE: &str = "Parâmetros obrigatórios: nome e cpf";
pub const MISSING_PARAMETERS_EXAMPLE: &str = "/api/certificate?nome=João Silva&cpf=123.456.789-00";
pub const TEMPLATE_NOT_FOUND_MESSAGE: &str = "Arquivo template não encontrado";
pub const GENERATION_FAILED_MESSAGE: &str = "Falha ao gerar certificado";

/// Error body. `example` accompanies validation errors, `details` accompanies server errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorRes {
    pub fn missing_parameters() -> Self {
        Self {
            error: MISSING_PARAMETERS_MESSAGE.into(),
            example: Some(MISSING_PARAMETERS_EXAMPLE.into()),
            details: None,
        }
    }

    pub fn template_not_found() -> Self {
        Self {
            error: TEMPLATE_NOT_FOUND_MESSAGE.into(),
            example: None,
            details: None,
        }
    }

    pub fn generation_failed(details: impl Into<String>) -> Self {
        Self {
            error: GENERATION_FAILED_MESSAGE.into(),
            example: None,
            details: Some(details.into()),
        }
    }
}
