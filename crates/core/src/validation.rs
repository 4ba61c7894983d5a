//! Request validation.
//!
//! A certificate needs both a holder name and a tax id (CPF). The check is deliberately literal:
//! a value is missing when it is absent or the empty string. Whitespace-only values pass.

use crate::{CertificateError, CertificateResult};

/// A validated certificate request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRequest {
    name: String,
    tax_id: String,
}

impl CertificateRequest {
    /// Build a request from the raw query values.
    ///
    /// # Errors
    ///
    /// Returns [`CertificateError::MissingParameters`] if either value is `None` or empty.
    pub fn from_params(name: Option<&str>, tax_id: Option<&str>) -> CertificateResult<Self> {
        match (non_empty(name), non_empty(tax_id)) {
            (Some(name), Some(tax_id)) => Ok(Self {
                name: name.to_owned(),
                tax_id: tax_id.to_owned(),
            }),
            _ => Err(CertificateError::MissingParameters),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
