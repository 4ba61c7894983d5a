//! # Certificado Core
//!
//! Core logic for generating personalised certificate images.
//!
//! This crate contains the compositing pipeline and nothing transport-specific:
//! - Request validation (`nome`/`cpf`)
//! - Template asset loading with a dimension fallback
//! - SVG overlay construction from a fixed layout, with markup escaping
//! - Rasterising the overlay onto the template and PNG encoding
//!
//! **No API concerns**: HTTP status codes, JSON bodies and routing belong in `api-rest`.

pub mod compositor;
pub mod config;
pub mod constants;
pub mod error;
pub mod filename;
pub mod layout;
pub mod markup;
pub mod overlay;
pub mod template;
pub mod validation;

pub use compositor::Compositor;
pub use config::CompositorConfig;
pub use error::{CertificateError, CertificateResult, ConfigError, ErrorKind};
pub use filename::{attachment_filename, content_disposition};
pub use layout::CertificateLayout;
pub use markup::escape_markup;
pub use overlay::OverlayMarkup;
pub use template::TemplateAsset;
pub use validation::CertificateRequest;

use std::sync::Arc;

/// A rendered certificate ready to be sent or written.
#[derive(Debug, Clone)]
pub struct Certificate {
    /// File name offered for download, e.g. `certificado-João-Silva.png`.
    pub filename: String,
    /// Full `Content-Disposition` header value.
    pub content_disposition: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Certificate generation. Stateless apart from immutable configuration and fonts.
#[derive(Clone, Debug)]
pub struct CertificateService {
    cfg: Arc<CompositorConfig>,
    layout: Arc<CertificateLayout>,
    compositor: Compositor,
}

impl CertificateService {
    /// Create a service using the standard layout and fonts loaded from `cfg`.
    pub fn new(cfg: Arc<CompositorConfig>) -> Self {
        let compositor = Compositor::new(cfg.build_font_database());
        Self::with_compositor(cfg, compositor)
    }

    pub fn with_compositor(cfg: Arc<CompositorConfig>, compositor: Compositor) -> Self {
        Self {
            cfg,
            layout: Arc::new(CertificateLayout::standard()),
            compositor,
        }
    }

    /// Validate, load the template, and render the certificate.
    ///
    /// Template existence is checked and the file read on the async runtime; decoding,
    /// compositing and encoding run on the blocking pool.
    ///
    /// # Errors
    ///
    /// - [`CertificateError::MissingParameters`] before any file I/O.
    /// - [`CertificateError::TemplateNotFound`] before any decode.
    /// - Any other variant for read/decode/render/encode failures, including a panicked
    ///   render task.
    pub async fn generate(
        &self,
        name: Option<&str>,
        tax_id: Option<&str>,
    ) -> CertificateResult<Certificate> {
        let request = CertificateRequest::from_params(name, tax_id)?;
        let template = TemplateAsset::load(self.cfg.template_path()).await?;

        let layout = self.layout.clone();
        let compositor = self.compositor.clone();
        tokio::task::spawn_blocking(move || render(&compositor, &layout, &request, &template))
            .await
            .map_err(|e| CertificateError::RenderTask(e.to_string()))?
    }

    /// Blocking variant of [`CertificateService::generate`] for use outside a runtime.
    pub fn generate_blocking(
        &self,
        name: Option<&str>,
        tax_id: Option<&str>,
    ) -> CertificateResult<Certificate> {
        let request = CertificateRequest::from_params(name, tax_id)?;
        let template = TemplateAsset::load_blocking(self.cfg.template_path())?;
        render(&self.compositor, &self.layout, &request, &template)
    }
}

/// Build the overlay against the template's dimensions and composite it.
pub fn render(
    compositor: &Compositor,
    layout: &CertificateLayout,
    request: &CertificateRequest,
    template: &TemplateAsset,
) -> CertificateResult<Certificate> {
    let (width, height) = template.dimensions_or_default();
    let overlay = OverlayMarkup::build(layout, request, width, height);
    let png = compositor.composite(template, &overlay)?;

    tracing::debug!(
        "rendered certificate {}x{} ({} bytes)",
        width,
        height,
        png.len()
    );

    Ok(Certificate {
        filename: attachment_filename(request.name()),
        content_disposition: content_disposition(request.name()),
        width,
        height,
        png,
    })
}
