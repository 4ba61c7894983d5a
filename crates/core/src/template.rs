//! Template asset loading.
//!
//! The template is read from disk on every request and never cached. Existence is checked
//! before any read or decode so a missing asset is reported as such rather than as a decode
//! failure.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::constants::{FALLBACK_TEMPLATE_HEIGHT, FALLBACK_TEMPLATE_WIDTH};
use crate::{CertificateError, CertificateResult};

/// Raw bytes of the certificate template, as read from disk.
#[derive(Debug, Clone)]
pub struct TemplateAsset {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl TemplateAsset {
    /// Check that `path` exists, then read it.
    ///
    /// # Errors
    ///
    /// - [`CertificateError::TemplateNotFound`] if nothing exists at `path`.
    /// - [`CertificateError::TemplateRead`] if the existence check or the read fails.
    pub async fn load(path: &Path) -> CertificateResult<Self> {
        match tokio::fs::try_exists(path).await {
            Ok(true) => {}
            Ok(false) => {
                return Err(CertificateError::TemplateNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(CertificateError::TemplateRead(e)),
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(CertificateError::TemplateRead)?;

        Ok(Self {
            path: path.to_path_buf(),
            bytes,
        })
    }

    /// Synchronous variant of [`TemplateAsset::load`] for callers outside a runtime.
    pub fn load_blocking(path: &Path) -> CertificateResult<Self> {
        match path.try_exists() {
            Ok(true) => {}
            Ok(false) => {
                return Err(CertificateError::TemplateNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(CertificateError::TemplateRead(e)),
        }

        let bytes = std::fs::read(path).map_err(CertificateError::TemplateRead)?;
        Ok(Self {
            path: path.to_path_buf(),
            bytes,
        })
    }

    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Pixel dimensions from the image header, without decoding pixel data.
    ///
    /// Returns `None` when the format is unknown, the header is unreadable or either side is
    /// zero.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        let reader = image::ImageReader::new(Cursor::new(self.bytes.as_slice()))
            .with_guessed_format()
            .ok()?;
        match reader.into_dimensions() {
            Ok((width, height)) if width > 0 && height > 0 => Some((width, height)),
            _ => None,
        }
    }

    /// Like [`TemplateAsset::dimensions`], substituting 400x600 when unavailable.
    pub fn dimensions_or_default(&self) -> (u32, u32) {
        self.dimensions().unwrap_or_else(|| {
            tracing::warn!(
                "template {} has no readable dimensions, using {}x{}",
                self.path.display(),
                FALLBACK_TEMPLATE_WIDTH,
                FALLBACK_TEMPLATE_HEIGHT
            );
            (FALLBACK_TEMPLATE_WIDTH, FALLBACK_TEMPLATE_HEIGHT)
        })
    }

    /// Decode the full image into straight-alpha RGBA8.
    pub fn decode(&self) -> CertificateResult<image::RgbaImage> {
        let img =
            image::load_from_memory(&self.bytes).map_err(CertificateError::TemplateDecode)?;
        Ok(img.to_rgba8())
    }
}
