use std::path::PathBuf;

/// Coarse classification of a [`CertificateError`].
///
/// Transports map these to their own status codes; the compositor never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller omitted `nome` or `cpf` (or sent them empty).
    MissingParameters,
    /// The template asset is absent from the configured location.
    TemplateNotFound,
    /// Reading, decoding, compositing or encoding failed.
    RenderingFailure,
}

#[derive(Debug, thiserror::Error)]
pub enum CertificateError {
    #[error("missing required parameters: nome and cpf")]
    MissingParameters,
    #[error("template not found: {path}", path = path.display())]
    TemplateNotFound { path: PathBuf },
    #[error("failed to read template: {0}")]
    TemplateRead(std::io::Error),
    #[error("failed to decode template: {0}")]
    TemplateDecode(image::ImageError),
    #[error("failed to parse overlay markup: {0}")]
    OverlayParse(usvg::Error),
    #[error("failed to prepare canvas: {0}")]
    Canvas(String),
    #[error("failed to encode png: {0}")]
    Encode(image::ImageError),
    #[error("render task failed: {0}")]
    RenderTask(String),
}

impl CertificateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingParameters => ErrorKind::MissingParameters,
            Self::TemplateNotFound { .. } => ErrorKind::TemplateNotFound,
            Self::TemplateRead(_)
            | Self::TemplateDecode(_)
            | Self::OverlayParse(_)
            | Self::Canvas(_)
            | Self::Encode(_)
            | Self::RenderTask(_) => ErrorKind::RenderingFailure,
        }
    }
}

pub type CertificateResult<T> = std::result::Result<T, CertificateError>;

/// Errors raised while resolving configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("font directory is not a directory: {0}")]
    FontDirNotFound(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_group_render_failures() {
        assert_eq!(
            CertificateError::MissingParameters.kind(),
            ErrorKind::MissingParameters
        );
        assert_eq!(
            CertificateError::TemplateNotFound {
                path: PathBuf::from("x.png")
            }
            .kind(),
            ErrorKind::TemplateNotFound
        );
        assert_eq!(
            CertificateError::Canvas("zero size".into()).kind(),
            ErrorKind::RenderingFailure
        );
        assert_eq!(
            CertificateError::TemplateRead(std::io::Error::other("boom")).kind(),
            ErrorKind::RenderingFailure
        );
    }

    #[test]
    fn display_keeps_the_cause() {
        let err = CertificateError::TemplateRead(std::io::Error::other("disk on fire"));
        assert!(err.to_string().contains("disk on fire"));
    }
}
