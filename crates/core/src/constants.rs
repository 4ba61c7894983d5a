//! Constants used throughout the certificate compositor.
//!
//! The coordinates and styles here are tied to the visual layout of the single certificate
//! template asset. They are not configurable per request.

/// Default location of the certificate template, relative to the working directory.
pub const DEFAULT_TEMPLATE_PATH: &str = "client/public/certificate-template.png";

/// Width used for the overlay when the template header yields no dimensions.
pub const FALLBACK_TEMPLATE_WIDTH: u32 = 400;

/// Height used for the overlay when the template header yields no dimensions.
pub const FALLBACK_TEMPLATE_HEIGHT: u32 = 600;

/// Font family stack used by every text run.
pub const OVERLAY_FONT_FAMILY: &str = "Arial, sans-serif";

/// Fill colour of the fields printed next to the "NOME:" and "CPF:" labels.
pub const FIELD_FILL: &str = "#003366";

/// Fill colour of the card holder name.
pub const HOLDER_FILL: &str = "white";

/// Prefix of the downloaded file name.
pub const FILENAME_PREFIX: &str = "certificado-";

/// Extension of the downloaded file name.
pub const FILENAME_EXTENSION: &str = ".png";

/// MIME type of the composited output.
pub const PNG_CONTENT_TYPE: &str = "image/png";
