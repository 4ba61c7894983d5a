//! Compositor runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into [`CertificateService`]
//! so request handling never reads process-wide environment variables.
//!
//! [`CertificateService`]: crate::CertificateService

use std::path::{Path, PathBuf};
use std::sync::Arc;

use usvg::fontdb;

use crate::constants::DEFAULT_TEMPLATE_PATH;
use crate::ConfigError;

/// Compositor configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CompositorConfig {
    template_path: PathBuf,
    font_dir: Option<PathBuf>,
}

impl CompositorConfig {
    /// Create a new `CompositorConfig`.
    ///
    /// The template path is not checked here: a missing template is reported per request.
    /// `font_dir`, when given, must be a directory.
    pub fn new(template_path: PathBuf, font_dir: Option<PathBuf>) -> Result<Self, ConfigError> {
        if let Some(dir) = &font_dir {
            if !dir.is_dir() {
                return Err(ConfigError::FontDirNotFound(dir.clone()));
            }
        }

        Ok(Self {
            template_path,
            font_dir,
        })
    }

    /// Build configuration from optional raw values (typically environment variables).
    ///
    /// Empty or whitespace-only values count as unset.
    pub fn from_env_values(
        template_path: Option<String>,
        font_dir: Option<String>,
    ) -> Result<Self, ConfigError> {
        let template_path = non_blank(template_path)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_PATH));
        let font_dir = non_blank(font_dir).map(PathBuf::from);
        Self::new(template_path, font_dir)
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }

    pub fn font_dir(&self) -> Option<&Path> {
        self.font_dir.as_deref()
    }

    /// Load system fonts plus any fonts in the configured font directory.
    pub fn build_font_database(&self) -> Arc<fontdb::Database> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        if let Some(dir) = &self.font_dir {
            load_fonts_from_dir(&mut db, dir);
        }

        report_font_faces(&db);
        Arc::new(db)
    }
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from(DEFAULT_TEMPLATE_PATH),
            font_dir: None,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Log the face count; an empty database means every certificate comes back without text.
fn report_font_faces(db: &fontdb::Database) -> tracing::Level {
    if db.len() == 0 {
        tracing::warn!("font database is empty; certificate text will not be rendered");
        tracing::Level::WARN
    } else {
        tracing::info!("font database ready with {} faces", db.len());
        tracing::Level::INFO
    }
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!("could not read font directory {}", dir.display());
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!("skipping font {}: {}", path.display(), e);
        }
    }
}
