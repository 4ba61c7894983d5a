//! HTTP server configuration.
//!
//! Resolved once at startup from optional raw values so handlers never read the environment.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use certificado_core::ConfigError;

/// Port used when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Static bundle root in production builds.
pub const PRODUCTION_STATIC_DIR: &str = "public";

/// Static bundle root everywhere else.
pub const DEVELOPMENT_STATIC_DIR: &str = "dist/public";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    port: u16,
    static_root: PathBuf,
}

impl ServerConfig {
    pub fn new(port: u16, static_root: PathBuf) -> Self {
        Self { port, static_root }
    }

    /// Build from `PORT`, `NODE_ENV` and `STATIC_DIR` values.
    ///
    /// `STATIC_DIR` wins over the `NODE_ENV` selection when set.
    pub fn from_env_values(
        port: Option<String>,
        node_env: Option<String>,
        static_dir: Option<String>,
    ) -> Result<Self, ConfigError> {
        let port = match non_blank(port) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: raw,
            })?,
            None => DEFAULT_PORT,
        };

        let static_root = match non_blank(static_dir) {
            Some(dir) => PathBuf::from(dir),
            None if non_blank(node_env).as_deref() == Some("production") => {
                PathBuf::from(PRODUCTION_STATIC_DIR)
            }
            None => PathBuf::from(DEVELOPMENT_STATIC_DIR),
        };

        Ok(Self::new(port, static_root))
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `0.0.0.0:<port>`.
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    pub fn static_root(&self) -> &Path {
        &self.static_root
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
