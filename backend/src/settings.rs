//! Server settings loaded via OrthoConfig.
//!
//! Values come from `SERVICE_FINDER_*` environment variables or the matching
//! command-line flags. The backend itself is chosen by `DATABASE_URL`; see
//! [`crate::outbound::persistence::BackendSelection`].

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_SQLITE_PATH: &str = "service_finder.db";

/// Listener and store settings for the HTTP server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SERVICE_FINDER")]
pub struct ServerSettings {
    /// Interface the listener binds to. Defaults to [`DEFAULT_HOST`].
    pub host: Option<String>,
    /// TCP port the listener binds to.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// SQLite file used when `DATABASE_URL` is absent. Defaults to
    /// [`DEFAULT_SQLITE_PATH`].
    pub sqlite_path: Option<PathBuf>,
    /// Upper bound on pooled store connections.
    #[ortho_config(default = 10)]
    pub max_connections: u32,
}

/// Errors raised while interpreting [`ServerSettings`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServerSettingsError {
    #[error("invalid host '{host}': {message}")]
    InvalidHost { host: String, message: String },
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn sqlite_path(&self) -> PathBuf {
        self.sqlite_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SQLITE_PATH))
    }

    /// Socket address built from `host` and `port`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerSettingsError::InvalidHost`] when `host` is not an IP
    /// address.
    ///
    /// # Examples
    /// ```
    /// use service_finder::settings::ServerSettings;
    ///
    /// let settings = ServerSettings {
    ///     host: Some("127.0.0.1".into()),
    ///     ..ServerSettings::default()
    /// };
    /// assert_eq!(settings.bind_addr().expect("valid host").port(), 3000);
    /// ```
    pub fn bind_addr(&self) -> Result<SocketAddr, ServerSettingsError> {
        let host = self.host();
        let ip: IpAddr = host.trim().parse().map_err(|err: std::net::AddrParseError| {
            ServerSettingsError::InvalidHost {
                host: host.to_owned(),
                message: err.to_string(),
            }
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: None,
            port: 3000,
            sqlite_path: None,
            max_connections: 10,
        }
    }
}
