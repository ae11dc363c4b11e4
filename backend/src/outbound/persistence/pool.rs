//! Backend selection and connection setup.
//!
//! The presence of a `DATABASE_URL` value selects PostgreSQL; its absence
//! selects the embedded SQLite file. The choice is made once, at startup,
//! and the rest of the service only sees a [`Database`].

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use url::Url;

use super::postgres_backend::{PostgresBackend, PostgresPoolSizing};
use super::sqlite_backend::SqliteBackend;
use super::{Database, SqlError};

/// Environment variable holding the PostgreSQL connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Errors that can occur while building the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// The connection string is not a PostgreSQL URL.
    #[error("invalid database URL: {message}")]
    InvalidUrl { message: String },

    /// Failed to open the backend.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            message: message.into(),
        }
    }

    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

impl From<SqlError> for PoolError {
    fn from(value: SqlError) -> Self {
        Self::build(value.to_string())
    }
}

/// Which store the service talks to.
#[derive(Clone, PartialEq, Eq)]
pub enum BackendSelection {
    /// Networked PostgreSQL at `url`.
    Postgres { url: String },
    /// Embedded SQLite file at `path`.
    Sqlite { path: PathBuf },
}

impl std::fmt::Debug for BackendSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres { url } => f
                .debug_struct("Postgres")
                .field("url", &redact(url))
                .finish(),
            Self::Sqlite { path } => f.debug_struct("Sqlite").field("path", path).finish(),
        }
    }
}

/// Strip credentials from a connection string for logging.
fn redact(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "<unparseable>".to_owned(),
    }
}

impl BackendSelection {
    /// Decide the backend from an optional connection string.
    ///
    /// A blank value counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidUrl`] for values that are not
    /// `postgres://` or `postgresql://` URLs.
    ///
    /// # Examples
    /// ```
    /// use std::path::Path;
    /// use service_finder::outbound::persistence::BackendSelection;
    ///
    /// let local = BackendSelection::from_database_url(Some("  "), Path::new("app.db"))
    ///     .expect("blank selects SQLite");
    /// assert!(matches!(local, BackendSelection::Sqlite { .. }));
    ///
    /// assert!(BackendSelection::from_database_url(Some("mysql://x/y"), Path::new("app.db")).is_err());
    /// ```
    pub fn from_database_url(
        database_url: Option<&str>,
        sqlite_path: &Path,
    ) -> Result<Self, PoolError> {
        let Some(raw) = database_url.map(str::trim).filter(|value| !value.is_empty()) else {
            return Ok(Self::Sqlite {
                path: sqlite_path.to_path_buf(),
            });
        };

        let parsed = Url::parse(raw).map_err(|err| PoolError::invalid_url(err.to_string()))?;
        match parsed.scheme() {
            "postgres" | "postgresql" => Ok(Self::Postgres {
                url: raw.to_owned(),
            }),
            other => Err(PoolError::invalid_url(format!(
                "unsupported scheme '{other}', expected postgres or postgresql"
            ))),
        }
    }

    /// Read `DATABASE_URL` from the process environment.
    ///
    /// # Errors
    ///
    /// See [`BackendSelection::from_database_url`].
    pub fn from_env(sqlite_path: &Path) -> Result<Self, PoolError> {
        let value = std::env::var(DATABASE_URL_ENV).ok();
        Self::from_database_url(value.as_deref(), sqlite_path)
    }
}

/// Configuration for the store connection.
///
/// # Example
///
/// ```
/// use std::path::PathBuf;
/// use std::time::Duration;
/// use service_finder::outbound::persistence::{BackendSelection, PoolConfig};
///
/// let config = PoolConfig::new(BackendSelection::Sqlite { path: PathBuf::from("app.db") })
///     .with_max_size(4)
///     .with_acquire_timeout(Duration::from_secs(5));
/// assert_eq!(config.max_size(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    selection: BackendSelection,
    max_size: u32,
    min_idle: u32,
    acquire_timeout: Duration,
}

impl PoolConfig {
    /// Defaults: 10 connections, 1 idle, 30 second acquire timeout.
    pub fn new(selection: BackendSelection) -> Self {
        Self {
            selection,
            max_size: 10,
            min_idle: 1,
            acquire_timeout: Duration::from_secs(30),
        }
    }

    /// Upper bound on pooled connections.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn with_min_idle(mut self, min_idle: u32) -> Self {
        self.min_idle = min_idle;
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn selection(&self) -> &BackendSelection {
        &self.selection
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }
}

/// Open the selected backend and wrap it in a [`Database`].
///
/// Schema setup is deferred to the first query or to
/// [`Database::ensure_schema`].
///
/// # Errors
///
/// Returns [`PoolError::Build`] if the backend cannot be opened.
pub async fn connect(config: PoolConfig) -> Result<Database, PoolError> {
    let database = match &config.selection {
        BackendSelection::Postgres { url } => {
            let sizing = PostgresPoolSizing {
                max_connections: config.max_size,
                min_connections: config.min_idle.min(config.max_size),
                acquire_timeout: config.acquire_timeout,
            };
            let backend = PostgresBackend::connect(url, sizing).await?;
            Database::new(Arc::new(backend))
        }
        BackendSelection::Sqlite { path } => {
            let backend =
                SqliteBackend::open(path, config.max_size, config.acquire_timeout).await?;
            Database::new(Arc::new(backend))
        }
    };
    info!(selection = ?config.selection, "store connected");
    Ok(database)
}
