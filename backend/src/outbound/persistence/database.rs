//! Shared store handle passed explicitly to every repository.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;

use super::placeholders::translate_placeholders;
use super::schema::schema_statements;
use super::{Dialect, SqlBackend, SqlError, SqlExecution, SqlRow, SqlValue};

/// Cheaply clonable handle over one SQL backend.
///
/// Every query first makes sure the schema exists. Setup runs once per
/// handle family (clones share it) even when the first queries race.
#[derive(Clone)]
pub struct Database {
    backend: Arc<dyn SqlBackend>,
    schema_ready: Arc<OnceCell<()>>,
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("dialect", &self.backend.dialect())
            .field("schema_ready", &self.schema_ready.initialized())
            .finish()
    }
}

impl Database {
    pub fn new(backend: Arc<dyn SqlBackend>) -> Self {
        Self {
            backend,
            schema_ready: Arc::new(OnceCell::new()),
        }
    }

    pub fn dialect(&self) -> Dialect {
        self.backend.dialect()
    }

    /// Create missing tables and indexes.
    ///
    /// # Errors
    ///
    /// Returns the first DDL failure. A failed setup is retried by the next
    /// caller.
    pub async fn ensure_schema(&self) -> Result<(), SqlError> {
        self.schema_ready
            .get_or_try_init(|| async {
                let dialect = self.backend.dialect();
                for statement in schema_statements(dialect) {
                    self.backend.execute(&statement, &[]).await?;
                }
                debug!(%dialect, "schema ready");
                Ok(())
            })
            .await
            .map(|_| ())
    }

    /// Run schema setup, then `f` with this handle.
    ///
    /// # Examples
    /// ```no_run
    /// use service_finder::outbound::persistence::{Database, SqlError};
    ///
    /// # async fn run(db: Database) -> Result<(), SqlError> {
    /// let count = db
    ///     .with_schema_setup(|db| async move {
    ///         let row = db.fetch_one("SELECT COUNT(*) AS n FROM providers", &[]).await?;
    ///         row.map_or(Ok(0), |row| row.integer("n"))
    ///     })
    ///     .await?;
    /// # let _ = count;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_schema_setup<F, Fut, T>(&self, f: F) -> Result<T, SqlError>
    where
        F: FnOnce(Database) -> Fut,
        Fut: Future<Output = Result<T, SqlError>>,
    {
        self.ensure_schema().await?;
        f(self.clone()).await
    }

    pub async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<SqlExecution, SqlError> {
        self.ensure_schema().await?;
        let sql = translate_placeholders(sql, self.dialect());
        self.backend.execute(&sql, params).await
    }

    pub async fn fetch_one(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<Option<SqlRow>, SqlError> {
        self.ensure_schema().await?;
        let sql = translate_placeholders(sql, self.dialect());
        self.backend.fetch_one(&sql, params).await
    }

    pub async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<SqlRow>, SqlError> {
        self.ensure_schema().await?;
        let sql = translate_placeholders(sql, self.dialect());
        self.backend.fetch_all(&sql, params).await
    }
}
