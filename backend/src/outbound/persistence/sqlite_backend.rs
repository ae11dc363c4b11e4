//! Embedded SQLite backend.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Column, Row, Sqlite, TypeInfo, ValueRef};

use super::sqlx_errors::classify;
use super::{Dialect, SqlBackend, SqlError, SqlExecution, SqlRow, SqlValue};

/// SQLite store backed by a file, created on first use.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Open (or create) the database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Connection`] when the file cannot be opened.
    pub async fn open(
        path: &Path,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, SqlError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(acquire_timeout)
            .connect_with(options)
            .await
            .map_err(|err| SqlError::connection(format!("{}: {err}", path.display())))?;
        Ok(Self { pool })
    }

    /// Private in-memory database living as long as the backend.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Connection`] if SQLite cannot be initialised.
    pub async fn in_memory() -> Result<Self, SqlError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(classify)?
            .foreign_keys(true);
        // One connection that never expires; each new connection would see a fresh database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(classify)?;
        Ok(Self { pool })
    }

    fn bind<'q>(
        sql: &'q str,
        params: &'q [SqlValue],
    ) -> sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>> {
        params
            .iter()
            .fold(sqlx::query(sql), |query, param| match param {
                SqlValue::Null => query.bind(None::<i64>),
                SqlValue::Integer(value) => query.bind(*value),
                SqlValue::Real(value) => query.bind(*value),
                SqlValue::Text(value) => query.bind(value.as_str()),
            })
    }
}

fn decode_row(row: &SqliteRow) -> Result<SqlRow, SqlError> {
    let mut columns = Vec::with_capacity(row.columns().len());
    for column in row.columns() {
        let index = column.ordinal();
        let name = column.name().to_owned();
        let (is_null, type_name) = {
            let raw = row.try_get_raw(index).map_err(classify)?;
            (raw.is_null(), raw.type_info().name().to_owned())
        };
        let value = if is_null {
            SqlValue::Null
        } else {
            match type_name.as_str() {
                "INTEGER" => SqlValue::Integer(row.try_get(index).map_err(classify)?),
                "REAL" => SqlValue::Real(row.try_get(index).map_err(classify)?),
                "TEXT" => SqlValue::Text(row.try_get(index).map_err(classify)?),
                other => {
                    return Err(SqlError::decode(name, format!("unsupported SQLite type {other}")));
                }
            }
        };
        columns.push((name, value));
    }
    Ok(SqlRow::new(columns))
}

#[async_trait]
impl SqlBackend for SqliteBackend {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<SqlExecution, SqlError> {
        let result = Self::bind(sql, params)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(SqlExecution {
            rows_affected: result.rows_affected(),
            last_insert_id: Some(result.last_insert_rowid()),
        })
    }

    async fn fetch_one(&self, sql: &str, params: &[SqlValue]) -> Result<Option<SqlRow>, SqlError> {
        let row = Self::bind(sql, params)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?;
        row.as_ref().map(decode_row).transpose()
    }

    async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<SqlRow>, SqlError> {
        let rows = Self::bind(sql, params)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)?;
        rows.iter().map(decode_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn rows_decode_by_runtime_type() {
        let backend = SqliteBackend::in_memory().await.expect("sqlite opens");
        let row = backend
            .fetch_one(
                "SELECT 1 AS i, 2.5 AS r, 'x' AS t, NULL AS n",
                &[],
            )
            .await
            .expect("query runs")
            .expect("one row");

        assert_eq!(row.integer("i"), Ok(1));
        assert_eq!(row.real("r"), Ok(2.5));
        assert_eq!(row.text("t"), Ok("x".to_owned()));
        assert_eq!(row.get("n"), Ok(&SqlValue::Null));
    }

    #[rstest]
    #[tokio::test]
    async fn parameters_bind_positionally() {
        let backend = SqliteBackend::in_memory().await.expect("sqlite opens");
        let row = backend
            .fetch_one(
                "SELECT ? AS a, ? AS b",
                &[SqlValue::Text("first".to_owned()), SqlValue::Integer(2)],
            )
            .await
            .expect("query runs")
            .expect("one row");

        assert_eq!(row.text("a"), Ok("first".to_owned()));
        assert_eq!(row.integer("b"), Ok(2));
    }

    #[rstest]
    #[tokio::test]
    async fn unique_violations_are_classified() {
        let backend = SqliteBackend::in_memory().await.expect("sqlite opens");
        backend
            .execute("CREATE TABLE t (email TEXT UNIQUE)", &[])
            .await
            .expect("create table");
        backend
            .execute("INSERT INTO t (email) VALUES ('a@b')", &[])
            .await
            .expect("first insert");

        let error = backend
            .execute("INSERT INTO t (email) VALUES ('a@b')", &[])
            .await
            .expect_err("duplicate insert");
        assert!(matches!(error, SqlError::UniqueViolation { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let backend = SqliteBackend::in_memory().await.expect("sqlite opens");
        backend
            .execute("CREATE TABLE parent (id INTEGER PRIMARY KEY)", &[])
            .await
            .expect("create parent");
        backend
            .execute(
                "CREATE TABLE child (parent_id INTEGER NOT NULL REFERENCES parent(id))",
                &[],
            )
            .await
            .expect("create child");

        let error = backend
            .execute("INSERT INTO child (parent_id) VALUES (?)", &[SqlValue::Integer(9)])
            .await
            .expect_err("dangling reference");
        assert!(matches!(error, SqlError::ForeignKeyViolation { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn files_are_created_on_open() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("store.db");
        let backend = SqliteBackend::open(&path, 2, Duration::from_secs(5))
            .await
            .expect("sqlite opens");
        backend.execute("CREATE TABLE t (x INTEGER)", &[]).await.expect("ddl");
        assert!(path.exists());
    }
}
