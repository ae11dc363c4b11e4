//! Networked PostgreSQL backend.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::{Column, Postgres, Row, TypeInfo};

use super::sqlx_errors::classify;
use super::{Dialect, SqlBackend, SqlError, SqlExecution, SqlRow, SqlValue};

/// PostgreSQL store reached through a connection pool.
#[derive(Debug, Clone)]
pub struct PostgresBackend {
    pool: PgPool,
}

/// Pool sizing for [`PostgresBackend::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostgresPoolSizing {
    /// Upper bound on open connections.
    pub max_connections: u32,
    /// Connections kept open while idle.
    pub min_connections: u32,
    /// How long a query waits for a free connection.
    pub acquire_timeout: Duration,
}

impl PostgresBackend {
    /// Connect to `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Connection`] when the server is unreachable or
    /// rejects the credentials.
    pub async fn connect(database_url: &str, sizing: PostgresPoolSizing) -> Result<Self, SqlError> {
        let pool = PgPoolOptions::new()
            .max_connections(sizing.max_connections.max(1))
            .min_connections(sizing.min_connections)
            .acquire_timeout(sizing.acquire_timeout)
            .connect(database_url)
            .await
            .map_err(|err| match classify(err) {
                SqlError::Query { message } => SqlError::connection(message),
                other => other,
            })?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    // NULL parameters are sent as untyped text; callers avoid binding NULL
    // into non-text columns.
    fn bind<'q>(
        sql: &'q str,
        params: &'q [SqlValue],
    ) -> sqlx::query::Query<'q, Postgres, PgArguments> {
        params
            .iter()
            .fold(sqlx::query(sql), |query, param| match param {
                SqlValue::Null => query.bind(None::<String>),
                SqlValue::Integer(value) => query.bind(*value),
                SqlValue::Real(value) => query.bind(*value),
                SqlValue::Text(value) => query.bind(value.as_str()),
            })
    }
}

fn decode_column<T, F>(row: &PgRow, index: usize, wrap: F) -> Result<SqlValue, SqlError>
where
    T: for<'r> sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
    F: FnOnce(T) -> SqlValue,
{
    let value: Option<T> = row.try_get(index).map_err(classify)?;
    Ok(value.map_or(SqlValue::Null, wrap))
}

fn decode_row(row: &PgRow) -> Result<SqlRow, SqlError> {
    let mut columns = Vec::with_capacity(row.columns().len());
    for column in row.columns() {
        let index = column.ordinal();
        let name = column.name().to_owned();
        let value = match column.type_info().name() {
            "INT8" => decode_column::<i64, _>(row, index, SqlValue::Integer)?,
            "INT4" => decode_column::<i32, _>(row, index, |v| SqlValue::Integer(i64::from(v)))?,
            "INT2" => decode_column::<i16, _>(row, index, |v| SqlValue::Integer(i64::from(v)))?,
            "BOOL" => decode_column::<bool, _>(row, index, |v| SqlValue::Integer(i64::from(v)))?,
            "FLOAT8" => decode_column::<f64, _>(row, index, SqlValue::Real)?,
            "FLOAT4" => decode_column::<f32, _>(row, index, |v| SqlValue::Real(f64::from(v)))?,
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => {
                decode_column::<String, _>(row, index, SqlValue::Text)?
            }
            other => {
                return Err(SqlError::decode(
                    name,
                    format!("unsupported PostgreSQL type {other}"),
                ));
            }
        };
        columns.push((name, value));
    }
    Ok(SqlRow::new(columns))
}

#[async_trait]
impl SqlBackend for PostgresBackend {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<SqlExecution, SqlError> {
        let result = Self::bind(sql, params)
            .execute(&self.pool)
            .await
            .map_err(classify)?;
        Ok(SqlExecution {
            rows_affected: result.rows_affected(),
            last_insert_id: None,
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
