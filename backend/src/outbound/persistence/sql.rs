//! Backend-neutral SQL contract shared by the SQLite and PostgreSQL adapters.
//!
//! Repositories speak in `?` placeholders and [`SqlValue`] parameters; the
//! [`Database`](super::Database) handle rewrites placeholders for the active
//! [`Dialect`] before a [`SqlBackend`] sees the statement.

use std::fmt;

use async_trait::async_trait;

/// SQL flavour of the active backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Embedded file-backed store.
    Sqlite,
    /// Networked PostgreSQL server.
    Postgres,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
        })
    }
}

/// Parameter and column value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL `NULL`.
    Null,
    /// 64-bit integer; booleans and smaller integer columns widen to this.
    Integer(i64),
    /// Double precision float.
    Real(f64),
    /// UTF-8 text, including ISO dates.
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Errors raised by SQL backends, classified by database error kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SqlError {
    /// The store could not be reached, or the pool gave up waiting.
    #[error("database connection failed: {message}")]
    Connection { message: String },
    /// A `UNIQUE` constraint rejected the write.
    #[error("unique constraint violated: {message}")]
    UniqueViolation { message: String },
    /// A write referenced a row that does not exist.
    #[error("foreign key constraint violated: {message}")]
    ForeignKeyViolation { message: String },
    /// A `NOT NULL` or `CHECK` constraint rejected the write.
    #[error("constraint violated: {message}")]
    ConstraintViolation { message: String },
    /// Any other statement failure.
    #[error("query failed: {message}")]
    Query { message: String },
    /// A column held a value of an unexpected type or an unexpected `NULL`.
    #[error("column {column} could not be decoded: {message}")]
    Decode { column: String, message: String },
    /// The result set has no column of this name.
    #[error("column {column} missing from result")]
    MissingColumn { column: String },
}

impl SqlError {
    /// Convenience constructor for [`SqlError::Connection`].
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`SqlError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Convenience constructor for [`SqlError::Decode`].
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }
}

/// Outcome of a statement that returns no rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SqlExecution {
    /// Rows inserted, updated or deleted by the statement.
    pub rows_affected: u64,
    /// Rowid of the last insert; only the embedded backend reports it.
    pub last_insert_id: Option<i64>,
}

/// One result row as ordered `(column, value)` pairs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlRow {
    columns: Vec<(String, SqlValue)>,
}

impl SqlRow {
    pub fn new(columns: Vec<(String, SqlValue)>) -> Self {
        Self { columns }
    }

    /// Raw value of `column`.
    pub fn get(&self, column: &str) -> Result<&SqlValue, SqlError> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
            .ok_or_else(|| SqlError::MissingColumn {
                column: column.to_owned(),
            })
    }

    /// Non-null integer column.
    pub fn integer(&self, column: &str) -> Result<i64, SqlError> {
        self.optional_integer(column)?
            .ok_or_else(|| SqlError::decode(column, "unexpected NULL"))
    }

    /// Nullable integer column.
    pub fn optional_integer(&self, column: &str) -> Result<Option<i64>, SqlError> {
        match self.get(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Integer(value) => Ok(Some(*value)),
            other => Err(SqlError::decode(column, format!("expected integer, got {other:?}"))),
        }
    }

    /// Floating point column; integer storage is widened.
    pub fn real(&self, column: &str) -> Result<f64, SqlError> {
        match self.get(column)? {
            SqlValue::Real(value) => Ok(*value),
            SqlValue::Integer(value) => Ok(*value as f64),
            other => Err(SqlError::decode(column, format!("expected real, got {other:?}"))),
        }
    }

    /// Non-null text column.
    pub fn text(&self, column: &str) -> Result<String, SqlError> {
        self.optional_text(column)?
            .ok_or_else(|| SqlError::decode(column, "unexpected NULL"))
    }

    /// Nullable text column.
    pub fn optional_text(&self, column: &str) -> Result<Option<String>, SqlError> {
        match self.get(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Text(value) => Ok(Some(value.clone())),
            other => Err(SqlError::decode(column, format!("expected text, got {other:?}"))),
        }
    }
}

/// A relational store reachable through raw SQL.
///
/// Implementations receive statements already in their native placeholder
/// syntax and bind `params` positionally.
#[async_trait]
pub trait SqlBackend: Send + Sync {
    /// Placeholder and DDL flavour this backend expects.
    fn dialect(&self) -> Dialect;

    /// Run a statement that returns no rows.
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<SqlExecution, SqlError>;

    /// First row of the result, if any.
    async fn fetch_one(&self, sql: &str, params: &[SqlValue]) -> Result<Option<SqlRow>, SqlError>;

    /// Every row of the result, in server order.
    async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<SqlRow>, SqlError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> SqlRow {
        SqlRow::new(vec![
            ("id".to_owned(), SqlValue::Integer(7)),
            ("rating".to_owned(), SqlValue::Real(4.5)),
            ("jobs".to_owned(), SqlValue::Integer(3)),
            ("name".to_owned(), SqlValue::Text("Pure Water".to_owned())),
            ("provider_name".to_owned(), SqlValue::Null),
        ])
    }

    #[rstest]
    fn typed_accessors_read_matching_values(row: SqlRow) {
        assert_eq!(row.integer("id"), Ok(7));
        assert_eq!(row.real("rating"), Ok(4.5));
        assert_eq!(row.real("jobs"), Ok(3.0));
        assert_eq!(row.text("name"), Ok("Pure Water".to_owned()));
        assert_eq!(row.optional_text("provider_name"), Ok(None));
        assert_eq!(row.optional_integer("provider_name"), Ok(None));
    }

    #[rstest]
    fn nulls_fail_required_accessors(row: SqlRow) {
        assert!(matches!(
            row.text("provider_name"),
            Err(SqlError::Decode { column, .. }) if column == "provider_name"
        ));
    }

    #[rstest]
    fn type_mismatches_name_the_column(row: SqlRow) {
        assert!(matches!(
            row.integer("name"),
            Err(SqlError::Decode { column, .. }) if column == "name"
        ));
    }

    #[rstest]
    fn unknown_columns_are_reported(row: SqlRow) {
        assert_eq!(
            row.get("missing"),
            Err(SqlError::MissingColumn {
                column: "missing".to_owned()
            })
        );
    }

    #[rstest]
    #[case(SqlValue::from(Some(3_i64)), SqlValue::Integer(3))]
    #[case(SqlValue::from(None::<String>), SqlValue::Null)]
    #[case(SqlValue::from("x"), SqlValue::Text("x".to_owned()))]
    fn conversions_build_values(#[case] actual: SqlValue, #[case] expected: SqlValue) {
        assert_eq!(actual, expected);
    }
}
