//! Classification of sqlx failures into [`SqlError`].
//!
//! Classification relies on the driver-reported error kind, never on message
//! text, so it behaves the same on SQLite and PostgreSQL.

use sqlx::error::ErrorKind;
use tracing::debug;

use super::SqlError;

pub(crate) fn classify(error: sqlx::Error) -> SqlError {
    match error {
        sqlx::Error::Database(db) => {
            let message = db.message().to_owned();
            debug!(kind = ?db.kind(), code = ?db.code(), %message, "database rejected statement");
            match db.kind() {
                ErrorKind::UniqueViolation => SqlError::UniqueViolation { message },
                ErrorKind::ForeignKeyViolation => SqlError::ForeignKeyViolation { message },
                ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                    SqlError::ConstraintViolation { message }
                }
                _ => SqlError::Query { message },
            }
        }
        sqlx::Error::PoolTimedOut => SqlError::connection("timed out acquiring a connection"),
        sqlx::Error::PoolClosed => SqlError::connection("connection pool closed"),
        sqlx::Error::Io(err) => SqlError::connection(err.to_string()),
        sqlx::Error::Tls(err) => SqlError::connection(err.to_string()),
        sqlx::Error::ColumnNotFound(column) => SqlError::MissingColumn { column },
        sqlx::Error::ColumnDecode { index, source } => SqlError::decode(index, source.to_string()),
        other => {
            debug!(error = %other, "sqlx operation failed");
            SqlError::query(other.to_string())
        }
    }
}
