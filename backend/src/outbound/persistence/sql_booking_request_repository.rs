//! SQL-backed [`BookingRequestRepository`].
//!
//! Requests store surrogate foreign keys; reads join `users` and `providers`
//! to carry names in the read model.

use async_trait::async_trait;

use crate::domain::ports::{BookingRequestRepository, BookingRequestRepositoryError};
use crate::domain::{
    parse_stored_date, BookingRequest, BookingRequestId, BookingRequestRecord, NewBookingRequest,
    ProviderId, RequestScope, RequestStatus, UserId,
};

use super::sql_error_mapping::map_basic_sql_error;
use super::{Database, SqlError, SqlRow, SqlValue};

const SELECT_REQUESTS: &str = "SELECT r.id, r.title, r.category, r.date, r.budget, r.status, \
     u.name AS user_name, p.name AS provider_name \
     FROM requests r \
     JOIN users u ON u.id = r.user_id \
     LEFT JOIN providers p ON p.id = r.provider_id";

#[derive(Debug, Clone)]
pub struct SqlBookingRequestRepository {
    db: Database,
}

impl SqlBookingRequestRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn map_error(error: SqlError) -> BookingRequestRepositoryError {
    match error {
        SqlError::ForeignKeyViolation { message } => {
            BookingRequestRepositoryError::missing_reference(message)
        }
        other => map_basic_sql_error(
            other,
            BookingRequestRepositoryError::query,
            BookingRequestRepositoryError::connection,
        ),
    }
}

fn corrupt(id: i64, reason: impl std::fmt::Display) -> BookingRequestRepositoryError {
    BookingRequestRepositoryError::query(format!("stored request {id} is invalid: {reason}"))
}

fn decode(row: &SqlRow) -> Result<BookingRequest, BookingRequestRepositoryError> {
    let id = row.integer("id").map_err(map_error)?;
    let date = parse_stored_date(&row.text("date").map_err(map_error)?)
        .map_err(|err| corrupt(id, err))?;
    let status = row
        .text("status")
        .map_err(map_error)?
        .parse::<RequestStatus>()
        .map_err(|err| corrupt(id, err))?;

    let record = BookingRequestRecord {
        id: BookingRequestId::new(id),
        title: row.text("title").map_err(map_error)?,
        category: row.text("category").map_err(map_error)?,
        date,
        budget: row.integer("budget").map_err(map_error)?,
        status,
        user_name: row.text("user_name").map_err(map_error)?,
        provider_name: row.optional_text("provider_name").map_err(map_error)?,
    };
    BookingRequest::try_from(record).map_err(|err| corrupt(id, err))
}

/// `WHERE` clause and parameters for a listing scope.
fn scope_filter(scope: &RequestScope) -> (&'static str, Vec<SqlValue>) {
    match scope {
        RequestScope::Requester(name) => (" WHERE u.name = ?", vec![name.as_str().into()]),
        RequestScope::Provider(name) => (
            " WHERE r.status = 'pending' OR p.name = ?",
            vec![name.as_str().into()],
        ),
        RequestScope::All => ("", Vec::new()),
    }
}

#[async_trait]
impl BookingRequestRepository for SqlBookingRequestRepository {
    async fn insert(
        &self,
        request: &NewBookingRequest,
        requester: UserId,
    ) -> Result<BookingRequestId, BookingRequestRepositoryError> {
        let params = [
            request.title().into(),
            request.category().into(),
            request.date_string().into(),
            request.budget().into(),
            requester.get().into(),
        ];
        let row = self
            .db
            .fetch_one(
                "INSERT INTO requests (title, category, date, budget, status, user_id) \
                 VALUES (?, ?, ?, ?, 'pending', ?) RETURNING id",
                &params,
            )
            .await
            .map_err(map_error)?
            .ok_or_else(|| BookingRequestRepositoryError::query("insert returned no id"))?;
        Ok(BookingRequestId::new(
            row.integer("id").map_err(map_error)?,
        ))
    }

    async fn find_by_id(
        &self,
        id: BookingRequestId,
    ) -> Result<Option<BookingRequest>, BookingRequestRepositoryError> {
        let sql = format!("{SELECT_REQUESTS} WHERE r.id = ?");
        let row = self
            .db
            .fetch_one(&sql, &[id.get().into()])
            .await
            .map_err(map_error)?;
        row.as_ref().map(decode).transpose()
    }

    async fn list(
        &self,
        scope: &RequestScope,
    ) -> Result<Vec<BookingRequest>, BookingRequestRepositoryError> {
        let (filter, params) = scope_filter(scope);
        let sql = format!("{SELECT_REQUESTS}{filter} ORDER BY r.id");
        let rows = self.db.fetch_all(&sql, &params).await.map_err(map_error)?;
        rows.iter().map(decode).collect()
    }

    async fn confirm_if_pending(
        &self,
        id: BookingRequestId,
        provider: ProviderId,
    ) -> Result<bool, BookingRequestRepositoryError> {
        let outcome = self
            .db
            .execute(
                "UPDATE requests SET status = 'confirmed', provider_id = ? \
                 WHERE id = ? AND status = 'pending'",
                &[provider.get().into(), id.get().into()],
            )
            .await
            .map_err(map_error)?;
        Ok(outcome.rows_affected == 1)
    }
}

#[cfg(test)]
#[path = "sql_booking_request_repository_tests.rs"]
mod tests;
