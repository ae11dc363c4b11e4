//! Shared mapping from [`SqlError`] to repository port errors.

use super::SqlError;

/// Map store failures onto a port's `query`/`connection` constructors.
///
/// Constraint and decode failures count as query errors; callers that need
/// to single out a constraint (for example a duplicate email) match on the
/// [`SqlError`] before falling back to this helper.
pub(crate) fn map_basic_sql_error<E, Q, C>(error: SqlError, query: Q, connection: C) -> E
where
    Q: FnOnce(String) -> E,
    C: FnOnce(String) -> E,
{
    match error {
        SqlError::Connection { message } => connection(message),
        other => query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(String),
        Connection(String),
    }

    #[rstest]
    #[case(SqlError::connection("refused"), Mapped::Connection("refused".to_owned()))]
    #[case(SqlError::query("syntax"), Mapped::Query("query failed: syntax".to_owned()))]
    #[case(
        SqlError::MissingColumn { column: "id".to_owned() },
        Mapped::Query("column id missing from result".to_owned())
    )]
    fn errors_route_to_the_matching_constructor(#[case] error: SqlError, #[case] expected: Mapped) {
        assert_eq!(
            map_basic_sql_error(error, Mapped::Query, Mapped::Connection),
            expected
        );
    }
}
