//! Port abstraction for seeding the demo dataset.
//!
//! Each method inserts its rows in a single statement guarded by an
//! emptiness check on the target table, so repeated startups never duplicate
//! rows. Seeding is a one-off startup step; two processes seeding the same
//! empty store at the same moment are not guarded against.

use async_trait::async_trait;

use crate::domain::{NewProvider, NewUser};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by demo data seed adapters.
    pub enum DemoDataSeedRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "demo data seeding connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "demo data seeding query failed: {message}",
    }
}

/// Outcome of seeding one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableSeedResult {
    /// The table was empty and `rows` rows were inserted.
    Applied { rows: u64 },
    /// The table already held rows; nothing was inserted.
    AlreadyPopulated,
    /// The table is empty but no seed row could be inserted, e.g. every
    /// request named an unknown requester.
    NothingInserted,
}

impl TableSeedResult {
    /// Classify a seeding statement from its affected row count and whether
    /// the table holds rows afterwards.
    pub(crate) fn classify(rows_affected: u64, populated: bool) -> Self {
        match (rows_affected, populated) {
            (0, true) => Self::AlreadyPopulated,
            (0, false) => Self::NothingInserted,
            (rows, _) => Self::Applied { rows },
        }
    }
}

/// Seed request row. The requester is referenced by account name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoRequestSeed {
    pub title: String,
    pub category: String,
    pub date: String,
    pub budget: i64,
    pub requester_name: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DemoDataSeedRepository: Send + Sync {
    /// Insert `users` if the users table is empty.
    async fn seed_users(
        &self,
        users: &[NewUser],
    ) -> Result<TableSeedResult, DemoDataSeedRepositoryError>;

    /// Insert `providers` if the providers table is empty.
    async fn seed_providers(
        &self,
        providers: &[NewProvider],
    ) -> Result<TableSeedResult, DemoDataSeedRepositoryError>;

    /// Insert pending `requests` if the requests table is empty.
    ///
    /// Seeds whose requester name matches no account are skipped.
    async fn seed_requests(
        &self,
        requests: &[DemoRequestSeed],
    ) -> Result<TableSeedResult, DemoDataSeedRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, true, TableSeedResult::AlreadyPopulated)]
    #[case(0, false, TableSeedResult::NothingInserted)]
    #[case(4, true, TableSeedResult::Applied { rows: 4 })]
    fn seed_statements_are_classified(
        #[case] rows: u64,
        #[case] populated: bool,
        #[case] expected: TableSeedResult,
    ) {
        assert_eq!(TableSeedResult::classify(rows, populated), expected);
    }
}
