//! SQL-backed [`DemoDataSeedRepository`].
//!
//! Each table is seeded by one `INSERT ... SELECT` whose `WHERE NOT EXISTS`
//! guard reads the target table inside the same statement, so a populated
//! table is left untouched by later runs. The guard does not serialise two
//! runs racing on an empty PostgreSQL table under READ COMMITTED.

use async_trait::async_trait;

use crate::domain::ports::{
    DemoDataSeedRepository, DemoDataSeedRepositoryError, DemoRequestSeed, TableSeedResult,
};
use crate::domain::{NewProvider, NewUser};

use super::sql_error_mapping::map_basic_sql_error;
use super::{Database, SqlError, SqlValue};

#[derive(Debug, Clone)]
pub struct SqlDemoDataSeedRepository {
    db: Database,
}

impl SqlDemoDataSeedRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn seed(
        &self,
        table: &str,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<TableSeedResult, DemoDataSeedRepositoryError> {
        let outcome = self.db.execute(sql, params).await.map_err(map_error)?;
        self.classify(table, outcome.rows_affected).await
    }

    async fn classify(
        &self,
        table: &str,
        rows_affected: u64,
    ) -> Result<TableSeedResult, DemoDataSeedRepositoryError> {
        if rows_affected > 0 {
            return Ok(TableSeedResult::classify(rows_affected, true));
        }
        let populated = self
            .db
            .fetch_one(&format!("SELECT 1 AS present FROM {table} LIMIT 1"), &[])
            .await
            .map_err(map_error)?
            .is_some();
        Ok(TableSeedResult::classify(0, populated))
    }
}

fn map_error(error: SqlError) -> DemoDataSeedRepositoryError {
    map_basic_sql_error(
        error,
        DemoDataSeedRepositoryError::query,
        DemoDataSeedRepositoryError::connection,
    )
}

/// `(?, ?, ...), (?, ?, ...)` for `rows` tuples of `width` placeholders.
fn values_list(rows: usize, width: usize) -> String {
    let tuple = format!("({})", vec!["?"; width].join(", "));
    vec![tuple; rows].join(", ")
}

fn guarded_insert(table: &str, columns: &str, rows: usize, width: usize) -> String {
    format!(
        "INSERT INTO {table} ({columns}) SELECT * FROM (VALUES {}) AS seed \
         WHERE NOT EXISTS (SELECT 1 FROM {table})",
        values_list(rows, width)
    )
}

#[async_trait]
impl DemoDataSeedRepository for SqlDemoDataSeedRepository {
    async fn seed_users(
        &self,
        users: &[NewUser],
    ) -> Result<TableSeedResult, DemoDataSeedRepositoryError> {
        if users.is_empty() {
            return self.classify("users", 0).await;
        }
        let params: Vec<SqlValue> = users
            .iter()
            .flat_map(|user| {
                [
                    user.name.as_str().into(),
                    user.email.as_str().into(),
                    user.password_hash.encode().into(),
                    user.role.as_str().into(),
                ]
            })
            .collect();
        let sql = guarded_insert("users", "name, email, password_hash, role", users.len(), 4);
        self.seed("users", &sql, &params).await
    }

    async fn seed_providers(
        &self,
        providers: &[NewProvider],
    ) -> Result<TableSeedResult, DemoDataSeedRepositoryError> {
        if providers.is_empty() {
            return self.classify("providers", 0).await;
        }
        let params: Vec<SqlValue> = providers
            .iter()
            .flat_map(|provider| {
                [
                    provider.name.as_str().into(),
                    provider.email.as_str().into(),
                    provider.specialty.as_str().into(),
                    provider.rating.into(),
                    provider.jobs.into(),
                    provider.image_url.as_str().into(),
                ]
            })
            .collect();
        let sql = guarded_insert(
            "providers",
            "name, email, specialty, rating, jobs, img",
            providers.len(),
            6,
        );
        self.seed("providers", &sql, &params).await
    }

    async fn seed_requests(
        &self,
        requests: &[DemoRequestSeed],
    ) -> Result<TableSeedResult, DemoDataSeedRepositoryError> {
        if requests.is_empty() {
            return self.classify("requests", 0).await;
        }
        let params: Vec<SqlValue> = requests
            .iter()
            .flat_map(|seed| {
                [
                    seed.title.as_str().into(),
                    seed.category.as_str().into(),
                    seed.date.as_str().into(),
                    seed.budget.into(),
                    seed.requester_name.as_str().into(),
                ]
            })
            .collect();
        // Requesters are resolved by name to the oldest matching account;
        // unmatched names drop out of the join.
        let sql = format!(
            "INSERT INTO requests (title, category, date, budget, status, user_id) \
             SELECT seed.column1, seed.column2, seed.column3, seed.column4, 'pending', u.id \
             FROM (VALUES {}) AS seed \
             JOIN users u ON u.id = (SELECT MIN(id) FROM users WHERE name = seed.column5) \
             WHERE NOT EXISTS (SELECT 1 FROM requests)",
            values_list(requests.len(), 5)
        );
        self.seed("requests", &sql, &params).await
    }
}
