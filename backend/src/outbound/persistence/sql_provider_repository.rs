//! SQL-backed [`ProviderRepository`].

use async_trait::async_trait;

use crate::domain::ports::{ProviderRepository, ProviderRepositoryError};
use crate::domain::{Provider, ProviderId};

use super::sql_error_mapping::map_basic_sql_error;
use super::{Database, SqlError, SqlRow};

const PROVIDER_COLUMNS: &str = "id, name, email, specialty, rating, jobs, img";

#[derive(Debug, Clone)]
pub struct SqlProviderRepository {
    db: Database,
}

impl SqlProviderRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

fn map_error(error: SqlError) -> ProviderRepositoryError {
    map_basic_sql_error(
        error,
        ProviderRepositoryError::query,
        ProviderRepositoryError::connection,
    )
}

fn decode(row: &SqlRow) -> Result<Provider, SqlError> {
    Ok(Provider {
        id: ProviderId::new(row.integer("id")?),
        name: row.text("name")?,
        email: row.text("email")?,
        specialty: row.text("specialty")?,
        rating: row.real("rating")?,
        jobs: row.integer("jobs")?,
        image_url: row.text("img")?,
    })
}

#[async_trait]
impl ProviderRepository for SqlProviderRepository {
    async fn list(&self) -> Result<Vec<Provider>, ProviderRepositoryError> {
        let sql = format!("SELECT {PROVIDER_COLUMNS} FROM providers ORDER BY id");
        let rows = self.db.fetch_all(&sql, &[]).await.map_err(map_error)?;
        rows.iter().map(decode).collect::<Result<_, _>>().map_err(map_error)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Provider>, ProviderRepositoryError> {
        let sql = format!("SELECT {PROVIDER_COLUMNS} FROM providers WHERE name = ?");
        let row = self
            .db
            .fetch_one(&sql, &[name.into()])
            .await
            .map_err(map_error)?;
        row.as_ref().map(decode).transpose().map_err(map_error)
    }
}
