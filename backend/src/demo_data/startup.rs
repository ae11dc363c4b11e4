//! Startup seeding orchestration.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::demo_data::config::DemoDataSettings;
use crate::domain::ports::TableSeedResult;
use crate::domain::{DemoDataSeeder, DemoDataSeedingError, DemoSeedOutcome};
use crate::outbound::persistence::{Database, SqlDemoDataSeedRepository, SqlError};

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Schema setup failed before seeding could start.
    #[error("schema setup failed: {0}")]
    Schema(#[from] SqlError),
    /// A table could not be seeded.
    #[error("demo data seeding error: {0}")]
    Seeding(#[from] DemoDataSeedingError),
}

/// Apply the demo dataset to empty tables when enabled.
///
/// Runs schema setup first, so it is safe to call on a brand new store.
///
/// # Examples
///
/// ```rust,no_run
/// use service_finder::demo_data::{DemoDataSettings, seed_demo_data_on_startup};
/// use service_finder::outbound::persistence::Database;
///
/// # async fn run(db: Database) -> Result<(), Box<dyn std::error::Error>> {
/// let settings = DemoDataSettings::disabled();
/// let outcome = seed_demo_data_on_startup(&settings, &db).await?;
/// assert!(outcome.is_none());
/// # Ok(())
/// # }
/// ```
pub async fn seed_demo_data_on_startup(
    settings: &DemoDataSettings,
    database: &Database,
) -> Result<Option<DemoSeedOutcome>, StartupSeedingError> {
    if !settings.is_enabled() {
        info!(reason = "disabled", "demo data seeding skipped");
        return Ok(None);
    }

    database.ensure_schema().await?;
    let repository = SqlDemoDataSeedRepository::new(database.clone());
    let outcome = DemoDataSeeder::new(Arc::new(repository)).seed().await?;

    for (table, result) in outcome.tables() {
        match result {
            TableSeedResult::Applied { rows } => {
                info!(table = table.as_str(), rows, "demo data seeded");
            }
            TableSeedResult::AlreadyPopulated => {
                info!(table = table.as_str(), "table already populated; skipping");
            }
            TableSeedResult::NothingInserted => {
                warn!(table = table.as_str(), "table is empty but no demo rows applied");
            }
        }
    }

    Ok(Some(outcome))
}
