//! Relational persistence adapters over SQLite and PostgreSQL.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by `sqlx`. A single [`SqlBackend`] trait abstracts the two
//! engines; [`connect`] picks one at startup from `DATABASE_URL`.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between [`SqlRow`]s and
//!   domain types. No business logic resides here.
//! - **One logical schema**: [`schema`] renders the same tables for both
//!   dialects; only key declarations and physical type names differ.
//! - **Explicit handle**: [`Database`] is constructed once and passed to
//!   every repository. Schema setup runs before the first query.
//! - **Strongly typed errors**: driver failures are classified into
//!   [`SqlError`] by error kind and then mapped to port errors.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use service_finder::outbound::persistence::{
//!     connect, BackendSelection, PoolConfig, SqlUserRepository,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let selection = BackendSelection::from_env(Path::new("service_finder.db"))?;
//! let db = connect(PoolConfig::new(selection)).await?;
//! let users = SqlUserRepository::new(db);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod database;
mod placeholders;
mod pool;
mod postgres_backend;
pub mod schema;
mod sql;
mod sql_booking_request_repository;
mod sql_demo_data_seed_repository;
mod sql_error_mapping;
mod sql_provider_repository;
mod sql_user_repository;
mod sqlite_backend;
mod sqlx_errors;

pub use database::Database;
pub use placeholders::translate_placeholders;
pub use pool::{BackendSelection, DATABASE_URL_ENV, PoolConfig, PoolError, connect};
pub use postgres_backend::{PostgresBackend, PostgresPoolSizing};
pub use sql::{Dialect, SqlBackend, SqlError, SqlExecution, SqlRow, SqlValue};
pub use sql_booking_request_repository::SqlBookingRequestRepository;
pub use sql_demo_data_seed_repository::SqlDemoDataSeedRepository;
pub use sql_provider_repository::SqlProviderRepository;
pub use sql_user_repository::SqlUserRepository;
pub use sqlite_backend::SqliteBackend;
