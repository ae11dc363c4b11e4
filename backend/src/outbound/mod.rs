//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: SQLite- and PostgreSQL-backed repositories using sqlx
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod persistence;
