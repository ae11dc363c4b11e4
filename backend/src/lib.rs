//! Service finder backend library.
//!
//! Hexagonal layout: `domain` holds the marketplace types, ports and
//! services; `inbound::http` adapts them to actix-web; and
//! `outbound::persistence` implements the repositories over SQLite or
//! PostgreSQL.

pub mod demo_data;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
