//! Startup wiring for demo data seeding.

mod config;
mod startup;

pub use config::DemoDataSettings;
pub use startup::{StartupSeedingError, seed_demo_data_on_startup};
