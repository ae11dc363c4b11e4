//! Demo data configuration loaded via OrthoConfig.

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Configuration values controlling demo data seeding at startup.
///
/// Seeding is on unless `DEMO_DATA_ENABLED=false`. The field stays optional
/// so an absent value is distinguishable from an explicit `false`.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DEMO_DATA")]
pub struct DemoDataSettings {
    /// Seed empty tables with the demo dataset on startup (default: true).
    pub enabled: Option<bool>,
}

impl DemoDataSettings {
    /// Settings that skip seeding.
    pub fn disabled() -> Self {
        Self {
            enabled: Some(false),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}
