//! Driving port for the provider catalogue and provider dashboards.

use async_trait::async_trait;

use crate::domain::{Error, Provider, ProviderDashboard};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProvidersQuery: Send + Sync {
    /// Every listed provider.
    async fn list_providers(&self) -> Result<Vec<Provider>, Error>;

    /// Profile of the provider with exactly this name.
    async fn provider_profile(&self, name: &str) -> Result<Provider, Error>;

    /// Open work, confirmed work and earnings estimate for one provider.
    async fn provider_dashboard(&self, name: &str) -> Result<ProviderDashboard, Error>;
}
