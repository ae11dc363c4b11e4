//! Provider catalogue, profiles and the provider dashboard.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::booking_request_service::{map_provider_error, map_request_error};
use crate::domain::ports::{BookingRequestRepository, ProviderRepository, ProvidersQuery};
use crate::domain::{Error, Provider, ProviderDashboard, RequestScope};

#[derive(Clone)]
pub struct ProviderDirectoryService<P, B> {
    providers: Arc<P>,
    requests: Arc<B>,
}

impl<P, B> ProviderDirectoryService<P, B> {
    pub fn new(providers: Arc<P>, requests: Arc<B>) -> Self {
        Self {
            providers,
            requests,
        }
    }
}

#[async_trait]
impl<P, B> ProvidersQuery for ProviderDirectoryService<P, B>
where
    P: ProviderRepository,
    B: BookingRequestRepository,
{
    async fn list_providers(&self) -> Result<Vec<Provider>, Error> {
        self.providers.list().await.map_err(map_provider_error)
    }

    async fn provider_profile(&self, name: &str) -> Result<Provider, Error> {
        self.providers
            .find_by_name(name)
            .await
            .map_err(map_provider_error)?
            .ok_or_else(|| Error::not_found(format!("provider {name} not found")))
    }

    async fn provider_dashboard(&self, name: &str) -> Result<ProviderDashboard, Error> {
        let profile = self.provider_profile(name).await?;
        let visible = self
            .requests
            .list(&RequestScope::Provider(profile.name.clone()))
            .await
            .map_err(map_request_error)?;
        Ok(ProviderDashboard::assemble(profile, visible))
    }
}
