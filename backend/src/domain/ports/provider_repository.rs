//! Port abstraction for the provider catalogue.
use async_trait::async_trait;

use crate::domain::Provider;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by provider repository adapters.
    pub enum ProviderRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "provider repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "provider repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderRepository: Send + Sync {
    /// All providers ordered by id.
    async fn list(&self) -> Result<Vec<Provider>, ProviderRepositoryError>;

    /// Provider with exactly this name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Provider>, ProviderRepositoryError>;
}
