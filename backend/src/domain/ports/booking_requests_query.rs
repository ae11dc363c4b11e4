//! Driving port for role-scoped request listing.

use async_trait::async_trait;

use crate::domain::{BookingRequest, Error, RequestScope};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRequestsQuery: Send + Sync {
    /// Requests visible under `scope`, ordered by id.
    async fn list(&self, scope: &RequestScope) -> Result<Vec<BookingRequest>, Error>;
}
