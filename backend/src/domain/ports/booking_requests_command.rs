//! Driving port for booking request mutations.

use async_trait::async_trait;

use crate::domain::{BookingRequest, BookingRequestId, Error, NewBookingRequest};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRequestsCommand: Send + Sync {
    /// Create a pending request for the named requester.
    async fn create(&self, request: &NewBookingRequest) -> Result<BookingRequestId, Error>;

    /// Confirm a pending request for the named provider.
    ///
    /// The first confirmation wins; later attempts fail with a conflict.
    async fn confirm(
        &self,
        id: BookingRequestId,
        provider_name: &str,
    ) -> Result<BookingRequest, Error>;
}
