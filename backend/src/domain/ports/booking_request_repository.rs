//! Port abstraction for booking request persistence.
//!
//! Requests reference accounts and providers by surrogate id. Adapters join
//! the names back when reading so the read model carries `user_name` and
//! `provider_name`.

use async_trait::async_trait;

use crate::domain::{
    BookingRequest, BookingRequestId, NewBookingRequest, ProviderId, RequestScope, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by booking request repository adapters.
    pub enum BookingRequestRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "booking request repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "booking request repository query failed: {message}",
        /// A referenced account or provider row does not exist.
        MissingReference { message: String } => "booking request references a missing row: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRequestRepository: Send + Sync {
    /// Insert a pending request owned by `requester` and return its id.
    async fn insert(
        &self,
        request: &NewBookingRequest,
        requester: UserId,
    ) -> Result<BookingRequestId, BookingRequestRepositoryError>;

    /// Fetch one request by id.
    async fn find_by_id(
        &self,
        id: BookingRequestId,
    ) -> Result<Option<BookingRequest>, BookingRequestRepositoryError>;

    /// Requests visible under `scope`, ordered by id.
    async fn list(
        &self,
        scope: &RequestScope,
    ) -> Result<Vec<BookingRequest>, BookingRequestRepositoryError>;

    /// Confirm `id` for `provider` only if it is still pending.
    ///
    /// Returns `false` when no row changed, either because the id does not
    /// exist or because the request was already confirmed.
    async fn confirm_if_pending(
        &self,
        id: BookingRequestId,
        provider: ProviderId,
    ) -> Result<bool, BookingRequestRepositoryError>;
}
