//! Booking request lifecycle: create, confirm and role-scoped listing.
//!
//! Names arriving from callers are resolved to surrogate ids here, at the
//! edge of the domain. Confirmation is a compare-and-swap on the pending
//! status, so when two providers race for the same request the first wins
//! and the second receives a conflict.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::ports::{
    BookingRequestRepository, BookingRequestRepositoryError, BookingRequestsCommand,
    BookingRequestsQuery, ProviderRepository, ProviderRepositoryError, UserRepository,
    UserRepositoryError,
};
use crate::domain::{BookingRequest, BookingRequestId, Error, NewBookingRequest, RequestScope};

/// Service implementing the booking request driving ports.
#[derive(Clone)]
pub struct BookingRequestService<B, U, P> {
    requests: Arc<B>,
    users: Arc<U>,
    providers: Arc<P>,
}

impl<B, U, P> BookingRequestService<B, U, P> {
    pub fn new(requests: Arc<B>, users: Arc<U>, providers: Arc<P>) -> Self {
        Self {
            requests,
            users,
            providers,
        }
    }
}

pub(crate) fn map_request_error(error: BookingRequestRepositoryError) -> Error {
    match error {
        BookingRequestRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking request repository unavailable: {message}"))
        }
        BookingRequestRepositoryError::Query { message } => {
            Error::internal(format!("booking request repository error: {message}"))
        }
        BookingRequestRepositoryError::MissingReference { message } => {
            Error::invalid_request(format!("booking request references unknown data: {message}"))
        }
    }
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        other => Error::internal(format!("user repository error: {other}")),
    }
}

pub(crate) fn map_provider_error(error: ProviderRepositoryError) -> Error {
    match error {
        ProviderRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("provider repository unavailable: {message}"))
        }
        ProviderRepositoryError::Query { message } => {
            Error::internal(format!("provider repository error: {message}"))
        }
    }
}

fn request_not_found(id: BookingRequestId) -> Error {
    Error::not_found(format!("booking request {id} not found"))
}

impl<B, U, P> BookingRequestService<B, U, P>
where
    B: BookingRequestRepository,
{
    async fn find(&self, id: BookingRequestId) -> Result<Option<BookingRequest>, Error> {
        self.requests.find_by_id(id).await.map_err(map_request_error)
    }

    /// Explain why a compare-and-swap changed nothing.
    async fn rejected_confirmation(&self, id: BookingRequestId) -> Error {
        match self.find(id).await {
            Ok(None) => request_not_found(id),
            Ok(Some(existing)) => Error::conflict(format!("booking request {id} is already confirmed"))
                .with_details(json!({
                    "status": existing.status(),
                    "providerName": existing.provider_name(),
                })),
            Err(error) => error,
        }
    }
}

#[async_trait]
impl<B, U, P> BookingRequestsCommand for BookingRequestService<B, U, P>
where
    B: BookingRequestRepository,
    U: UserRepository,
    P: ProviderRepository,
{
    async fn create(&self, request: &NewBookingRequest) -> Result<BookingRequestId, Error> {
        let requester = self
            .users
            .find_by_name(request.requester())
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| {
                Error::not_found(format!("user {} not found", request.requester()))
                    .with_details(json!({ "field": "user_name" }))
            })?;

        let id = self
            .requests
            .insert(request, requester.id)
            .await
            .map_err(map_request_error)?;
        tracing::info!(request_id = %id, user_id = %requester.id, "booking request created");
        Ok(id)
    }

    async fn confirm(
        &self,
        id: BookingRequestId,
        provider_name: &str,
    ) -> Result<BookingRequest, Error> {
        let provider = self
            .providers
            .find_by_name(provider_name)
            .await
            .map_err(map_provider_error)?
            .ok_or_else(|| {
                Error::invalid_request(format!("unknown provider: {provider_name}"))
                    .with_details(json!({ "field": "provider_name" }))
            })?;

        let changed = self
            .requests
            .confirm_if_pending(id, provider.id)
            .await
            .map_err(map_request_error)?;
        if !changed {
            let error = self.rejected_confirmation(id).await;
            tracing::debug!(request_id = %id, code = ?error.code(), "confirmation rejected");
            return Err(error);
        }

        tracing::info!(request_id = %id, provider_id = %provider.id, "booking request confirmed");
        self.find(id)
            .await?
            .ok_or_else(|| Error::internal(format!("booking request {id} vanished after confirmation")))
    }
}

#[async_trait]
impl<B, U, P> BookingRequestsQuery for BookingRequestService<B, U, P>
where
    B: BookingRequestRepository,
    U: UserRepository,
    P: ProviderRepository,
{
    async fn list(&self, scope: &RequestScope) -> Result<Vec<BookingRequest>, Error> {
        self.requests.list(scope).await.map_err(map_request_error)
    }
}

#[cfg(test)]
#[path = "booking_request_service_tests.rs"]
mod tests;
