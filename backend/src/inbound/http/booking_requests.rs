//! Booking request HTTP handlers.
//!
//! ```text
//! GET   /api/requests?role=user&name=John%20Doe
//! POST  /api/requests {"title":"Brake Repair","category":"Automotive","date":"2025-02-10","budget":150,"user_name":"John Doe"}
//! PATCH /api/requests/1/confirm {"provider_name":"Pro Fixer"}
//! ```

use actix_web::{get, patch, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    BookingRequest, BookingRequestId, BookingRequestValidationError, Error, NewBookingRequest,
    RequestScope, RequestStatus,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Query parameters selecting which requests are visible.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRequestsQuery {
    /// `user` or `provider`; anything else lists every request.
    pub role: Option<String>,
    /// Name of the requester or provider the role refers to.
    pub name: Option<String>,
}

/// Budget as sent by clients: a JSON integer or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum BudgetInput {
    Amount(i64),
    Text(String),
}

impl BudgetInput {
    fn amount(&self) -> Result<i64, Error> {
        match self {
            Self::Amount(value) => Ok(*value),
            Self::Text(raw) => raw.trim().parse().map_err(|_| {
                Error::invalid_request("budget must be a whole number").with_details(json!({
                    "field": "budget",
                    "code": "invalid_budget",
                }))
            }),
        }
    }
}

/// Request body for `POST /api/requests`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateRequestBody {
    #[schema(example = "Brake Repair")]
    pub title: String,
    #[schema(example = "Automotive")]
    pub category: String,
    #[schema(example = "2025-02-10")]
    pub date: String,
    #[schema(value_type = i64, example = 150)]
    pub budget: BudgetInput,
    /// Optional; new requests always start pending.
    #[serde(default)]
    #[schema(example = "pending")]
    pub status: Option<String>,
    #[schema(example = "John Doe")]
    pub user_name: String,
}

/// Identifier of a newly created request.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreatedResponse {
    pub id: i64,
}

/// Request body for `PATCH /api/requests/{id}/confirm`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ConfirmRequestBody {
    #[schema(example = "Pro Fixer")]
    pub provider_name: String,
}

/// Outcome of a successful confirmation.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ConfirmResponse {
    pub success: bool,
    pub request: BookingRequest,
}

fn validation_details(err: &BookingRequestValidationError) -> (&'static str, &'static str) {
    match err {
        BookingRequestValidationError::EmptyTitle => ("title", "empty_title"),
        BookingRequestValidationError::TitleTooLong { .. } => ("title", "title_too_long"),
        BookingRequestValidationError::EmptyCategory => ("category", "empty_category"),
        BookingRequestValidationError::InvalidDate => ("date", "invalid_date"),
        BookingRequestValidationError::NegativeBudget => ("budget", "negative_budget"),
        BookingRequestValidationError::EmptyRequester => ("user_name", "empty_user_name"),
        BookingRequestValidationError::UnknownStatus(_) => ("status", "unknown_status"),
        BookingRequestValidationError::ConfirmedWithoutProvider => {
            ("status", "confirmed_without_provider")
        }
    }
}

fn map_validation_error(err: BookingRequestValidationError) -> Error {
    let (field, code) = validation_details(&err);
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field,
        "code": code,
    }))
}

fn ensure_pending(status: Option<&str>) -> Result<(), Error> {
    match status.map(str::trim) {
        None => Ok(()),
        Some(raw) if raw == RequestStatus::Pending.as_str() => Ok(()),
        Some(other) => Err(Error::invalid_request(format!(
            "new requests must be pending, got '{other}'"
        ))
        .with_details(json!({
            "field": "status",
            "code": "status_not_pending",
        }))),
    }
}

/// List requests visible to the caller's role.
#[utoipa::path(
    get,
    path = "/api/requests",
    params(ListRequestsQuery),
    responses(
        (status = 200, description = "Visible requests in creation order", body = [BookingRequest]),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "listRequests"
)]
#[get("/requests")]
pub async fn list_requests(
    state: web::Data<HttpState>,
    query: web::Query<ListRequestsQuery>,
) -> ApiResult<web::Json<Vec<BookingRequest>>> {
    let ListRequestsQuery { role, name } = query.into_inner();
    let scope = RequestScope::from_role(role.as_deref(), name.as_deref());
    let requests = state.requests_query.list(&scope).await?;
    Ok(web::Json(requests))
}

/// Create a pending booking request for an existing requester.
#[utoipa::path(
    post,
    path = "/api/requests",
    request_body = CreateRequestBody,
    responses(
        (status = 200, description = "Request created", body = CreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown requester", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "createRequest"
)]
#[post("/requests")]
pub async fn create_request(
    state: web::Data<HttpState>,
    payload: web::Json<CreateRequestBody>,
) -> ApiResult<web::Json<CreatedResponse>> {
    let body = payload.into_inner();
    ensure_pending(body.status.as_deref())?;
    let budget = body.budget.amount()?;
    let request = NewBookingRequest::try_new(
        &body.title,
        &body.category,
        &body.date,
        budget,
        &body.user_name,
    )
    .map_err(map_validation_error)?;

    let id = state.requests.create(&request).await?;
    info!(%id, requester = request.requester(), "booking request created");
    Ok(web::Json(CreatedResponse { id: id.get() }))
}

/// Confirm a pending request on behalf of a provider.
///
/// Only the first confirmation succeeds; later attempts get `409`.
#[utoipa::path(
    patch,
    path = "/api/requests/{id}/confirm",
    params(("id" = i64, Path, description = "Booking request identifier")),
    request_body = ConfirmRequestBody,
    responses(
        (status = 200, description = "Request confirmed", body = ConfirmResponse),
        (status = 400, description = "Invalid request or unknown provider", body = ErrorSchema),
        (status = 404, description = "Unknown request", body = ErrorSchema),
        (status = 409, description = "Request is no longer pending", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["requests"],
    operation_id = "confirmRequest"
)]
#[patch("/requests/{id}/confirm")]
pub async fn confirm_request(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<ConfirmRequestBody>,
) -> ApiResult<web::Json<ConfirmResponse>> {
    let id = BookingRequestId::new(path.into_inner());
    let provider_name = payload.provider_name.trim();
    if provider_name.is_empty() {
        return Err(
            Error::invalid_request("provider name must not be empty").with_details(json!({
                "field": "provider_name",
                "code": "empty_provider_name",
            })),
        );
    }

    let request = state.requests.confirm(id, provider_name).await?;
    info!(%id, provider = provider_name, "booking request confirmed");
    Ok(web::Json(ConfirmResponse {
        success: true,
        request,
    }))
}

#[cfg(test)]
#[path = "booking_requests_tests.rs"]
mod tests;
