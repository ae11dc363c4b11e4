//! OpenAPI schema definitions for domain types.
//!
//! The domain [`crate::domain::Error`] serialises through a private DTO, so
//! its wire shape is described here rather than derived on the type.

use utoipa::ToSchema;

use crate::domain::ErrorCode;

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCode,
    /// Human-readable message returned to clients.
    #[schema(example = "title must not be empty")]
    error: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(rename = "traceId", example = "8a7d6c2e-1f0b-4c3a-9e5d-2b4f6a8c0e1d")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}
