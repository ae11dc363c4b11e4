//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers every `/api` handler, the health
//! probes, and the request/response schemas. [`ErrorSchema`] describes the
//! shared error body without coupling the domain error to utoipa.
//!
//! The generated document is used by Swagger UI (debug builds) and exported
//! via `cargo run --bin openapi-dump` for external tooling.

use crate::domain::{
    AuthenticatedAccount, BookingRequest, ErrorCode, Provider, ProviderDashboard, RequestStatus,
    Role,
};
use crate::inbound::http::auth::{LoginRequest, SignupRequest, SignupResponse};
use crate::inbound::http::booking_requests::{
    ConfirmRequestBody, ConfirmResponse, CreateRequestBody, CreatedResponse,
};
use crate::inbound::http::schemas::ErrorSchema;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Service finder API",
        description = "Marketplace for requesting services and confirming them as a provider."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::signup,
        crate::inbound::http::booking_requests::list_requests,
        crate::inbound::http::booking_requests::create_request,
        crate::inbound::http::booking_requests::confirm_request,
        crate::inbound::http::providers::list_providers,
        crate::inbound::http::providers::provider_profile,
        crate::inbound::http::providers::provider_dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCode,
        AuthenticatedAccount,
        Role,
        LoginRequest,
        SignupRequest,
        SignupResponse,
        BookingRequest,
        RequestStatus,
        CreateRequestBody,
        CreatedResponse,
        ConfirmRequestBody,
        ConfirmResponse,
        Provider,
        ProviderDashboard,
    )),
    tags(
        (name = "auth", description = "Login and signup"),
        (name = "requests", description = "Booking request lifecycle"),
        (name = "providers", description = "Provider catalogue and dashboards"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_is_registered_with_wire_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "error");
    }

    #[test]
    fn booking_request_schema_keeps_snake_case_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get("BookingRequest").expect("BookingRequest schema");

        assert_object_schema_has_field(schema, "user_name");
        assert_object_schema_has_field(schema, "provider_name");
    }

    #[rstest]
    #[case("/api/login")]
    #[case("/api/signup")]
    #[case("/api/requests")]
    #[case("/api/requests/{id}/confirm")]
    #[case("/api/providers")]
    #[case("/api/providers/{name}")]
    #[case("/api/providers/{name}/dashboard")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing path {path}");
    }
}
