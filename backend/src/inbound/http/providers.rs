//! Provider catalogue handlers.

use actix_web::{get, web};

use crate::domain::{Provider, ProviderDashboard};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// List every provider in the catalogue.
#[utoipa::path(
    get,
    path = "/api/providers",
    responses(
        (status = 200, description = "Provider catalogue", body = [Provider]),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["providers"],
    operation_id = "listProviders"
)]
#[get("/providers")]
pub async fn list_providers(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Provider>>> {
    let providers = state.providers.list_providers().await?;
    Ok(web::Json(providers))
}

/// Look up one provider by exact name.
#[utoipa::path(
    get,
    path = "/api/providers/{name}",
    params(("name" = String, Path, description = "Provider display name")),
    responses(
        (status = 200, description = "Provider profile", body = Provider),
        (status = 404, description = "Unknown provider", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["providers"],
    operation_id = "getProvider"
)]
#[get("/providers/{name}")]
pub async fn provider_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Provider>> {
    let provider = state.providers.provider_profile(&path).await?;
    Ok(web::Json(provider))
}

/// Open work, confirmed work and earnings estimate for one provider.
#[utoipa::path(
    get,
    path = "/api/providers/{name}/dashboard",
    params(("name" = String, Path, description = "Provider display name")),
    responses(
        (status = 200, description = "Provider dashboard", body = ProviderDashboard),
        (status = 404, description = "Unknown provider", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["providers"],
    operation_id = "getProviderDashboard"
)]
#[get("/providers/{name}/dashboard")]
pub async fn provider_dashboard(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProviderDashboard>> {
    let dashboard = state.providers.provider_dashboard(&path).await?;
    Ok(web::Json(dashboard))
}
