//! HTTP inbound adapter exposing REST endpoints.
//!
//! Every marketplace route lives under `/api`; health probes are mounted
//! separately by the server so they stay reachable without the JSON
//! extractor configuration.

pub mod auth;
pub mod booking_requests;
pub mod error;
pub mod extractors;
pub mod health;
pub mod providers;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register the `/api` scope and its extractor error handlers.
///
/// The caller supplies `web::Data<HttpState>` as app data.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use service_finder::inbound::http::{configure_api, state::HttpState};
///
/// fn app(state: HttpState) {
///     let _app = App::new()
///         .app_data(web::Data::new(state))
///         .configure(configure_api);
/// }
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(extractors::json_config())
            .app_data(extractors::query_config())
            .app_data(extractors::path_config())
            .service(auth::login)
            .service(auth::signup)
            .service(booking_requests::list_requests)
            .service(booking_requests::create_request)
            .service(booking_requests::confirm_request)
            .service(providers::list_providers)
            .service(providers::provider_dashboard)
            .service(providers::provider_profile),
    );
}
