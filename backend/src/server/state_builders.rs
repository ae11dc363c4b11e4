//! Wiring of SQL repositories into the domain services behind `HttpState`.

use std::sync::Arc;

use actix_web::web;

use service_finder::domain::{AccountService, BookingRequestService, ProviderDirectoryService};
use service_finder::inbound::http::state::{HttpState, HttpStatePorts};
use service_finder::outbound::persistence::{
    Database, SqlBookingRequestRepository, SqlProviderRepository, SqlUserRepository,
};

/// Build the shared handler state over one store handle.
pub(super) fn build_http_state(database: &Database) -> web::Data<HttpState> {
    let users = Arc::new(SqlUserRepository::new(database.clone()));
    let providers = Arc::new(SqlProviderRepository::new(database.clone()));
    let requests = Arc::new(SqlBookingRequestRepository::new(database.clone()));

    let accounts = Arc::new(AccountService::new(users.clone()));
    let bookings = Arc::new(BookingRequestService::new(
        requests.clone(),
        users,
        providers.clone(),
    ));
    let directory = Arc::new(ProviderDirectoryService::new(providers, requests));

    web::Data::new(HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        signup: accounts,
        requests: bookings.clone(),
        requests_query: bookings,
        providers: directory,
    }))
}
