//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    BookingRequestsCommand, BookingRequestsQuery, LoginService, ProvidersQuery, SignupService,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupService>,
    pub requests: Arc<dyn BookingRequestsCommand>,
    pub requests_query: Arc<dyn BookingRequestsQuery>,
    pub providers: Arc<dyn ProvidersQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub signup: Arc<dyn SignupService>,
    pub requests: Arc<dyn BookingRequestsCommand>,
    pub requests_query: Arc<dyn BookingRequestsQuery>,
    pub providers: Arc<dyn ProvidersQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use service_finder::domain::{AccountService, BookingRequestService, ProviderDirectoryService};
    /// use service_finder::inbound::http::state::{HttpState, HttpStatePorts};
    /// use service_finder::outbound::persistence::{
    ///     Database, SqlBookingRequestRepository, SqlProviderRepository, SqlUserRepository,
    /// };
    ///
    /// # fn build(db: Database) -> HttpState {
    /// let users = Arc::new(SqlUserRepository::new(db.clone()));
    /// let providers = Arc::new(SqlProviderRepository::new(db.clone()));
    /// let requests = Arc::new(SqlBookingRequestRepository::new(db));
    /// let accounts = Arc::new(AccountService::new(users.clone()));
    /// let bookings = Arc::new(BookingRequestService::new(
    ///     requests.clone(),
    ///     users,
    ///     providers.clone(),
    /// ));
    /// HttpState::new(HttpStatePorts {
    ///     login: accounts.clone(),
    ///     signup: accounts,
    ///     requests: bookings.clone(),
    ///     requests_query: bookings,
    ///     providers: Arc::new(ProviderDirectoryService::new(providers, requests)),
    /// })
    /// # }
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            signup,
            requests,
            requests_query,
            providers,
        } = ports;
        Self {
            login,
            signup,
            requests,
            requests_query,
            providers,
        }
    }
}
