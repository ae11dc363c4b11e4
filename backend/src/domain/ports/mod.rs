//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (repositories) are implemented by `outbound::persistence`.
//! Driving ports (use cases) are implemented by domain services and called
//! from `inbound::http`.

mod macros;
pub(crate) use macros::define_port_error;

mod booking_request_repository;
mod booking_requests_command;
mod booking_requests_query;
mod demo_data_seed_repository;
mod login_service;
mod provider_repository;
mod providers_query;
mod signup_service;
mod user_repository;

#[cfg(test)]
pub use booking_request_repository::MockBookingRequestRepository;
pub use booking_request_repository::{BookingRequestRepository, BookingRequestRepositoryError};
#[cfg(test)]
pub use booking_requests_command::MockBookingRequestsCommand;
pub use booking_requests_command::BookingRequestsCommand;
#[cfg(test)]
pub use booking_requests_query::MockBookingRequestsQuery;
pub use booking_requests_query::BookingRequestsQuery;
#[cfg(test)]
pub use demo_data_seed_repository::MockDemoDataSeedRepository;
pub use demo_data_seed_repository::{
    DemoDataSeedRepository, DemoDataSeedRepositoryError, DemoRequestSeed, TableSeedResult,
};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use provider_repository::MockProviderRepository;
pub use provider_repository::{ProviderRepository, ProviderRepositoryError};
#[cfg(test)]
pub use providers_query::MockProvidersQuery;
pub use providers_query::ProvidersQuery;
#[cfg(test)]
pub use signup_service::MockSignupService;
pub use signup_service::SignupService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
