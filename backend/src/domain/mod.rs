//! Domain primitives, ports and services.
//!
//! Purpose: define the strongly typed marketplace entities (accounts,
//! providers, booking requests) and the use cases operating on them. Types
//! document their invariants and serde contracts in their own Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - BookingRequest, NewBookingRequest, RequestScope: the request lifecycle.
//! - AccountService, BookingRequestService, ProviderDirectoryService:
//!   implementations of the driving ports in [`ports`].

pub mod account_service;
pub mod auth;
pub mod booking_request;
pub mod booking_request_service;
pub mod demo_data;
pub mod error;
pub mod password;
pub mod ports;
pub mod provider;
pub mod provider_directory_service;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountService, INVALID_CREDENTIALS};
pub use self::auth::{
    AuthenticatedAccount, CredentialsValidationError, LoginCredentials, SignupDetails,
};
pub use self::booking_request::{
    BookingRequest, BookingRequestId, BookingRequestRecord, BookingRequestValidationError,
    NewBookingRequest, RequestScope, RequestStatus, TITLE_MAX, parse_stored_date,
};
pub use self::booking_request_service::BookingRequestService;
pub use self::demo_data::{DemoDataSeeder, DemoDataSeedingError, DemoSeedOutcome, DemoTable};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::password::{PasswordHash, PasswordHashError};
pub use self::provider::{
    EARNINGS_PER_JOB, NewProvider, Provider, ProviderDashboard, ProviderId,
};
pub use self::provider_directory_service::ProviderDirectoryService;
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, Role, UnknownRole, User, UserAccount, UserId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use service_finder::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("nope"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
