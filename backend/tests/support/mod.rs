//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! each one uses a different subset of these helpers.
#![allow(dead_code, reason = "each integration test crate uses a subset")]

use std::sync::Arc;

use actix_web::http::{Method, StatusCode};
use actix_web::{App, test, web};
use serde_json::Value;
use tempfile::TempDir;

use service_finder::Trace;
use service_finder::demo_data::{DemoDataSettings, seed_demo_data_on_startup};
use service_finder::domain::{AccountService, BookingRequestService, ProviderDirectoryService};
use service_finder::inbound::http::configure_api;
use service_finder::inbound::http::state::{HttpState, HttpStatePorts};
use service_finder::outbound::persistence::{
    BackendSelection, Database, PoolConfig, SqlBookingRequestRepository, SqlProviderRepository,
    SqlUserRepository, connect,
};

/// Demo requester credentials.
pub const DEMO_USER_EMAIL: &str = "user@example.com";
pub const DEMO_USER_PASSWORD: &str = "ServiceFinder_User_2025!";

/// SQLite store living in a temporary directory.
pub struct TestStore {
    pub database: Database,
    _dir: TempDir,
}

/// Fresh, empty store with the schema in place.
pub async fn sqlite_store() -> TestStore {
    let dir = tempfile::tempdir().expect("temp dir");
    let selection = BackendSelection::Sqlite {
        path: dir.path().join("service_finder.db"),
    };
    let database = connect(PoolConfig::new(selection).with_max_size(2))
        .await
        .expect("connect sqlite");
    database.ensure_schema().await.expect("schema setup");
    TestStore {
        database,
        _dir: dir,
    }
}

/// Store holding the demo dataset.
pub async fn seeded_store() -> TestStore {
    let store = sqlite_store().await;
    seed_demo_data_on_startup(&DemoDataSettings::default(), &store.database)
        .await
        .expect("seeding succeeds")
        .expect("seeding enabled");
    store
}

/// Handler state wired to SQL repositories, as the server builds it.
pub fn http_state(database: &Database) -> HttpState {
    let users = Arc::new(SqlUserRepository::new(database.clone()));
    let providers = Arc::new(SqlProviderRepository::new(database.clone()));
    let requests = Arc::new(SqlBookingRequestRepository::new(database.clone()));
    let accounts = Arc::new(AccountService::new(users.clone()));
    let bookings = Arc::new(BookingRequestService::new(
        requests.clone(),
        users,
        providers.clone(),
    ));
    HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        signup: accounts,
        requests: bookings.clone(),
        requests_query: bookings,
        providers: Arc::new(ProviderDirectoryService::new(providers, requests)),
    })
}

/// Response captured from one API call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

/// Run one request through the full `/api` stack over `database`.
pub async fn call_api(
    database: &Database,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> ApiResponse {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(http_state(database)))
            .wrap(Trace)
            .configure(configure_api),
    )
    .await;
    let mut request = test::TestRequest::default().method(method).uri(uri);
    if let Some(json) = body {
        request = request.set_json(json);
    }
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    };
    ApiResponse {
        status,
        trace_id,
        body,
    }
}
