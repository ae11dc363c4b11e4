//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use chrono::NaiveDate;
use serde_json::Value;

use crate::domain::ports::{
    MockBookingRequestsCommand, MockBookingRequestsQuery, MockLoginService, MockProvidersQuery,
    MockSignupService,
};
use crate::domain::{
    BookingRequest, BookingRequestId, BookingRequestRecord, Provider, ProviderId, RequestStatus,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Mocked driving ports. Any port left at its default panics when called.
pub struct TestPorts {
    pub login: MockLoginService,
    pub signup: MockSignupService,
    pub requests: MockBookingRequestsCommand,
    pub requests_query: MockBookingRequestsQuery,
    pub providers: MockProvidersQuery,
}

impl Default for TestPorts {
    fn default() -> Self {
        Self {
            login: MockLoginService::new(),
            signup: MockSignupService::new(),
            requests: MockBookingRequestsCommand::new(),
            requests_query: MockBookingRequestsQuery::new(),
            providers: MockProvidersQuery::new(),
        }
    }
}

impl TestPorts {
    pub fn into_state(self) -> HttpState {
        HttpState::new(HttpStatePorts {
            login: Arc::new(self.login),
            signup: Arc::new(self.signup),
            requests: Arc::new(self.requests),
            requests_query: Arc::new(self.requests_query),
            providers: Arc::new(self.providers),
        })
    }
}

/// Send `request` through the `/api` routes and decode the JSON reply.
///
/// An empty body decodes to [`Value::Null`].
pub async fn call_json(ports: TestPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .configure(configure_api),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body is JSON")
    };
    (status, value)
}

/// The seeded "Brake Repair" request, optionally confirmed by `provider`.
pub fn brake_repair(id: i64, provider: Option<&str>) -> BookingRequest {
    BookingRequest::try_from(BookingRequestRecord {
        id: BookingRequestId::new(id),
        title: "Brake Repair".to_owned(),
        category: "Automotive".to_owned(),
        date: NaiveDate::from_ymd_opt(2025, 2, 10).expect("valid date"),
        budget: 150,
        status: if provider.is_some() {
            RequestStatus::Confirmed
        } else {
            RequestStatus::Pending
        },
        user_name: "John Doe".to_owned(),
        provider_name: provider.map(str::to_owned),
    })
    .expect("consistent request")
}

pub fn pro_fixer() -> Provider {
    Provider {
        id: ProviderId::new(1),
        name: "Pro Fixer".to_owned(),
        email: "pro@service.com".to_owned(),
        specialty: "Mechanic".to_owned(),
        rating: 4.8,
        jobs: 124,
        image_url: "https://images.example.com/pro-fixer.jpg".to_owned(),
    }
}
