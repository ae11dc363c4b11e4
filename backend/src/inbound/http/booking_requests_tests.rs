//! Handler tests for booking request endpoints.

use super::*;
use crate::domain::ports::{MockBookingRequestsCommand, MockBookingRequestsQuery};
use crate::inbound::http::test_utils::{TestPorts, brake_repair, call_json};
use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use rstest::rstest;
use serde_json::{Value, json};

fn create_body() -> Value {
    json!({
        "title": "Brake Repair",
        "category": "Automotive",
        "date": "2025-02-10",
        "budget": 150,
        "status": "pending",
        "user_name": "John Doe",
    })
}

fn create_expecting(budget: i64) -> MockBookingRequestsCommand {
    let mut requests = MockBookingRequestsCommand::new();
    requests
        .expect_create()
        .withf(move |request| {
            request.title() == "Brake Repair"
                && request.budget() == budget
                && request.requester() == "John Doe"
        })
        .times(1)
        .return_once(|_| Ok(BookingRequestId::new(7)));
    requests
}

#[rstest]
#[case(Some("user"), Some("John Doe"), RequestScope::Requester("John Doe".to_owned()))]
#[case(Some("provider"), Some("Pro Fixer"), RequestScope::Provider("Pro Fixer".to_owned()))]
#[case(Some("admin"), Some("x"), RequestScope::All)]
#[case(None, None, RequestScope::All)]
#[actix_web::test]
async fn list_passes_the_role_scope_through(
    #[case] role: Option<&str>,
    #[case] name: Option<&str>,
    #[case] expected: RequestScope,
) {
    let mut requests_query = MockBookingRequestsQuery::new();
    requests_query
        .expect_list()
        .withf(move |scope| *scope == expected)
        .times(1)
        .return_once(|_| Ok(vec![brake_repair(1, None)]));

    let mut uri = String::from("/api/requests");
    let params: Vec<String> = [("role", role), ("name", name)]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| format!("{key}={}", v.replace(' ', "%20"))))
        .collect();
    if !params.is_empty() {
        uri = format!("{uri}?{}", params.join("&"));
    }

    let (status, body) = call_json(
        TestPorts {
            requests_query,
            ..TestPorts::default()
        },
        actix_test::TestRequest::get().uri(&uri),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["title"], "Brake Repair");
    assert_eq!(body[0]["status"], "pending");
    assert_eq!(body[0]["provider_name"], Value::Null);
}

#[rstest]
#[actix_web::test]
async fn create_returns_the_new_id() {
    let (status, body) = call_json(
        TestPorts {
            requests: create_expecting(150),
            ..TestPorts::default()
        },
        actix_test::TestRequest::post()
            .uri("/api/requests")
            .set_json(create_body()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 7}));
}

#[rstest]
#[actix_web::test]
async fn create_accepts_a_numeric_string_budget() {
    let mut payload = create_body();
    payload["budget"] = json!(" 150 ");

    let (status, _) = call_json(
        TestPorts {
            requests: create_expecting(150),
            ..TestPorts::default()
        },
        actix_test::TestRequest::post()
            .uri("/api/requests")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[case("budget", json!("lots"), "budget", "invalid_budget")]
#[case("budget", json!(-5), "budget", "negative_budget")]
#[case("title", json!("   "), "title", "empty_title")]
#[case("date", json!("10/02/2025"), "date", "invalid_date")]
#[case("category", json!(""), "category", "empty_category")]
#[case("user_name", json!(""), "user_name", "empty_user_name")]
#[case("status", json!("confirmed"), "status", "status_not_pending")]
#[actix_web::test]
async fn invalid_create_payloads_are_rejected(
    #[case] key: &str,
    #[case] value: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut payload = create_body();
    payload[key] = value;

    let (status, body) = call_json(
        TestPorts::default(),
        actix_test::TestRequest::post()
            .uri("/api/requests")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn unknown_requester_is_not_found() {
    let mut requests = MockBookingRequestsCommand::new();
    requests
        .expect_create()
        .return_once(|_| Err(Error::not_found("user Nobody not found")));
    let mut payload = create_body();
    payload["user_name"] = json!("Nobody");

    let (status, body) = call_json(
        TestPorts {
            requests,
            ..TestPorts::default()
        },
        actix_test::TestRequest::post()
            .uri("/api/requests")
            .set_json(payload),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user Nobody not found");
}

#[rstest]
#[actix_web::test]
async fn confirm_returns_the_updated_request() {
    let mut requests = MockBookingRequestsCommand::new();
    requests
        .expect_confirm()
        .withf(|id, provider| *id == BookingRequestId::new(1) && provider == "Pro Fixer")
        .times(1)
        .return_once(|_, _| Ok(brake_repair(1, Some("Pro Fixer"))));

    let (status, body) = call_json(
        TestPorts {
            requests,
            ..TestPorts::default()
        },
        actix_test::TestRequest::patch()
            .uri("/api/requests/1/confirm")
            .set_json(json!({"provider_name": " Pro Fixer "})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["request"]["status"], "confirmed");
    assert_eq!(body["request"]["provider_name"], "Pro Fixer");
}

#[rstest]
#[case(Error::conflict("booking request 1 is already confirmed"), StatusCode::CONFLICT)]
#[case(Error::not_found("booking request 1 not found"), StatusCode::NOT_FOUND)]
#[case(Error::invalid_request("unknown provider: Ghost"), StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn confirm_failures_map_to_statuses(#[case] error: Error, #[case] expected: StatusCode) {
    let mut requests = MockBookingRequestsCommand::new();
    requests.expect_confirm().return_once(move |_, _| Err(error));

    let (status, body) = call_json(
        TestPorts {
            requests,
            ..TestPorts::default()
        },
        actix_test::TestRequest::patch()
            .uri("/api/requests/1/confirm")
            .set_json(json!({"provider_name": "Pro Fixer"})),
    )
    .await;

    assert_eq!(status, expected);
    assert!(body["error"].is_string());
}

#[rstest]
#[actix_web::test]
async fn blank_provider_name_is_rejected() {
    let (status, body) = call_json(
        TestPorts::default(),
        actix_test::TestRequest::patch()
            .uri("/api/requests/1/confirm")
            .set_json(json!({"provider_name": "  "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "provider_name");
}

#[rstest]
#[actix_web::test]
async fn non_numeric_ids_are_invalid_paths() {
    let (status, body) = call_json(
        TestPorts::default(),
        actix_test::TestRequest::patch()
            .uri("/api/requests/abc/confirm")
            .set_json(json!({"provider_name": "Pro Fixer"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "invalid_path");
}
