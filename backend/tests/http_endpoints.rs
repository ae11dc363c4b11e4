//! End-to-end HTTP tests over a temporary SQLite store.

mod support;

use actix_web::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::{Value, json};

use support::{DEMO_USER_EMAIL, DEMO_USER_PASSWORD, call_api, seeded_store, sqlite_store};

fn brake_repair_id(body: &Value) -> i64 {
    body.as_array()
        .and_then(|rows| rows.iter().find(|row| row["title"] == "Brake Repair"))
        .and_then(|row| row["id"].as_i64())
        .expect("seeded Brake Repair request")
}

#[rstest]
#[actix_web::test]
async fn demo_requester_can_log_in() {
    let store = seeded_store().await;
    let res = call_api(
        &store.database,
        Method::POST,
        "/api/login",
        Some(json!({
            "email": DEMO_USER_EMAIL,
            "password": DEMO_USER_PASSWORD,
            "role": "user",
        })),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({"name": "John Doe", "role": "user"}));
}

#[rstest]
#[case(DEMO_USER_EMAIL, "wrong-password", "user")]
#[case(DEMO_USER_EMAIL, DEMO_USER_PASSWORD, "provider")]
#[case("nobody@example.com", DEMO_USER_PASSWORD, "user")]
#[case(DEMO_USER_EMAIL, DEMO_USER_PASSWORD, "admin")]
#[case("", DEMO_USER_PASSWORD, "user")]
#[case(DEMO_USER_EMAIL, "", "user")]
#[actix_web::test]
async fn rejected_logins_look_identical(
    #[case] email: &str,
    #[case] password: &str,
    #[case] role: &str,
) {
    let store = seeded_store().await;
    let res = call_api(
        &store.database,
        Method::POST,
        "/api/login",
        Some(json!({"email": email, "password": password, "role": role})),
    )
    .await;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.body["error"], "invalid credentials");
    assert_eq!(res.body["traceId"].as_str(), res.trace_id.as_deref());
}

#[rstest]
#[actix_web::test]
async fn signup_creates_a_requester_that_can_log_in() {
    let store = seeded_store().await;
    let signup = call_api(
        &store.database,
        Method::POST,
        "/api/signup",
        Some(json!({"name": "Jane Roe", "email": "jane@example.com", "password": "hunter2"})),
    )
    .await;
    assert_eq!(signup.status, StatusCode::OK);
    assert_eq!(
        signup.body,
        json!({"success": true, "name": "Jane Roe", "role": "user"})
    );

    let login = call_api(
        &store.database,
        Method::POST,
        "/api/login",
        Some(json!({"email": "jane@example.com", "password": "hunter2", "role": "user"})),
    )
    .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["name"], "Jane Roe");

    let duplicate = call_api(
        &store.database,
        Method::POST,
        "/api/signup",
        Some(json!({"name": "Jane Again", "email": "jane@example.com", "password": "x"})),
    )
    .await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.body["error"], "exists");
}

#[rstest]
#[actix_web::test]
async fn providers_list_the_demo_catalogue() {
    let store = seeded_store().await;
    let res = call_api(&store.database, Method::GET, "/api/providers", None).await;

    assert_eq!(res.status, StatusCode::OK);
    let names: Vec<&str> = res
        .body
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|row| row["name"].as_str())
        .collect();
    assert_eq!(
        names,
        ["Pro Fixer", "Speedy Cleaners", "Electro Spark", "Pure Water"]
    );
    assert_eq!(res.body[0]["rating"], 4.8);
    assert_eq!(res.body[1]["jobs"], 250);
}

#[rstest]
#[actix_web::test]
async fn created_requests_are_scoped_by_role() {
    let store = seeded_store().await;
    let created = call_api(
        &store.database,
        Method::POST,
        "/api/requests",
        Some(json!({
            "title": "Fix sink",
            "category": "Plumbing",
            "date": "2025-03-01",
            "budget": "80",
            "status": "pending",
            "user_name": "John Doe",
        })),
    )
    .await;
    assert_eq!(created.status, StatusCode::OK);
    assert!(created.body["id"].as_i64().is_some());

    let mine = call_api(
        &store.database,
        Method::GET,
        "/api/requests?role=user&name=John%20Doe",
        None,
    )
    .await;
    assert_eq!(mine.body.as_array().map(Vec::len), Some(2));
    assert_eq!(mine.body[1]["budget"], 80);
    assert_eq!(mine.body[1]["status"], "pending");

    let stranger = call_api(
        &store.database,
        Method::GET,
        "/api/requests?role=user&name=Someone",
        None,
    )
    .await;
    assert_eq!(stranger.body, json!([]));

    let nameless = call_api(&store.database, Method::GET, "/api/requests?role=user", None).await;
    assert_eq!(nameless.body, json!([]));

    let everyone = call_api(&store.database, Method::GET, "/api/requests", None).await;
    assert_eq!(everyone.body.as_array().map(Vec::len), Some(2));
}

#[rstest]
#[actix_web::test]
async fn unknown_requester_cannot_create() {
    let store = seeded_store().await;
    let res = call_api(
        &store.database,
        Method::POST,
        "/api/requests",
        Some(json!({
            "title": "Ghost job",
            "category": "Misc",
            "date": "2025-03-01",
            "budget": 10,
            "user_name": "Nobody",
        })),
    )
    .await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn confirmation_happens_exactly_once() {
    let store = seeded_store().await;
    let listed = call_api(&store.database, Method::GET, "/api/requests", None).await;
    let id = brake_repair_id(&listed.body);
    let uri = format!("/api/requests/{id}/confirm");

    let first = call_api(
        &store.database,
        Method::PATCH,
        &uri,
        Some(json!({"provider_name": "Pro Fixer"})),
    )
    .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["success"], true);
    assert_eq!(first.body["request"]["status"], "confirmed");
    assert_eq!(first.body["request"]["provider_name"], "Pro Fixer");

    let second = call_api(
        &store.database,
        Method::PATCH,
        &uri,
        Some(json!({"provider_name": "Speedy Cleaners"})),
    )
    .await;
    assert_eq!(second.status, StatusCode::CONFLICT);

    let mine = call_api(
        &store.database,
        Method::GET,
        "/api/requests?role=user&name=John%20Doe",
        None,
    )
    .await;
    assert_eq!(mine.body[0]["provider_name"], "Pro Fixer");
}

#[rstest]
#[actix_web::test]
async fn simultaneous_confirmations_have_one_winner() {
    let store = seeded_store().await;

    for round in 0..5 {
        let created = call_api(
            &store.database,
            Method::POST,
            "/api/requests",
            Some(json!({
                "title": format!("Gutter Cleaning {round}"),
                "category": "Cleaning",
                "date": "2025-04-01",
                "budget": 90,
                "user_name": "John Doe",
            })),
        )
        .await;
        assert_eq!(created.status, StatusCode::OK);
        let id = created.body["id"].as_i64().expect("created id");
        let uri = format!("/api/requests/{id}/confirm");

        let (left, right) = futures_util::join!(
            call_api(
                &store.database,
                Method::PATCH,
                &uri,
                Some(json!({"provider_name": "Pro Fixer"})),
            ),
            call_api(
                &store.database,
                Method::PATCH,
                &uri,
                Some(json!({"provider_name": "Speedy Cleaners"})),
            ),
        );

        let mut statuses = [left.status, right.status];
        statuses.sort_by_key(StatusCode::as_u16);
        assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT], "round {round}");

        let winner = if left.status == StatusCode::OK { &left } else { &right };
        let loser = if left.status == StatusCode::OK { &right } else { &left };
        assert_eq!(
            loser.body["details"]["providerName"],
            winner.body["request"]["provider_name"]
        );
    }
}

#[rstest]
#[case(9999, "Pro Fixer", StatusCode::NOT_FOUND)]
#[case(1, "Nobody Fixes", StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn confirmation_needs_known_request_and_provider(
    #[case] id: i64,
    #[case] provider: &str,
    #[case] expected: StatusCode,
) {
    let store = seeded_store().await;
    let res = call_api(
        &store.database,
        Method::PATCH,
        &format!("/api/requests/{id}/confirm"),
        Some(json!({"provider_name": provider})),
    )
    .await;

    assert_eq!(res.status, expected);
}

#[rstest]
#[actix_web::test]
async fn providers_see_open_work_and_their_own_confirmations() {
    let store = seeded_store().await;
    let listed = call_api(&store.database, Method::GET, "/api/requests", None).await;
    let id = brake_repair_id(&listed.body);

    let before = call_api(
        &store.database,
        Method::GET,
        "/api/requests?role=provider&name=Pure%20Water",
        None,
    )
    .await;
    assert_eq!(before.body.as_array().map(Vec::len), Some(1));

    call_api(
        &store.database,
        Method::PATCH,
        &format!("/api/requests/{id}/confirm"),
        Some(json!({"provider_name": "Pro Fixer"})),
    )
    .await;

    let other = call_api(
        &store.database,
        Method::GET,
        "/api/requests?role=provider&name=Pure%20Water",
        None,
    )
    .await;
    assert_eq!(other.body, json!([]));

    let owner = call_api(
        &store.database,
        Method::GET,
        "/api/providers/Pro%20Fixer/dashboard",
        None,
    )
    .await;
    assert_eq!(owner.status, StatusCode::OK);
    assert_eq!(owner.body["available"], json!([]));
    assert_eq!(owner.body["active"][0]["title"], "Brake Repair");
    assert_eq!(owner.body["estimated_earnings"], 124 * 45);
}

#[rstest]
#[actix_web::test]
async fn provider_profiles_match_exact_names() {
    let store = seeded_store().await;
    let found = call_api(&store.database, Method::GET, "/api/providers/Pure%20Water", None).await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["specialty"], "Plumber");

    let missing = call_api(&store.database, Method::GET, "/api/providers/pure%20water", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_an_invalid_request() {
    let store = sqlite_store().await;
    let res = call_api(
        &store.database,
        Method::POST,
        "/api/login",
        Some(json!({"email": "user@example.com"})),
    )
    .await;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["code"], "invalid_request");
    assert_eq!(res.body["details"]["code"], "invalid_json");
}

#[rstest]
#[actix_web::test]
async fn empty_store_lists_nothing() {
    let store = sqlite_store().await;
    let providers = call_api(&store.database, Method::GET, "/api/providers", None).await;
    let requests = call_api(&store.database, Method::GET, "/api/requests", None).await;

    assert_eq!(providers.body, json!([]));
    assert_eq!(requests.body, json!([]));
}
