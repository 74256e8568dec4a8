#![allow(clippy::unwrap_used)]
// Integration tests for `Client` using wiremock.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use opentelemetry::trace::TracerProvider as _;
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;
use tracing_subscriber::layer::SubscriberExt;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use pantry_api::envelope::Slot;
use pantry_api::models::{
    MealPlanTask, MealPlanTaskStatus, MealPlanTaskStatusChangeRequestInput, UserLoginInput,
    UserRegistrationInput, ValidInstrument, ValidInstrumentCreationRequestInput,
    ValidMeasurementConversion, Webhook,
};
use pantry_api::endpoints::{MEAL_PLAN_TASKS, VALID_INSTRUMENTS, VALID_MEASUREMENT_CONVERSIONS};
use pantry_api::{
    AvatarUpload, Client, ClientConfig, Context, Credentials, Error, ErrorKind, QueryFilter,
    RequestSpec, TransportConfig,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = client_for(&server, Credentials::bearer("test-token"));
    (server, client)
}

fn client_for(server: &MockServer, credentials: Credentials) -> Client {
    let base_url = Url::parse(&server.uri()).unwrap();
    Client::new(ClientConfig::new(base_url).credentials(credentials)).unwrap()
}

async fn requests(server: &MockServer) -> Vec<Request> {
    server.received_requests().await.unwrap()
}

/// Serve one `Transfer-Encoding: chunked` response (no `Content-Length`)
/// on a throwaway listener and return its base URL.
async fn chunked_server(chunks: Vec<String>) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0_u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let mut response = String::from(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ntransfer-encoding: chunked\r\n\r\n",
        );
        for chunk in &chunks {
            response.push_str(&format!("{:x}\r\n{chunk}\r\n", chunk.len()));
        }
        response.push_str("0\r\n\r\n");
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });
    Url::parse(&format!("http://{addr}")).unwrap()
}

fn split_into_chunks(body: &str, size: usize) -> Vec<String> {
    body.as_bytes()
        .chunks(size)
        .map(|c| String::from_utf8(c.to_vec()).unwrap())
        .collect()
}

fn instrument_json() -> serde_json::Value {
    json!({
        "id": "inst_123",
        "name": "whisk",
        "pluralName": "whisks",
        "description": "balloon whisk",
        "iconPath": "",
        "slug": "whisk",
        "displayInSummaryLists": true,
        "includeInGeneratedInstructions": true,
        "usableForStorage": false,
        "createdAt": "2024-01-02T03:04:05Z",
        "lastUpdatedAt": null,
        "archivedAt": null
    })
}

fn instrument() -> ValidInstrument {
    serde_json::from_value(instrument_json()).unwrap()
}

// ── CRUD scenarios ──────────────────────────────────────────────────

#[tokio::test]
async fn test_create_round_trips_converted_entity() {
    let (server, client) = setup().await;
    let fixture = instrument();
    let input = ValidInstrumentCreationRequestInput::from(&fixture);

    Mock::given(method("POST"))
        .and(path("/api/v1/valid_instruments"))
        .and(header("content-type", "application/json"))
        .and(body_json(&input))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": instrument_json(), "error": null})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .create_valid_instrument(&Context::new(), &input)
        .await
        .unwrap();

    assert_eq!(created, fixture);
    assert_eq!(ValidInstrumentCreationRequestInput::from(&created), input);
}

#[tokio::test]
async fn test_archive_accepts_empty_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/valid_instruments/inst_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .archive_valid_instrument(&Context::new(), "inst_123")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_archive_surfaces_envelope_error() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/valid_instruments/inst_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"code": "IN_USE", "message": "instrument is referenced by recipes"}
        })))
        .mount(&server)
        .await;

    let err = client
        .archive_valid_instrument(&Context::new(), "inst_123")
        .await
        .unwrap_err();
    assert_eq!(err.api_error_code(), Some("IN_USE"));
}

#[tokio::test]
async fn test_list_copies_pagination() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/valid_instruments"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [instrument_json()],
            "pagination": {"page": 2, "limit": 1, "filteredCount": 7, "totalCount": 9}
        })))
        .mount(&server)
        .await;

    let filter = QueryFilter::new().page(2).limit(1);
    let page = client
        .get_valid_instruments(&Context::new(), Some(&filter))
        .await
        .unwrap();

    assert_eq!(page.data, vec![instrument()]);
    assert_eq!(page.pagination.filtered_count, 7);
    assert_eq!(page.pagination.total_count, 9);
}

#[tokio::test]
async fn test_task_status_change_uses_patch() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/api/v1/meal_plans/mp_1/tasks/task_1"))
        .and(body_json(json!({"status": "finished"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "task_1", "status": "finished"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input = MealPlanTaskStatusChangeRequestInput {
        status: Some(MealPlanTaskStatus::Finished),
        ..Default::default()
    };
    let task: MealPlanTask = client
        .change_meal_plan_task_status(&Context::new(), "mp_1", "task_1", &input)
        .await
        .unwrap();
    assert_eq!(task.status, MealPlanTaskStatus::Finished);
}

// ── Envelope precedence and status mapping ──────────────────────────

#[tokio::test]
async fn test_envelope_error_on_200_wins_over_data() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/webhooks/wh_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "error": {"code": "FORBIDDEN_WEBHOOK", "message": "nope"}
        })))
        .mount(&server)
        .await;

    let result: Result<Webhook, Error> = client.get_webhook(&Context::new(), "wh_1").await;
    match result {
        Err(Error::Application { code, message, .. }) => {
            assert_eq!(code, "FORBIDDEN_WEBHOOK");
            assert_eq!(message, "nope");
        }
        other => panic!("expected Application error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_envelope_error_hides_present_data() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/valid_instruments/inst_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": instrument_json(),
            "error": {"code": "STALE", "message": "entity is stale"},
            "details": ["refetch"]
        })))
        .mount(&server)
        .await;

    let err = client
        .get_valid_instrument(&Context::new(), "inst_123")
        .await
        .unwrap_err();
    match err {
        Error::Application { code, details, .. } => {
            assert_eq!(code, "STALE");
            assert_eq!(details, vec!["refetch".to_owned()]);
        }
        other => panic!("expected Application error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/valid_ingredients/ing_missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client
        .get_valid_ingredient(&Context::new(), "ing_missing")
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got: {err:?}");
}

#[tokio::test]
async fn test_status_table_ignores_body() {
    let (server, client) = setup().await;
    let cases = [
        (400, ErrorKind::InvalidRequest),
        (401, ErrorKind::Unauthorized),
        (403, ErrorKind::Unauthorized),
        (404, ErrorKind::NotFound),
        (409, ErrorKind::InvalidRequest),
        (500, ErrorKind::ServerError),
        (503, ErrorKind::ServerError),
    ];

    for (status, _) in cases {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/recipes/r{status}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "data": {"id": "ignored", "name": "ignored"},
                "error": {"code": "SERVER_SAYS", "message": "details"}
            })))
            .mount(&server)
            .await;
    }

    for (status, kind) in cases {
        let err = client
            .get_recipe(&Context::new(), &format!("r{status}"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), kind, "HTTP {status}");
        assert_eq!(err.api_error_code(), Some("SERVER_SAYS"), "HTTP {status}");
    }
}

#[tokio::test]
async fn test_non_json_body_is_decode_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client.get_recipe(&Context::new(), "r1").await.unwrap_err();
    match err {
        Error::DecodeFailed { body, .. } => assert!(body.contains("maintenance")),
        other => panic!("expected DecodeFailed, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_data_is_decode_failure() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": null})))
        .mount(&server)
        .await;

    let err = client.get_recipe(&Context::new(), "r1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DecodeFailed);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = Client::new(ClientConfig::new(base_url).max_body_bytes(64)).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/big"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "big", "name": "x".repeat(1024)}
        })))
        .mount(&server)
        .await;

    let err = client.get_recipe(&Context::new(), "big").await.unwrap_err();
    assert!(
        matches!(err, Error::ResponseTooLarge { limit: 64 }),
        "expected ResponseTooLarge, got: {err:?}"
    );
}

#[tokio::test]
async fn test_oversized_chunked_body_is_rejected_while_streaming() {
    let body = json!({"data": {"id": "r1", "name": "x".repeat(200)}}).to_string();
    let base_url = chunked_server(split_into_chunks(&body, 32)).await;
    let client = Client::new(ClientConfig::new(base_url).max_body_bytes(64)).unwrap();

    let err = client.get_recipe(&Context::new(), "r1").await.unwrap_err();
    assert!(
        matches!(err, Error::ResponseTooLarge { limit: 64 }),
        "expected ResponseTooLarge, got: {err:?}"
    );
}

#[tokio::test]
async fn test_chunked_body_under_the_cap_decodes() {
    let body = json!({"data": {"id": "r1", "name": "soup"}}).to_string();
    let base_url = chunked_server(split_into_chunks(&body, 8)).await;
    let client = Client::new(ClientConfig::new(base_url).max_body_bytes(64)).unwrap();

    let recipe = client.get_recipe(&Context::new(), "r1").await.unwrap();
    assert_eq!(recipe.name, "soup");
}

#[tokio::test]
async fn test_connection_refused_is_transient() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let base_url = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();
    let client = Client::new(ClientConfig::new(base_url)).unwrap();

    let err = client.get_recipe(&Context::new(), "r1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TransportFailed);
    assert!(err.is_transient());
}

// ── URL construction ────────────────────────────────────────────────

#[tokio::test]
async fn test_search_uses_default_limit_and_sorted_keys() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/valid_ingredient_groups/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let groups = client
        .search_valid_ingredient_groups(&Context::new(), "tomato", 0)
        .await
        .unwrap();
    assert!(groups.is_empty());

    let received = requests(&server).await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.query(), Some("limit=20&q=tomato"));
}

#[tokio::test]
async fn test_search_tolerates_null_data() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .mount(&server)
        .await;

    let recipes = client
        .search_recipes(&Context::new(), "soup", 5)
        .await
        .unwrap();
    assert!(recipes.is_empty());
}

#[tokio::test]
async fn test_missing_filter_matches_default_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/valid_instruments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let cx = Context::new();
    client.get_valid_instruments(&cx, None).await.unwrap();
    client
        .get_valid_instruments(&cx, Some(&QueryFilter::default()))
        .await
        .unwrap();

    let received = requests(&server).await;
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].url.query(), received[1].url.query());
    assert_eq!(received[0].url.query(), Some("limit=50&page=1&sortBy=asc"));
}

#[tokio::test]
async fn test_nested_listing_fills_parent_slot() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/meal_plans/mp_1/grocery_list_items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .get_meal_plan_grocery_list_items(&Context::new(), "mp_1", None)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_ids_are_percent_encoded() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/a%2Fb"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"id": "a/b", "name": "slashed"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let recipe = client.get_recipe(&Context::new(), "a/b").await.unwrap();
    assert_eq!(recipe.id, "a/b");
}

// ── Guards ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_empty_id_is_rejected_without_traffic() {
    let (server, client) = setup().await;

    let err = client
        .get_meal_plan_grocery_list_item(&Context::new(), "", "x")
        .await
        .unwrap_err();
    assert!(
        matches!(err, Error::InvalidId { param: "mealPlanID" }),
        "expected InvalidId, got: {err:?}"
    );
    assert!(requests(&server).await.is_empty());
}

#[tokio::test]
async fn test_every_guard_fails_before_the_network() {
    let (server, client) = setup().await;
    let cx = Context::new();

    let blank_name = ValidInstrumentCreationRequestInput::default();
    let err = client.create_valid_instrument(&cx, &blank_name).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = VALID_INSTRUMENTS
        .create::<ValidInstrument, ValidInstrumentCreationRequestInput>(&client, &cx, &[], None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NilInput);

    let err = client.search_recipes(&cx, "  ", 0).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyQuery);

    let err = client
        .search_for_users_by_username(&cx, "", 0)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyUsername);

    let err = client.archive_webhook(&cx, "").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidId);

    let err = client
        .update_meal_plan_grocery_list_item(&cx, "mp_1", "", &Default::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidId {
            param: "mealPlanGroceryListItemID"
        }
    ));

    let err = client
        .upload_new_avatar(&cx, &AvatarUpload::new(Vec::new(), "png"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NilInput);

    let spec = RequestSpec::get("GetValidInstrument", "/api/v1/valid_instruments/%s")
        .param("validInstrumentID", "inst_123")
        .expect_data();
    let err = client
        .execute::<Slot<ValidInstrument>>(&cx, spec, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NilDestination);

    assert!(err.is_guard());
    assert!(requests(&server).await.is_empty());
}

// ── Deadlines and cancellation ──────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_deadline_turns_into_timeout() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"id": "slow", "name": "slow"}}))
                .set_delay(Duration::from_secs(60)),
        )
        .mount(&server)
        .await;

    let cx = Context::new().with_timeout(Duration::from_millis(10));
    let started = tokio::time::Instant::now();
    let err = client.get_recipe(&cx, "slow").await.unwrap_err();

    assert!(matches!(err, Error::Timeout { .. }), "expected Timeout, got: {err:?}");
    assert!(err.is_transient());
    assert!(started.elapsed() < Duration::from_millis(50), "took {:?}", started.elapsed());
}

#[tokio::test]
async fn test_unbounded_default_timeout_saturates() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let transport = TransportConfig {
        timeout: Duration::from_secs(u64::MAX),
        ..TransportConfig::default()
    };
    let client = Client::new(ClientConfig::new(base_url).transport(transport)).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/r1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "r1", "name": "soup"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cx = Context::new().with_timeout(Duration::MAX);
    let recipe = client.get_recipe(&cx, "r1").await.unwrap();
    assert_eq!(recipe.id, "r1");
}

#[tokio::test]
async fn test_cancellation_interrupts_in_flight_call() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"id": "slow", "name": "slow"}}))
                .set_delay(Duration::from_secs(60)),
        )
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let cx = Context::new().with_cancellation(token.clone());
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let started = Instant::now();
    let err = client.get_recipe(&cx, "slow").await.unwrap_err();

    assert!(matches!(err, Error::Cancelled), "expected Cancelled, got: {err:?}");
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_cancelled_context_sends_nothing() {
    let (server, client) = setup().await;
    let token = CancellationToken::new();
    token.cancel();

    let cx = Context::new().with_cancellation(token);
    let err = client.get_recipe(&cx, "r1").await.unwrap_err();

    assert!(matches!(err, Error::Cancelled));
    assert!(requests(&server).await.is_empty());
}

// ── Authentication and headers ──────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_and_trace_headers() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/self"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"id": "u1", "username": "chef"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cx = Context::new().with_correlation_id("corr-42");
    let me = client.get_self(&cx).await.unwrap();
    assert_eq!(me.username, "chef");

    let received = requests(&server).await;
    let headers = &received[0].headers;
    assert_eq!(headers.get("correlation-id").unwrap().to_str().unwrap(), "corr-42");

    let traceparent = headers.get("traceparent").unwrap().to_str().unwrap();
    let parts: Vec<&str> = traceparent.split('-').collect();
    assert_eq!(parts.len(), 4, "{traceparent}");
    assert_eq!(parts[0], "00");
    assert_eq!(parts[1].len(), 32);
    assert_eq!(parts[2].len(), 16);
    assert_eq!(parts[3], "01");
}

#[tokio::test]
async fn test_session_cookie_credentials() {
    let server = MockServer::start().await;
    let client = client_for(&server, Credentials::cookie("pantry_session", "abc123"));

    Mock::given(method("GET"))
        .and(path("/api/v1/households/current"))
        .and(header("cookie", "pantry_session=abc123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "h1", "name": "home"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let household = client.get_current_household(&Context::new()).await.unwrap();
    assert_eq!(household.id, "h1");
}

#[tokio::test]
async fn test_registration_is_sent_without_credentials() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "createdUserID": "u1",
                "username": "chef",
                "emailAddress": "chef@example.com",
                "twoFactorSecret": "JBSWY3DPEHPK3PXP",
                "twoFactorQRCode": ""
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let input: UserRegistrationInput = serde_json::from_value(json!({
        "username": "chef",
        "password": "correct horse battery",
        "emailAddress": "chef@example.com"
    }))
    .unwrap();
    let created = client.create_user(&Context::new(), &input).await.unwrap();
    assert_eq!(created.created_user_id, "u1");

    let received = requests(&server).await;
    assert!(!received[0].headers.contains_key("authorization"));
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["password"], "correct horse battery");
}

#[tokio::test]
async fn test_login_token_feeds_a_bearer_client() {
    let server = MockServer::start().await;
    let anonymous = client_for(&server, Credentials::None);

    Mock::given(method("POST"))
        .and(path("/users/login/jwt"))
        .and(body_json(json!({"username": "chef", "password": "hunter22"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"userID": "u1", "householdID": "h1", "token": "issued.jwt.token"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users/self"))
        .and(header("authorization", "Bearer issued.jwt.token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": {"id": "u1", "username": "chef"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let cx = Context::new();
    let token = anonymous
        .login_for_token(&cx, &UserLoginInput::new("chef", "hunter22"))
        .await
        .unwrap();
    assert_eq!(token.user_id, "u1");

    let authed = anonymous.with_credentials(Credentials::Bearer(token.token));
    let me = authed.get_self(&cx).await.unwrap();
    assert_eq!(me.id, "u1");
}

#[tokio::test]
async fn test_username_search_uses_q() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users/search"))
        .and(query_param("q", "che"))
        .and(query_param("limit", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "u1", "username": "chef"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let users = client
        .search_for_users_by_username(&Context::new(), "che", 0)
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_avatar_upload_is_multipart() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/avatar/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let upload = AvatarUpload::new(b"\x89PNG fake image".to_vec(), "PNG");
    client.upload_new_avatar(&Context::new(), &upload).await.unwrap();

    let received = requests(&server).await;
    let content_type = received[0].headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data"), "{content_type}");

    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains("name=\"avatar\""), "{body}");
    assert!(body.contains("filename=\"avatar.png\""), "{body}");
    assert!(body.contains("image/png"), "{body}");
}

#[tokio::test]
async fn test_unsupported_avatar_type_is_not_sent() {
    let (server, client) = setup().await;

    let upload = AvatarUpload::new(vec![1, 2, 3], "bmp");
    let err = client.upload_new_avatar(&Context::new(), &upload).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RequestBuildFailed);
    assert!(requests(&server).await.is_empty());
}

#[tokio::test]
async fn test_switch_household_posts_id() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/users/household/select"))
        .and(body_json(json!({"householdID": "h2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "u1"}})))
        .expect(1)
        .mount(&server)
        .await;

    client
        .switch_active_household(&Context::new(), "h2")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_calls_under_one_caller_span_share_a_trace() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/r1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "r1", "name": "soup"}})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let provider = opentelemetry_sdk::trace::TracerProvider::builder().build();
    let subscriber = tracing_subscriber::registry()
        .with(tracing_opentelemetry::layer().with_tracer(provider.tracer("pantry-api-tests")));
    let _guard = tracing::subscriber::set_default(subscriber);

    let cx = Context::new();
    async {
        client.get_recipe(&cx, "r1").await.unwrap();
        client.get_recipe(&cx, "r1").await.unwrap();
    }
    .instrument(tracing::info_span!("caller_request"))
    .await;

    let parents: Vec<Vec<String>> = requests(&server)
        .await
        .iter()
        .map(|r| {
            let value = r.headers.get("traceparent").unwrap().to_str().unwrap();
            value.split('-').map(str::to_owned).collect()
        })
        .collect();
    assert_eq!(parents.len(), 2);
    assert_eq!(parents[0][1], parents[1][1], "calls should share the caller's trace");
    assert_ne!(parents[0][2], parents[1][2], "each call is its own span");
}

// ── Logging ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
struct ErrorEvents(Arc<AtomicUsize>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for ErrorEvents {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        if *event.metadata().level() == tracing::Level::ERROR {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[tokio::test]
async fn test_failed_call_logs_exactly_once() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/boom"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/recipes/fine"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "fine", "name": "ok"}})),
        )
        .mount(&server)
        .await;

    let events = ErrorEvents::default();
    let subscriber = tracing_subscriber::registry().with(events.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let cx = Context::new();
    client.get_recipe(&cx, "fine").await.unwrap();
    assert_eq!(events.0.load(Ordering::SeqCst), 0);

    let err = client.get_recipe(&cx, "boom").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServerError);
    assert_eq!(events.0.load(Ordering::SeqCst), 1);

    let err = client.get_recipe(&cx, "").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidId);
    assert_eq!(events.0.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_unserved_route_is_logged_like_any_failure() {
    let (server, client) = setup().await;

    let events = ErrorEvents::default();
    let subscriber = tracing_subscriber::registry().with(events.clone());
    let _guard = tracing::subscriber::set_default(subscriber);

    let cx = Context::new();
    let err = VALID_MEASUREMENT_CONVERSIONS
        .list::<ValidMeasurementConversion>(&client, &cx, &[], None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestBuildFailed);
    assert!(err.to_string().contains("GetValidMeasurementConversions"), "got: {err}");
    assert_eq!(events.0.load(Ordering::SeqCst), 1);

    let err = MEAL_PLAN_TASKS
        .archive(&client, &cx, &["mp_1", "task_1"])
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestBuildFailed);
    assert_eq!(events.0.load(Ordering::SeqCst), 2);

    assert!(requests(&server).await.is_empty());
}
