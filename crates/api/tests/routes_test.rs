//! End-to-end tests for the review routes against a seeded back-office.

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use backoffice_api::{AppState, create_router};
use backoffice_core::{BackOffice, fixtures};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn seeded_app() -> Router {
    let mut office = BackOffice::default();
    fixtures::seed(&mut office).unwrap();
    create_router(AppState::new(office))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_counts_pending_items() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::GET, "/api/v1/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["pending_deposits"], 1);
    assert_eq!(body["pending_accounts"], 1);
}

#[tokio::test]
async fn test_list_requests_by_status() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::GET, "/api/v1/requests", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requests"].as_array().unwrap().len(), 3);

    let (status, body) = send(&app, Method::GET, "/api/v1/requests?status=approved", None).await;
    assert_eq!(status, StatusCode::OK);
    let requests = body["requests"].as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["transaction_id"], "TXN-67890");

    let (status, body) = send(&app, Method::GET, "/api/v1/requests?status=done", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_approve_deposit_records_transaction() {
    let app = seeded_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/requests/1/approve",
        Some(json!({ "transaction_id": "TXN-1", "processed_at": "2023-07-06T10:00:00Z" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert_eq!(body["transaction_id"], "TXN-1");
    assert_eq!(body["processed_at"], "2023-07-06T10:00:00+00:00");
    assert!(body["rejection_reason"].is_null());

    // Approval does not touch the requester's balance.
    let (_, account) = send(&app, Method::GET, "/api/v1/accounts/1", None).await;
    assert_eq!(account["balance"], "1000");
}

#[tokio::test]
async fn test_approve_deposit_twice_conflicts() {
    let app = seeded_app();
    let uri = "/api/v1/requests/1/approve";

    let (status, _) = send(&app, Method::POST, uri, Some(json!({ "transaction_id": "TXN-1" }))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, uri, Some(json!({ "transaction_id": "TXN-2" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "INVALID_STATE");

    let (_, request) = send(&app, Method::GET, "/api/v1/requests/1", None).await;
    assert_eq!(request["transaction_id"], "TXN-1");
}

#[tokio::test]
async fn test_approve_deposit_without_transaction_id() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::POST, "/api/v1/requests/1/approve", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "approved");
    assert!(body["transaction_id"].is_null());
}

#[tokio::test]
async fn test_approve_deposit_blank_transaction_id_is_absent() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/requests/1/approve",
        Some(json!({ "transaction_id": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["transaction_id"].is_null());
}

#[tokio::test]
async fn test_redeciding_reports_state_before_input() {
    let app = seeded_app();

    // Request 2 is already approved, request 3 already rejected.
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/requests/2/approve",
        Some(json!({ "transaction_id": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "INVALID_STATE");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/requests/3/reject",
        Some(json!({ "reason": " " })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "INVALID_STATE");
}

#[tokio::test]
async fn test_malformed_path_id_uses_error_envelope() {
    let app = seeded_app();
    let (status, body) = send(&app, Method::GET, "/api/v1/requests/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_malformed_body_uses_error_envelope() {
    let app = seeded_app();

    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/accounts/1/balance",
        Some(json!({ "delta": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/requests/1/reject",
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (_, request) = send(&app, Method::GET, "/api/v1/requests/1", None).await;
    assert_eq!(request["status"], "pending");
}

#[tokio::test]
async fn test_create_account_rejects_blank_names() {
    let app = seeded_app();
    let account = json!({
        "first_name": "   ",
        "last_name": "Brown",
        "username": "  ab  ",
        "email": "alice@example.com",
        "date_of_birth": "1995-09-09",
        "place_of_birth": "Paris",
        "residence": "Addis Ababa",
        "nationality": "France"
    });

    let (status, body) = send(&app, Method::POST, "/api/v1/accounts", Some(account)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_reject_with_blank_reason_leaves_request_pending() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/requests/1/reject",
        Some(json!({ "reason": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "REJECTION_REASON_REQUIRED");

    let (_, request) = send(&app, Method::GET, "/api/v1/requests/1", None).await;
    assert_eq!(request["status"], "pending");
}

#[tokio::test]
async fn test_reject_deposit() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/requests/1/reject",
        Some(json!({ "reason": "  Receipt unreadable " })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["rejection_reason"], "Receipt unreadable");
    assert!(body["transaction_id"].is_null());
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = seeded_app();

    let (status, body) = send(&app, Method::GET, "/api/v1/requests/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/requests/99/approve",
        Some(json!({ "transaction_id": "TXN-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/accounts/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submit_and_delete_deposit() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/requests",
        Some(json!({
            "user_id": 2,
            "username": "janesmith",
            "amount": "250.50",
            "requested_on": "2023-07-08",
            "receipt": "/receipts/jane-2.jpg"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 4);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["amount"], "250.50");
    assert_eq!(body["currency"], "ETB");

    let (status, _) = send(&app, Method::DELETE, "/api/v1/requests/4", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/api/v1/requests/4", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submit_deposit_rejects_non_positive_amount() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/requests",
        Some(json!({
            "user_id": 2,
            "username": "janesmith",
            "amount": "0",
            "receipt": "/receipts/jane-2.jpg"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_AMOUNT");
}

#[tokio::test]
async fn test_approve_account_activates_it() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/accounts/2/approve",
        Some(json!({ "notes": "ID verified" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["approval_notes"], "ID verified");

    let (_, body) = send(&app, Method::GET, "/api/v1/accounts?status=active", None).await;
    assert_eq!(body["accounts"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_rejected_account_cannot_be_approved() {
    let app = seeded_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/accounts/2/reject",
        Some(json!({ "reason": "Document expired" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "rejected");

    let (status, body) = send(&app, Method::POST, "/api/v1/accounts/2/approve", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "INVALID_STATE");

    let (_, account) = send(&app, Method::GET, "/api/v1/accounts/2", None).await;
    assert_eq!(account["status"], "rejected");
    assert_eq!(account["rejection_reason"], "Document expired");
}

#[tokio::test]
async fn test_adjust_balance() {
    let app = seeded_app();
    let uri = "/api/v1/accounts/1/balance";

    let (status, body) = send(&app, Method::PATCH, uri, Some(json!({ "delta": "200" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["balance"], "1200");

    let (status, body) = send(&app, Method::PATCH, uri, Some(json!({ "delta": "-2000" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "NEGATIVE_BALANCE");

    let (_, account) = send(&app, Method::GET, "/api/v1/accounts/1", None).await;
    assert_eq!(account["balance"], "1200");
}

#[tokio::test]
async fn test_set_and_clear_limits() {
    let app = seeded_app();
    let uri = "/api/v1/accounts/1/limits";

    let (status, body) = send(
        &app,
        Method::PATCH,
        uri,
        Some(json!({ "which": "send", "type": "custom", "value": "750", "days": 10 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["send_limit"]["type"], "custom");
    assert_eq!(body["send_limit"]["value"], "750");
    assert_eq!(body["send_limit"]["days"], 10);
    assert_eq!(body["withdraw_limit"]["value"], "10000");

    let (status, body) = send(
        &app,
        Method::PATCH,
        uri,
        Some(json!({ "which": "withdraw", "type": "none" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["withdraw_limit"].is_null());

    let (status, body) = send(
        &app,
        Method::PATCH,
        uri,
        Some(json!({ "which": "send", "type": "daily", "value": "-5" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_LIMIT");
}

#[tokio::test]
async fn test_create_account_rejects_duplicate_username() {
    let app = seeded_app();
    let account = json!({
        "first_name": "Johnny",
        "last_name": "Doe",
        "username": "JohnDoe",
        "email": "johnny@example.com",
        "date_of_birth": "1991-02-03",
        "place_of_birth": "Boston",
        "residence": "Boston",
        "nationality": "USA"
    });

    let (status, body) = send(&app, Method::POST, "/api/v1/accounts", Some(account)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "DUPLICATE_USERNAME");
}

#[tokio::test]
async fn test_create_account_starts_pending() {
    let app = seeded_app();
    let account = json!({
        "first_name": "Alice",
        "last_name": "Brown",
        "username": "alicebrown",
        "email": "alice@example.com",
        "date_of_birth": "1995-09-09",
        "place_of_birth": "Paris",
        "residence": "Addis Ababa",
        "nationality": "France"
    });

    let (status, body) = send(&app, Method::POST, "/api/v1/accounts", Some(account)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 3);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["balance"], "0");
    assert_eq!(body["role"], "user");
    assert!(body["send_limit"].is_null());
}
