//! Client and console tests against an in-process stub of the backend.

use axum::{
    Json,
    extract::Path,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use fleet_admin::client::Client;
use fleet_admin::router::{RouteTable, Router, View};
use fleet_admin::security::{MemorySessionStore, Session};
use fleet_admin::types::{FinanceFilters, RecordKind, SubmissionStatus};
use fleet_admin::{App, Error};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};

fn token_for(role: &str) -> String {
    let exp = chrono::Utc::now().timestamp() + 3600;
    encode(
        &Header::default(),
        &json!({ "id": 9, "userId": 9, "name": "Stub", "email": format!("{role}@example.com"), "role": role, "exp": exp }),
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .unwrap()
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|t| !t.is_empty())
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    let role = match body["email"].as_str() {
        Some("admin@example.com") => "admin",
        Some("driver@example.com") => "driver",
        _ => "",
    };
    if role.is_empty() || body["password"] != "dapa12345" {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Credenciales inválidas" })),
        );
    }
    (StatusCode::OK, Json(json!({ "data": token_for(role) })))
}

async fn vehicles(headers: HeaderMap) -> impl IntoResponse {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "missing token" })));
    }
    (
        StatusCode::OK,
        Json(json!({ "data": [{
            "id": 1, "brand": "Volvo", "model": "FH", "licensePlate": "ABC-123",
            "capacityKg": 18000, "available": true, "currentMileage": 1000,
            "nextMaintenanceMileage": 5000, "isActive": true
        }] })),
    )
}

async fn users() -> Json<Value> {
    // Bare array, no envelope.
    Json(json!([{
        "id": 1, "name": "Ana", "lastName": "Pérez", "email": "ana@example.com",
        "phone": "555", "role": "admin", "licenseExpirationDate": "2030-01-01", "isActive": true
    }]))
}

async fn orders() -> Json<Value> {
    Json(json!({ "data": [{
        "id": 4, "submissionId": 2, "origin": "A", "destination": "B",
        "totalAmount": 1500.5, "status": "pending", "type": "move", "date": "2025-01-01"
    }] }))
}

async fn delete_vehicle(Path(id): Path<i64>) -> StatusCode {
    if id == 1 {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn records(axum::extract::Query(q): axum::extract::Query<Value>) -> Json<Value> {
    // Echo the query so the test can see which filters were sent.
    Json(json!({ "data": [], "query": q }))
}

async fn summary(axum::extract::RawQuery(q): axum::extract::RawQuery) -> Json<Value> {
    Json(json!({ "query": q }))
}

async fn reset() -> impl IntoResponse {
    (StatusCode::BAD_REQUEST, Json(json!({ "message": "expired link" })))
}

async fn reject(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "received": body }))
}

async fn spawn_backend() -> String {
    let app = axum::Router::new()
        .route("/api/login", post(login))
        .route("/api/vehicles", get(vehicles))
        .route("/api/vehicles/{id}", axum::routing::delete(delete_vehicle))
        .route("/api/users", get(users))
        .route("/api/orders", get(orders))
        .route("/api/financial-records", get(records))
        .route("/api/financial-summary", get(summary))
        .route("/api/auth/reset", post(reset))
        .route("/api/form/submissions/{id}/status", axum::routing::patch(reject));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client(base_url: &str) -> Client {
    Client::new(base_url, Session::new(MemorySessionStore::new())).unwrap()
}

#[tokio::test]
async fn test_login_stores_token() {
    let base = spawn_backend().await;
    let client = client(&base);

    let token = client.auth().login("admin@example.com", "dapa12345").await.unwrap();
    assert_eq!(client.session().token().as_deref(), Some(token.as_str()));
    assert_eq!(client.session().role().as_deref(), Some("admin"));

    client.auth().logout().unwrap();
    assert_eq!(client.session().token(), None);
}

#[tokio::test]
async fn test_failed_login_reports_backend_message() {
    let base = spawn_backend().await;
    let client = client(&base);

    let err = client.auth().login("admin@example.com", "wrong").await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Credenciales inválidas");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(client.session().token(), None);
}

#[tokio::test]
async fn test_requests_carry_bearer_token() {
    let base = spawn_backend().await;
    let client = client(&base);

    let err = client.vehicles().list().await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 401, ref message } if message == "missing token"));

    client.auth().login("driver@example.com", "dapa12345").await.unwrap();
    let vehicles = client.vehicles().list().await.unwrap();
    assert_eq!(vehicles.len(), 1);
    assert_eq!(vehicles[0].license_plate, "ABC-123");
}

#[tokio::test]
async fn test_enveloped_and_bare_payloads() {
    let base = spawn_backend().await;
    let client = client(&base);

    let users = client.users().list().await.unwrap();
    assert_eq!(users[0].last_name, "Pérez");

    let orders = client.orders().list().await.unwrap();
    assert_eq!(orders[0].kind, "move");
    assert_eq!(orders[0].user_id, None);
}

#[tokio::test]
async fn test_empty_success_body_and_reason_phrase() {
    let base = spawn_backend().await;
    let client = client(&base);

    assert_eq!(client.vehicles().delete(1).await.unwrap(), Value::Null);

    let err = client.vehicles().delete(2).await.unwrap_err();
    assert!(matches!(err, Error::Api { status: 404, ref message } if message == "Not Found"));
}

#[tokio::test]
async fn test_finance_filters_skip_unset_fields() {
    let base = spawn_backend().await;
    let client = client(&base);

    let filters = FinanceFilters {
        start_date: Some("2025-01-01".into()),
        kind: Some(RecordKind::Income),
        ..Default::default()
    };
    let summary = client.finance().summary(&filters).await.unwrap();
    assert_eq!(summary["query"], "startDate=2025-01-01&type=income");

    let unfiltered = client.finance().summary(&FinanceFilters::default()).await.unwrap();
    assert_eq!(unfiltered["query"], Value::Null);

    assert!(client.finance().records(&filters).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reset_password_outcome() {
    let base = spawn_backend().await;
    let outcome = client(&base)
        .auth()
        .reset_password("reset-token", "n3w-pass")
        .await
        .unwrap();

    assert!(!outcome.ok);
    assert_eq!(outcome.status, 400);
    assert_eq!(outcome.data["message"], "expired link");
}

#[tokio::test]
async fn test_reject_submission_sends_cancelled() {
    let base = spawn_backend().await;
    let ack = client(&base).submissions().reject(5).await.unwrap();
    assert_eq!(ack["received"]["status"], "cancelled");

    assert_eq!(
        serde_json::to_value(SubmissionStatus::Cancelled).unwrap(),
        json!("cancelled")
    );
}

#[tokio::test]
async fn test_console_applies_guard_before_loading() {
    let base = spawn_backend().await;
    let session = Session::new(MemorySessionStore::new());
    let app = App::new(
        Router::new(RouteTable::standard(), session.clone()),
        Client::new(&base, session).unwrap(),
    );

    let page = app.open("/vehicles").await.unwrap();
    assert!(page.redirected);
    assert_eq!(page.path, "/login");

    app.client().auth().login("driver@example.com", "dapa12345").await.unwrap();

    let page = app.open("/vehicles").await.unwrap();
    assert!(page.redirected);
    assert_eq!(page.path, "/homepage");
    assert_eq!(page.data["user"]["role"], "driver");

    let page = app.open("/orders").await.unwrap();
    assert!(!page.redirected);
    assert_eq!(page.data[0]["id"], 4);

    let resolved = app.router().navigate("/orders");
    assert_eq!(resolved.route.view, View::Orders);
}

#[test]
fn test_whoami_reports_only_live_sessions() {
    let session = Session::new(MemorySessionStore::new());
    let app = App::new(
        Router::new(RouteTable::standard(), session.clone()),
        Client::new("http://127.0.0.1:9", session.clone()).unwrap(),
    );
    assert_eq!(app.whoami(), Value::Null);

    session.store_token(&token_for("helper")).unwrap();
    assert_eq!(app.whoami()["role"], "helper");

    let stale = encode(
        &Header::default(),
        &json!({ "name": "Stub", "role": "admin", "exp": chrono::Utc::now().timestamp() - 60 }),
        &EncodingKey::from_secret(b"backend-secret"),
    )
    .unwrap();
    session.store_token(&stale).unwrap();
    assert_eq!(app.whoami(), Value::Null);
    assert!(session.token().is_some());
}
