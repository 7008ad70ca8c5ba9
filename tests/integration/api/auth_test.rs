//! Authentication API integration tests
//!
//! Tests for signup, login and the current-user endpoint.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::TestApp;
use crate::{assert_error_body, assert_status};

fn signup_body(username: &str, role: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "password": "password123",
        "role": role
    })
}

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::new().await;

    let response = app.server.post("/api/auth/signup").json(&signup_body("alice", "student")).await;

    assert_status!(response, StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["role"], "student");
    assert_eq!(body["user"]["verification_status"], "none");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_username_and_email() {
    let app = TestApp::new().await;
    app.server.post("/api/auth/signup").json(&signup_body("alice", "student")).await;

    let response = app.server.post("/api/auth/signup").json(&signup_body("alice", "landlord")).await;
    assert_error_body!(response, StatusCode::CONFLICT);

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice2",
            "email": "ALICE@example.com",
            "password": "password123",
            "role": "student"
        }))
        .await;
    assert_error_body!(response, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_rejects_admin_role_and_bad_input() {
    let app = TestApp::new().await;

    let response = app.server.post("/api/auth/signup").json(&signup_body("mallory", "admin")).await;
    assert_error_body!(response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "bob",
            "email": "bob@example.com",
            "password": "short",
            "role": "student"
        }))
        .await;
    assert_error_body!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_username_or_email() {
    let app = TestApp::new().await;
    app.server.post("/api/auth/signup").json(&signup_body("alice", "student")).await;

    for identifier in ["alice", "alice@example.com"] {
        let response = app
            .server
            .post("/api/auth/login")
            .json(&json!({ "username": identifier, "password": "password123" }))
            .await;
        assert_status!(response, StatusCode::OK);
        let body: Value = response.json();
        assert!(body["token"].is_string());
    }
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.server.post("/api/auth/signup").json(&signup_body("alice", "student")).await;

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "wrong-password" }))
        .await;
    assert_error_body!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/auth/me").await;
    assert_error_body!(response, StatusCode::UNAUTHORIZED);

    let response = app.server.get("/api/auth/me").authorization_bearer("not-a-jwt").await;
    assert_error_body!(response, StatusCode::UNAUTHORIZED);

    let student = app.student("carol").await;
    let response = app.server.get("/api/auth/me").authorization_bearer(&student.token).await;
    assert_status!(response, StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["id"], student.id.to_string());
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;
    let response = app.server.get("/health").await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.text(), "ok");
}
