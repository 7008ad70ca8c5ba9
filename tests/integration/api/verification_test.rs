//! Landlord verification workflow integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use studentnest::shared::Role;
use uuid::Uuid;

use crate::common::{create_test_user, TestApp, TestUser};
use crate::{assert_error_body, assert_status};

async fn submit(app: &TestApp, user: &TestUser) -> Value {
    let response = app
        .server
        .post("/api/verification")
        .authorization_bearer(&user.token)
        .json(&json!({ "document_url": "https://docs.example.com/id.pdf", "note": "Passport" }))
        .await;
    assert_status!(response, StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn test_submit_and_approve() {
    let app = TestApp::new().await;
    let admin = app.admin("root").await;
    let landlord = create_test_user(&app.state.db_pool, "newlandlord", Role::Landlord).await;

    let application = submit(&app, &landlord).await;
    assert_eq!(application["status"], "pending");

    let me: Value = app.server.get("/api/auth/me").authorization_bearer(&landlord.token).await.json();
    assert_eq!(me["verification_status"], "pending");

    let response = app
        .server
        .post("/api/verification")
        .authorization_bearer(&landlord.token)
        .json(&json!({ "document_url": "https://docs.example.com/other.pdf" }))
        .await;
    assert_error_body!(response, StatusCode::CONFLICT);

    let pending: Value = app
        .server
        .get("/api/admin/verifications")
        .add_query_param("status", "pending")
        .authorization_bearer(&admin.token)
        .await
        .json();
    assert_eq!(pending["applications"].as_array().unwrap().len(), 1);

    let path = format!("/api/admin/verifications/{}/approve", application["id"].as_str().unwrap());
    let response = app.server.post(&path).authorization_bearer(&admin.token).await;
    assert_status!(response, StatusCode::OK);
    let decided: Value = response.json();
    assert_eq!(decided["status"], "approved");
    assert_eq!(decided["reviewer_id"], admin.id.to_string());

    let response = app.server.post(&path).authorization_bearer(&admin.token).await;
    assert_error_body!(response, StatusCode::CONFLICT);

    let notifications: Value = app
        .server
        .get("/api/notifications")
        .authorization_bearer(&landlord.token)
        .await
        .json();
    assert_eq!(notifications["notifications"][0]["kind"], "verification");
    assert_eq!(notifications["notifications"][0]["link"], "/verification");

    // An approved landlord may now list
    app.create_listing(&landlord, "Verified room").await;

    let response = app
        .server
        .post("/api/verification")
        .authorization_bearer(&landlord.token)
        .json(&json!({ "document_url": "https://docs.example.com/again.pdf" }))
        .await;
    assert_error_body!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reject_with_reason_allows_resubmission() {
    let app = TestApp::new().await;
    let admin = app.admin("root").await;
    let student = app.student("sam").await;

    let application = submit(&app, &student).await;
    let response = app
        .server
        .post(&format!("/api/admin/verifications/{}/reject", application["id"].as_str().unwrap()))
        .authorization_bearer(&admin.token)
        .json(&json!({ "reason": "Document is blurry" }))
        .await;
    assert_status!(response, StatusCode::OK);
    let decided: Value = response.json();
    assert_eq!(decided["status"], "rejected");
    assert_eq!(decided["rejection_reason"], "Document is blurry");

    let mine: Value = app.server.get("/api/verification").authorization_bearer(&student.token).await.json();
    assert_eq!(mine["status"], "rejected");

    let me: Value = app.server.get("/api/auth/me").authorization_bearer(&student.token).await.json();
    assert_eq!(me["verification_status"], "rejected");

    submit(&app, &student).await;
}

#[tokio::test]
async fn test_admin_endpoints_require_admin() {
    let app = TestApp::new().await;
    let landlord = app.landlord("owner").await;

    let response = app.server.get("/api/admin/verifications").authorization_bearer(&landlord.token).await;
    assert_error_body!(response, StatusCode::FORBIDDEN);

    let response = app.server.get("/api/admin/users").authorization_bearer(&landlord.token).await;
    assert_error_body!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .post(&format!("/api/admin/verifications/{}/approve", Uuid::new_v4()))
        .authorization_bearer(&landlord.token)
        .await;
    assert_error_body!(response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_cannot_apply_and_unknown_application() {
    let app = TestApp::new().await;
    let admin = app.admin("root").await;

    let response = app
        .server
        .post("/api/verification")
        .authorization_bearer(&admin.token)
        .json(&json!({ "document_url": "https://docs.example.com/id.pdf" }))
        .await;
    assert_error_body!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .post(&format!("/api/admin/verifications/{}/approve", Uuid::new_v4()))
        .authorization_bearer(&admin.token)
        .await;
    assert_error_body!(response, StatusCode::NOT_FOUND);

    let mine: Value = app.server.get("/api/verification").authorization_bearer(&admin.token).await.json();
    assert_eq!(mine, Value::Null);

    let users: Value = app.server.get("/api/admin/users").authorization_bearer(&admin.token).await.json();
    assert_eq!(users.as_array().unwrap().len(), 1);
}
