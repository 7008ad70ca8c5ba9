//! Account management integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use studentnest::backend::realtime::{ConnectionHandle, Outbound};

use crate::common::{count_rows, TestApp, TEST_PASSWORD};
use crate::{assert_error_body, assert_status};

#[tokio::test]
async fn test_update_profile_and_public_view() {
    let app = TestApp::new().await;
    let student = app.student("sam").await;

    let response = app
        .server
        .put("/api/users/me")
        .authorization_bearer(&student.token)
        .json(&json!({ "full_name": "Sam Student", "university": "Leeds" }))
        .await;
    assert_status!(response, StatusCode::OK);

    let body: Value = app.server.get(&format!("/api/users/{}", student.id)).await.json();
    assert_eq!(body["full_name"], "Sam Student");
    assert_eq!(body["university"], "Leeds");
    assert!(body.get("email").is_none());
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new().await;
    let student = app.student("sam").await;

    let response = app
        .server
        .put("/api/users/me/password")
        .authorization_bearer(&student.token)
        .json(&json!({ "current_password": "not-my-password", "new_password": "newpassword456" }))
        .await;
    assert_error_body!(response, StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .put("/api/users/me/password")
        .authorization_bearer(&student.token)
        .json(&json!({ "current_password": TEST_PASSWORD, "new_password": "newpassword456" }))
        .await;
    assert_status!(response, StatusCode::NO_CONTENT);

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "username": "sam", "password": TEST_PASSWORD }))
        .await;
    assert_error_body!(response, StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .post("/api/auth/login")
        .json(&json!({ "username": "sam", "password": "newpassword456" }))
        .await;
    assert_status!(response, StatusCode::OK);
}

#[tokio::test]
async fn test_deleting_landlord_cascades() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let student = app.student("sam").await;
    let property_id = app.create_listing(&owner, "Room").await;

    app.server.get(&format!("/api/properties/{}", property_id)).await;
    app.server
        .post("/api/favorites")
        .authorization_bearer(&student.token)
        .json(&json!({ "property_id": property_id }))
        .await
        .assert_status(StatusCode::CREATED);
    app.server
        .post(&format!("/api/properties/{}/reviews", property_id))
        .authorization_bearer(&student.token)
        .json(&json!({ "rating": 4 }))
        .await
        .assert_status(StatusCode::CREATED);
    let conversation_id = app.open_conversation(&student, property_id).await;
    app.server
        .post(&format!("/api/conversations/{}/messages", conversation_id))
        .authorization_bearer(&student.token)
        .json(&json!({ "content": "Hello" }))
        .await
        .assert_status(StatusCode::CREATED);

    let pool = &app.state.db_pool;
    for table in ["properties", "favorites", "reviews", "conversations", "messages", "property_views"] {
        assert_eq!(count_rows(pool, table).await, 1, "table {}", table);
    }

    let (handle, mut rx) = ConnectionHandle::channel();
    app.state.registry.register(owner.id, handle).await;

    let response = app.server.delete("/api/users/me").authorization_bearer(&owner.token).await;
    assert_status!(response, StatusCode::NO_CONTENT);

    for table in ["properties", "favorites", "reviews", "conversations", "messages", "property_views"] {
        assert_eq!(count_rows(pool, table).await, 0, "table {}", table);
    }
    assert_eq!(count_rows(pool, "users").await, 1);
    assert!(app.state.registry.get(owner.id).await.is_none());
    assert_eq!(rx.recv().await, Some(Outbound::Close));

    // The token of a deleted account no longer authenticates
    let response = app.server.get("/api/auth/me").authorization_bearer(&owner.token).await;
    assert_error_body!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deleting_student_keeps_listing() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let student = app.student("sam").await;
    let property_id = app.create_listing(&owner, "Room").await;

    app.server
        .get(&format!("/api/properties/{}", property_id))
        .authorization_bearer(&student.token)
        .await
        .assert_status_ok();
    app.server.delete("/api/users/me").authorization_bearer(&student.token).await;

    let pool = &app.state.db_pool;
    assert_eq!(count_rows(pool, "properties").await, 1);
    // Views survive their viewer
    assert_eq!(count_rows(pool, "property_views").await, 1);
}
