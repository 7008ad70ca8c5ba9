//! Favorites API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::TestApp;
use crate::{assert_error_body, assert_status};

#[tokio::test]
async fn test_add_list_and_remove_favorite() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let student = app.student("sam").await;
    let property_id = app.create_listing(&owner, "Room").await;

    let response = app
        .server
        .post("/api/favorites")
        .authorization_bearer(&student.token)
        .json(&json!({ "property_id": property_id }))
        .await;
    assert_status!(response, StatusCode::CREATED);

    let body: Value = app.server.get("/api/favorites").authorization_bearer(&student.token).await.json();
    let favorites = body["favorites"].as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["property"]["id"], property_id.to_string());
    assert_eq!(favorites[0]["property"]["cover_image"], "https://img.example.com/room.jpg");

    let response = app
        .server
        .delete(&format!("/api/favorites/{}", property_id))
        .authorization_bearer(&student.token)
        .await;
    assert_status!(response, StatusCode::NO_CONTENT);

    let body: Value = app.server.get("/api/favorites").authorization_bearer(&student.token).await.json();
    assert!(body["favorites"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_favorite_conflicts() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let student = app.student("sam").await;
    let property_id = app.create_listing(&owner, "Room").await;
    let body = json!({ "property_id": property_id });

    app.server
        .post("/api/favorites")
        .authorization_bearer(&student.token)
        .json(&body)
        .await
        .assert_status(StatusCode::CREATED);
    let response = app.server.post("/api/favorites").authorization_bearer(&student.token).json(&body).await;
    assert_error_body!(response, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_favorite_missing_property_or_absent_favorite() {
    let app = TestApp::new().await;
    let student = app.student("sam").await;

    let response = app
        .server
        .post("/api/favorites")
        .authorization_bearer(&student.token)
        .json(&json!({ "property_id": Uuid::new_v4() }))
        .await;
    assert_error_body!(response, StatusCode::NOT_FOUND);

    let response = app
        .server
        .delete(&format!("/api/favorites/{}", Uuid::new_v4()))
        .authorization_bearer(&student.token)
        .await;
    assert_error_body!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_favorite_notifies_landlord() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let student = app.student("sam").await;
    let property_id = app.create_listing(&owner, "Room").await;

    app.server
        .post("/api/favorites")
        .authorization_bearer(&student.token)
        .json(&json!({ "property_id": property_id }))
        .await
        .assert_status(StatusCode::CREATED);

    let body: Value = app
        .server
        .get("/api/notifications/unread-count")
        .authorization_bearer(&owner.token)
        .await
        .json();
    assert_eq!(body["count"], 1);

    let body: Value = app.server.get("/api/notifications").authorization_bearer(&owner.token).await.json();
    assert_eq!(body["notifications"][0]["kind"], "favorite");
    assert_eq!(body["notifications"][0]["link"], format!("/properties/{}", property_id));

    let body: Value = app
        .server
        .post("/api/notifications/read-all")
        .authorization_bearer(&owner.token)
        .await
        .json();
    assert_eq!(body["updated"], 1);

    let body: Value = app
        .server
        .get("/api/notifications/unread-count")
        .authorization_bearer(&owner.token)
        .await
        .json();
    assert_eq!(body["count"], 0);
}
