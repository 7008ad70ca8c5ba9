//! Review API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::TestApp;
use crate::{assert_error_body, assert_status};

#[tokio::test]
async fn test_create_and_list_reviews() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let alice = app.student("alice").await;
    let bob = app.student("bob").await;
    let property_id = app.create_listing(&owner, "Room").await;
    let path = format!("/api/properties/{}/reviews", property_id);

    let response = app
        .server
        .post(&path)
        .authorization_bearer(&alice.token)
        .json(&json!({ "rating": 5, "comment": "  Lovely place  " }))
        .await;
    assert_status!(response, StatusCode::CREATED);
    let review: Value = response.json();
    assert_eq!(review["username"], "alice");
    assert_eq!(review["comment"], "Lovely place");

    app.server
        .post(&path)
        .authorization_bearer(&bob.token)
        .json(&json!({ "rating": 2 }))
        .await
        .assert_status(StatusCode::CREATED);

    let body: Value = app.server.get(&path).await.json();
    assert_eq!(body["reviews"].as_array().unwrap().len(), 2);
    assert_eq!(body["reviews"][0]["username"], "bob");
    assert_eq!(body["rating"]["count"], 2);
    assert_eq!(body["rating"]["average"], 3.5);
}

#[tokio::test]
async fn test_review_rules() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let alice = app.student("alice").await;
    let property_id = app.create_listing(&owner, "Room").await;
    let path = format!("/api/properties/{}/reviews", property_id);

    let response = app
        .server
        .post(&path)
        .authorization_bearer(&owner.token)
        .json(&json!({ "rating": 5 }))
        .await;
    assert_error_body!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .post(&path)
        .authorization_bearer(&alice.token)
        .json(&json!({ "rating": 6 }))
        .await;
    assert_error_body!(response, StatusCode::BAD_REQUEST);

    app.server
        .post(&path)
        .authorization_bearer(&alice.token)
        .json(&json!({ "rating": 4 }))
        .await
        .assert_status(StatusCode::CREATED);
    let response = app
        .server
        .post(&path)
        .authorization_bearer(&alice.token)
        .json(&json!({ "rating": 3 }))
        .await;
    assert_error_body!(response, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_only_author_deletes_review() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let alice = app.student("alice").await;
    let bob = app.student("bob").await;
    let property_id = app.create_listing(&owner, "Room").await;

    let review: Value = app
        .server
        .post(&format!("/api/properties/{}/reviews", property_id))
        .authorization_bearer(&alice.token)
        .json(&json!({ "rating": 4, "comment": "Good" }))
        .await
        .json();
    let path = format!("/api/reviews/{}", review["id"].as_str().unwrap());

    let response = app.server.delete(&path).authorization_bearer(&bob.token).await;
    assert_error_body!(response, StatusCode::FORBIDDEN);

    let response = app.server.delete(&path).authorization_bearer(&alice.token).await;
    assert_status!(response, StatusCode::NO_CONTENT);

    let response = app.server.delete(&path).authorization_bearer(&alice.token).await;
    assert_error_body!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_summary_without_reviews_needs_no_ai() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let property_id = app.create_listing(&owner, "Room").await;

    let response = app
        .server
        .get(&format!("/api/properties/{}/reviews/summary", property_id))
        .await;
    assert_status!(response, StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["summary"], Value::Null);
    assert_eq!(body["review_count"], 0);
}

#[tokio::test]
async fn test_review_notifies_landlord() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let alice = app.student("alice").await;
    let property_id = app.create_listing(&owner, "Room").await;

    app.server
        .post(&format!("/api/properties/{}/reviews", property_id))
        .authorization_bearer(&alice.token)
        .json(&json!({ "rating": 4 }))
        .await
        .assert_status(StatusCode::CREATED);

    let body: Value = app.server.get("/api/notifications").authorization_bearer(&owner.token).await.json();
    assert_eq!(body["notifications"][0]["kind"], "review");
}
