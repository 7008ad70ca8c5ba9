//! Property listing integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use studentnest::shared::Role;

use crate::common::{create_test_user, listing_body, TestApp};
use crate::{assert_error_body, assert_status};

#[tokio::test]
async fn test_unverified_landlord_cannot_list() {
    let app = TestApp::new().await;
    let landlord = create_test_user(&app.state.db_pool, "newlandlord", Role::Landlord).await;

    let response = app
        .server
        .post("/api/properties")
        .authorization_bearer(&landlord.token)
        .json(&listing_body("Room"))
        .await;
    assert_error_body!(response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_students_cannot_list() {
    let app = TestApp::new().await;
    let student = app.student("sam").await;

    let response = app
        .server
        .post("/api/properties")
        .authorization_bearer(&student.token)
        .json(&listing_body("Room"))
        .await;
    assert_error_body!(response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_only_owner_can_edit_or_delete() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let other = app.landlord("other").await;
    let property_id = app.create_listing(&owner, "Room").await;
    let path = format!("/api/properties/{}", property_id);

    let response = app
        .server
        .put(&path)
        .authorization_bearer(&other.token)
        .json(&json!({ "price": 1 }))
        .await;
    assert_error_body!(response, StatusCode::FORBIDDEN);

    let response = app.server.delete(&path).authorization_bearer(&other.token).await;
    assert_error_body!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .put(&path)
        .authorization_bearer(&owner.token)
        .json(&json!({ "price": 700, "title": "Renovated room" }))
        .await;
    assert_status!(response, StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["price"], 700);
    assert_eq!(body["title"], "Renovated room");
    assert_eq!(body["city"], "Leeds");

    let response = app.server.delete(&path).authorization_bearer(&owner.token).await;
    assert_status!(response, StatusCode::NO_CONTENT);
    let response = app.server.get(&path).await;
    assert_error_body!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_update_is_rejected() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let property_id = app.create_listing(&owner, "Room").await;

    let response = app
        .server
        .put(&format!("/api/properties/{}", property_id))
        .authorization_bearer(&owner.token)
        .json(&json!({ "price": 0 }))
        .await;
    assert_error_body!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_filters_and_paginates() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    for title in ["Room A", "Room B", "Room C"] {
        app.create_listing(&owner, title).await;
    }
    let mut studio = listing_body("Studio in York");
    studio["city"] = json!("York");
    studio["property_type"] = json!("studio");
    studio["price"] = json!(900);
    app.server
        .post("/api/properties")
        .authorization_bearer(&owner.token)
        .json(&studio)
        .await
        .assert_status(StatusCode::CREATED);

    let response = app.server.get("/api/properties").add_query_param("city", "York").await;
    let body: Value = response.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["properties"][0]["title"], "Studio in York");

    let response = app
        .server
        .get("/api/properties")
        .add_query_param("limit", 2)
        .add_query_param("page", 2)
        .add_query_param("sort", "price_asc")
        .await;
    let body: Value = response.json();
    assert_eq!(body["total"], 4);
    assert_eq!(body["page"], 2);
    assert_eq!(body["properties"].as_array().unwrap().len(), 2);
    assert_eq!(body["properties"][1]["price"], 900);
}

#[tokio::test]
async fn test_detail_personalises_for_viewer() {
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

    let path = format!("/api/properties/{}", property_id);
    let anonymous: Value = app.server.get(&path).await.json();
    assert_eq!(anonymous["property"]["title"], "Room");
    assert_eq!(anonymous["is_favorited"], false);
    assert_eq!(anonymous["rating"]["count"], 0);
    assert_eq!(anonymous["landlord"]["username"], "owner");
    assert_eq!(anonymous["landlord"]["verification_status"], "approved");

    let personal: Value = app.server.get(&path).authorization_bearer(&student.token).await.json();
    assert_eq!(personal["is_favorited"], true);

    // An invalid token is treated as anonymous
    let response = app.server.get(&path).authorization_bearer("garbage").await;
    assert_status!(response, StatusCode::OK);

    // The owner looking at their own listing does not count as a view
    app.server.get(&path).authorization_bearer(&owner.token).await;
    let dashboard: Value = app.server.get("/api/dashboard").authorization_bearer(&owner.token).await.json();
    assert_eq!(dashboard["role"], "landlord");
    assert_eq!(dashboard["total_views"], 3);
    assert_eq!(dashboard["total_favorites"], 1);
}

#[tokio::test]
async fn test_my_properties_lists_only_own() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let other = app.landlord("other").await;
    app.create_listing(&owner, "Mine").await;
    app.create_listing(&other, "Theirs").await;

    let response = app.server.get("/api/landlord/properties").authorization_bearer(&owner.token).await;
    assert_status!(response, StatusCode::OK);
    let body: Value = response.json();
    let titles: Vec<&str> = body.as_array().unwrap().iter().map(|p| p["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Mine"]);
}

#[tokio::test]
async fn test_huge_page_number_returns_empty_page() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    app.create_listing(&owner, "Room").await;

    let response = app
        .server
        .get("/api/properties")
        .add_query_param("page", u32::MAX)
        .add_query_param("limit", 50)
        .await;
    assert_status!(response, StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["page"], u32::MAX);
    assert!(body["properties"].as_array().unwrap().is_empty());
}
