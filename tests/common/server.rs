//! Test server wrapping the full application router

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use serde_json::{json, Value};
use studentnest::backend::server::config::{ServerConfig, ServerConfigBuilder};
use studentnest::backend::{create_app, AppState};
use studentnest::shared::Role;
use uuid::Uuid;

use super::auth_helpers::{create_test_user, verify_user, TestUser, TEST_SECRET};
use super::database::create_test_pool;

/// Base test configuration: cheap bcrypt, short auto-reply delay, no AI
pub fn test_config() -> ServerConfigBuilder {
    ServerConfig::builder(TEST_SECRET)
        .bcrypt_cost(4)
        .auto_reply_delay(Duration::from_millis(20))
}

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: ServerConfigBuilder) -> Self {
        let state = AppState::new(create_test_pool().await, Arc::new(config.build()));
        let server = TestServer::new(create_app(state.clone())).expect("Failed to start test server");
        Self { server, state }
    }

    pub async fn student(&self, username: &str) -> TestUser {
        create_test_user(&self.state.db_pool, username, Role::Student).await
    }

    /// A landlord whose verification was approved
    pub async fn landlord(&self, username: &str) -> TestUser {
        let landlord = create_test_user(&self.state.db_pool, username, Role::Landlord).await;
        verify_user(&self.state.db_pool, landlord.id).await;
        landlord
    }

    pub async fn admin(&self, username: &str) -> TestUser {
        create_test_user(&self.state.db_pool, username, Role::Admin).await
    }

    /// Create a listing through the API and return its ID
    pub async fn create_listing(&self, landlord: &TestUser, title: &str) -> Uuid {
        let response = self
            .server
            .post("/api/properties")
            .authorization_bearer(&landlord.token)
            .json(&listing_body(title))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        let body: Value = response.json();
        body["id"].as_str().and_then(|id| id.parse().ok()).expect("listing id")
    }

    /// Open a conversation about `property_id` and return its ID
    pub async fn open_conversation(&self, student: &TestUser, property_id: Uuid) -> Uuid {
        let response = self
            .server
            .post("/api/conversations")
            .authorization_bearer(&student.token)
            .json(&json!({ "property_id": property_id }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        body["id"].as_str().and_then(|id| id.parse().ok()).expect("conversation id")
    }
}

pub fn listing_body(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Bright room five minutes from campus",
        "price": 650,
        "address": "12 College Road",
        "city": "Leeds",
        "property_type": "room",
        "bedrooms": 1,
        "bathrooms": 1,
        "furnished": true,
        "images": ["https://img.example.com/room.jpg"],
        "amenities": ["wifi", "laundry"]
    })
}
