//! Conversation and message API integration tests

use assert_matches::assert_matches;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use studentnest::backend::realtime::{ConnectionHandle, Outbound};
use studentnest::shared::ServerFrame;

use crate::common::TestApp;
use crate::{assert_error_body, assert_status};

#[tokio::test]
async fn test_start_conversation_is_idempotent() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let student = app.student("sam").await;
    let property_id = app.create_listing(&owner, "Room").await;

    let first = app.open_conversation(&student, property_id).await;
    let second = app.open_conversation(&student, property_id).await;
    assert_eq!(first, second);

    let body: Value = app.server.get("/api/conversations").authorization_bearer(&owner.token).await.json();
    let conversations = body["conversations"].as_array().unwrap();
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0]["other_username"], "sam");
    assert_eq!(conversations[0]["property_title"], "Room");
    assert_eq!(conversations[0]["last_message_preview"], Value::Null);
}

#[tokio::test]
async fn test_start_conversation_rules() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let other_landlord = app.landlord("other").await;
    let property_id = app.create_listing(&owner, "Room").await;

    let response = app
        .server
        .post("/api/conversations")
        .authorization_bearer(&owner.token)
        .json(&json!({ "property_id": property_id }))
        .await;
    assert_error_body!(response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/api/conversations")
        .authorization_bearer(&other_landlord.token)
        .json(&json!({ "property_id": property_id }))
        .await;
    assert_error_body!(response, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_messages_visible_to_both_participants_only() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let student = app.student("sam").await;
    let outsider = app.student("eve").await;
    let property_id = app.create_listing(&owner, "Room").await;
    let conversation_id = app.open_conversation(&student, property_id).await;
    let path = format!("/api/conversations/{}/messages", conversation_id);

    let response = app
        .server
        .post(&path)
        .authorization_bearer(&student.token)
        .json(&json!({ "content": "Is the room still free?" }))
        .await;
    assert_status!(response, StatusCode::CREATED);
    let sent: Value = response.json();
    assert_eq!(sent["is_ai_generated"], false);

    app.server
        .post(&path)
        .authorization_bearer(&owner.token)
        .json(&json!({ "content": "Yes it is" }))
        .await
        .assert_status(StatusCode::CREATED);

    for user in [&student, &owner] {
        let body: Value = app.server.get(&path).authorization_bearer(&user.token).await.json();
        let contents: Vec<&str> = body["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["content"].as_str().unwrap())
            .collect();
        assert_eq!(contents, vec!["Is the room still free?", "Yes it is"]);
    }

    let response = app.server.get(&path).authorization_bearer(&outsider.token).await;
    assert_error_body!(response, StatusCode::FORBIDDEN);

    let response = app
        .server
        .post(&path)
        .authorization_bearer(&outsider.token)
        .json(&json!({ "content": "hello" }))
        .await;
    assert_error_body!(response, StatusCode::FORBIDDEN);

    let body: Value = app.server.get("/api/conversations").authorization_bearer(&student.token).await.json();
    assert_eq!(body["conversations"][0]["last_message_preview"], "Yes it is");
}

#[tokio::test]
async fn test_empty_message_rejected() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let student = app.student("sam").await;
    let property_id = app.create_listing(&owner, "Room").await;
    let conversation_id = app.open_conversation(&student, property_id).await;

    let response = app
        .server
        .post(&format!("/api/conversations/{}/messages", conversation_id))
        .authorization_bearer(&student.token)
        .json(&json!({ "content": "   " }))
        .await;
    assert_error_body!(response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rest_message_is_pushed_to_connected_landlord() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let student = app.student("sam").await;
    let property_id = app.create_listing(&owner, "Room").await;
    let conversation_id = app.open_conversation(&student, property_id).await;

    let (handle, mut rx) = ConnectionHandle::channel();
    app.state.registry.register(owner.id, handle).await;

    app.server
        .post(&format!("/api/conversations/{}/messages", conversation_id))
        .authorization_bearer(&student.token)
        .json(&json!({ "content": "Hello" }))
        .await
        .assert_status(StatusCode::CREATED);

    assert_matches!(
        rx.recv().await,
        Some(Outbound::Frame(ServerFrame::NewMessage { payload })) if payload.content == "Hello"
    );
    assert_matches!(
        rx.recv().await,
        Some(Outbound::Frame(ServerFrame::NewNotification { payload })) if payload.link == Some(format!("/messages/{}", conversation_id))
    );
}

#[tokio::test]
async fn test_trigger_keyword_gets_scripted_reply() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let student = app.student("sam").await;
    let property_id = app.create_listing(&owner, "Room").await;
    let conversation_id = app.open_conversation(&student, property_id).await;
    let path = format!("/api/conversations/{}/messages", conversation_id);

    app.server
        .post(&path)
        .authorization_bearer(&student.token)
        .json(&json!({ "content": "Can I book a VIEWING next week?" }))
        .await
        .assert_status(StatusCode::CREATED);

    let mut messages = Vec::new();
    for _ in 0..50 {
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        let body: Value = app.server.get(&path).authorization_bearer(&student.token).await.json();
        messages = body["messages"].as_array().cloned().unwrap_or_default();
        if messages.len() == 2 {
            break;
        }
    }

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1]["sender_id"], owner.id.to_string());
    assert_eq!(messages[1]["is_ai_generated"], false);
}
