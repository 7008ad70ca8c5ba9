//! Relay session tests driven through JSON text frames

use assert_matches::assert_matches;
use serde_json::json;
use studentnest::backend::auth::sessions::create_token;
use studentnest::backend::realtime::{ConnectionHandle, Outbound, RelaySession, RelayState};
use studentnest::shared::{Role, ServerFrame};
use uuid::Uuid;

use crate::common::{count_rows, TestApp, TEST_SECRET};

#[tokio::test]
async fn test_authenticated_socket_relays_to_both_parties() {
    let app = TestApp::new().await;
    let owner = app.landlord("owner").await;
    let student = app.student("sam").await;
    let property_id = app.create_listing(&owner, "Room").await;
    let conversation_id = app.open_conversation(&student, property_id).await;

    let (owner_handle, mut owner_rx) = ConnectionHandle::channel();
    app.state.registry.register(owner.id, owner_handle).await;

    let (handle, mut student_rx) = ConnectionHandle::channel();
    let mut session = RelaySession::new(app.state.clone(), handle);
    session
        .handle_text(&json!({ "type": "auth", "token": student.token }).to_string())
        .await;
    assert_eq!(session.phase(), RelayState::Authenticated { user_id: student.id });

    session
        .handle_text(
            &json!({
                "type": "message",
                "payload": { "conversation_id": conversation_id, "content": "Hi from the socket" }
            })
            .to_string(),
        )
        .await;

    assert_matches!(
        student_rx.recv().await,
        Some(Outbound::Frame(ServerFrame::NewMessage { payload })) if payload.sender_id == student.id
    );
    assert_matches!(
        owner_rx.recv().await,
        Some(Outbound::Frame(ServerFrame::NewMessage { payload })) if payload.content == "Hi from the socket"
    );
    assert_eq!(count_rows(&app.state.db_pool, "messages").await, 1);

    session.disconnect().await;
    assert!(app.state.registry.get(student.id).await.is_none());
}

#[tokio::test]
async fn test_bad_frames_are_ignored() {
    let app = TestApp::new().await;
    let (handle, _rx) = ConnectionHandle::channel();
    let mut session = RelaySession::new(app.state.clone(), handle);

    session.handle_text("not json").await;
    session.handle_text(&json!({ "type": "shout" }).to_string()).await;
    session
        .handle_text(&json!({ "type": "auth", "token": "forged" }).to_string())
        .await;
    assert_eq!(session.phase(), RelayState::Unauthenticated);

    // A token signed with another secret is rejected too
    let foreign = create_token("other-secret", 7, Uuid::new_v4(), "x@example.com", Role::Student).unwrap();
    session
        .handle_text(&json!({ "type": "auth", "token": foreign }).to_string())
        .await;
    assert_eq!(session.phase(), RelayState::Unauthenticated);
    assert_eq!(session.user_id(), None);

    // A well-signed token for an account that does not exist
    let orphan = create_token(TEST_SECRET, 7, Uuid::new_v4(), "y@example.com", Role::Student).unwrap();
    session.handle_text(&json!({ "type": "auth", "token": orphan }).to_string()).await;
    assert_eq!(session.user_id(), None);

    let student = app.student("sam").await;
    session
        .handle_text(&json!({ "type": "auth", "token": student.token }).to_string())
        .await;
    assert_eq!(session.user_id(), Some(student.id));
    assert!(app.state.registry.get(student.id).await.is_some());
}
