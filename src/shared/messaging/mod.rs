//! Messaging Module
//!
//! Data structures for student-landlord messaging:
//!
//! - `Conversation` - A thread tying one student, one landlord and one property
//! - `ChatMessage` - An immutable message inside a conversation
//!
//! # Usage
//!
//! ```rust
//! use studentnest::shared::messaging::{ChatMessage, Conversation};
//! ```

pub mod conversation;
pub mod message;

pub use conversation::{
    Conversation, ConversationSummary, ListConversationsResponse, StartConversationRequest,
};
pub use message::{
    AiReplyRequest, ChatMessage, ListMessagesResponse, SendMessageRequest, MAX_MESSAGE_LEN,
};
