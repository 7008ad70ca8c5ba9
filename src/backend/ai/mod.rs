//! AI Module
//!
//! Hosted text generation used by three features:
//!
//! - Listing description drafts for landlords
//! - Review summaries on the listing page
//! - Answers to student questions inside a conversation, posted as the
//!   landlord's message with `is_ai_generated` set
//!
//! AI endpoints answer 503 when no API key is configured. Upstream failures
//! surface as a generic 500.

pub mod client;
pub mod error;
pub mod handlers;
pub mod prompts;

pub use client::AiClient;
pub use error::AiError;
