//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Database test fixtures
//! - A test server wrapping the full router
//! - Authentication test helpers
//! - Custom assertion macros

pub mod assertions;
pub mod server;

// Re-export commonly used utilities
pub use auth_helpers::*;
pub use database::*;
pub use server::*;
