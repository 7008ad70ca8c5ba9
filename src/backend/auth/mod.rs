//! Authentication Module
//!
//! This module handles user authentication, registration, and session management.
//!
//! # Architecture
//!
//! - **`users`** - User data model and database operations
//! - **`sessions`** - JWT token generation and validation
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: username, email, password, role → user created → JWT returned
//! 2. **Login**: username or email plus password → credentials verified → JWT returned
//! 3. **Get Me**: JWT verified by middleware → profile returned
//!
//! The same JWT authenticates the WebSocket relay through its `auth` frame.
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens expire after `TOKEN_TTL_DAYS` (30 by default)
//! - Invalid credentials return 401 (no information leakage)

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest};
pub use handlers::{get_me, login, signup};
pub use sessions::{create_token, verify_token, Claims};
pub use users::User;
