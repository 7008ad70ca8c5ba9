//! Account Entry Points
//!
//! - **`signup`** - POST /api/auth/signup - register a student or landlord
//! - **`login`** - POST /api/auth/login - username or email plus password
//! - **`get_me`** - GET /api/auth/me - profile of the token's owner
//!
//! Request/response bodies live in `types`.

pub mod types;

mod login;
mod me;
mod signup;

pub use types::{AuthResponse, LoginRequest, SignupRequest};

pub use login::login;
pub use me::get_me;
pub use signup::signup;
