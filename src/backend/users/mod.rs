//! Users Module
//!
//! Account management on top of the `users` table owned by `auth`.

pub mod handlers;
