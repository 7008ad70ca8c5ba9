//! Favorites Module
//!
//! One favorite per (user, property); a duplicate is rejected with 409.

pub mod db;
pub mod handlers;
