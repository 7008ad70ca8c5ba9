//! Verification Module
//!
//! Identity verification applications and their admin review.

pub mod db;
pub mod handlers;
