//! Reviews Module
//!
//! One review per (property, user); a duplicate is rejected with 409. A
//! landlord cannot review their own listing.

pub mod db;
pub mod handlers;
