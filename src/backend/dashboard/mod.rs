//! Dashboard Module
//!
//! Role-specific aggregates: a student's activity, a landlord's listing
//! performance, platform totals for admins.

pub mod db;
pub mod handlers;
