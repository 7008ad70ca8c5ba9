//! Dashboard Data Structures
//!
//! Each role gets its own aggregate view; the payload is tagged with the role.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::listing::PropertySummary;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Dashboard {
    Student(StudentDashboard),
    Landlord(LandlordDashboard),
    Admin(AdminDashboard),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentDashboard {
    pub favorites_count: i64,
    pub conversations_count: i64,
    pub reviews_count: i64,
    pub unread_notifications: i64,
    /// Most recently viewed distinct listings, newest first
    pub recently_viewed: Vec<PropertySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LandlordDashboard {
    pub properties_count: i64,
    pub total_views: i64,
    pub total_favorites: i64,
    pub conversations_count: i64,
    pub unread_notifications: i64,
    /// Mean rating over all reviews of all owned listings
    pub average_rating: Option<f64>,
    pub properties: Vec<PropertyStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyStats {
    pub property_id: Uuid,
    pub title: String,
    pub views: i64,
    pub favorites: i64,
    pub reviews: i64,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AdminDashboard {
    pub total_users: i64,
    pub students: i64,
    pub landlords: i64,
    pub total_properties: i64,
    pub pending_verifications: i64,
}
