//! Favorite Data Structure
//!
//! A favorite is a unique (user, property) pairing. Existence is binary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::listing::PropertySummary;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Favorite {
    pub id: Uuid,
    pub user_id: Uuid,
    pub property_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A favorite together with the listing it points at
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FavoriteEntry {
    pub id: Uuid,
    pub property: PropertySummary,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFavoriteRequest {
    pub property_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFavoritesResponse {
    pub favorites: Vec<FavoriteEntry>,
}
