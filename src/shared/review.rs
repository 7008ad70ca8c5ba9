//! Review Data Structure
//!
//! A review is a unique (property, user) pairing carrying a 1-5 rating and a
//! bounded-length comment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::SharedError;
use super::listing::RatingSummary;

/// Longest accepted comment, in characters
pub const MAX_COMMENT_LEN: usize = 1000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub property_id: Uuid,
    pub user_id: Uuid,
    /// Author's username, joined in when listing
    pub username: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

impl CreateReviewRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        if !(1..=5).contains(&self.rating) {
            return Err(SharedError::validation("rating", "Rating must be between 1 and 5"));
        }
        if self.comment.chars().count() > MAX_COMMENT_LEN {
            return Err(SharedError::validation(
                "comment",
                format!("Comment must be at most {} characters", MAX_COMMENT_LEN),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListReviewsResponse {
    pub reviews: Vec<Review>,
    pub rating: RatingSummary,
}

/// AI-written digest of a property's reviews
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSummaryResponse {
    /// `None` when the property has no reviews yet
    pub summary: Option<String>,
    pub review_count: i64,
}
