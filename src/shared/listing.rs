//! Property Listing Data Structures
//!
//! A property is owned by exactly one landlord. Only that landlord may edit or
//! delete it; everyone may browse it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::SharedError;
use super::user::VerificationStatus;

/// Maximum number of image URLs attached to a listing
pub const MAX_IMAGES: usize = 10;

/// Kind of dwelling
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    House,
    Studio,
    Room,
    Shared,
}

impl PropertyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Studio => "studio",
            PropertyType::Room => "room",
            PropertyType::Shared => "shared",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, SharedError> {
        match s.to_lowercase().as_str() {
            "apartment" => Ok(PropertyType::Apartment),
            "house" => Ok(PropertyType::House),
            "studio" => Ok(PropertyType::Studio),
            "room" => Ok(PropertyType::Room),
            "shared" => Ok(PropertyType::Shared),
            other => Err(SharedError::unknown_variant("property type", other)),
        }
    }
}

/// A rental listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: Uuid,
    pub landlord_id: Uuid,
    pub title: String,
    pub description: String,
    /// Monthly rent in whole currency units
    pub price: i64,
    pub address: String,
    pub city: String,
    pub property_type: PropertyType,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub area_sqm: Option<f64>,
    pub furnished: bool,
    pub available_from: Option<NaiveDate>,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Condensed view used in lists (favorites, dashboards)
    pub fn summary(&self) -> PropertySummary {
        PropertySummary {
            id: self.id,
            title: self.title.clone(),
            price: self.price,
            city: self.city.clone(),
            property_type: self.property_type,
            bedrooms: self.bedrooms,
            cover_image: self.images.first().cloned(),
        }
    }
}

/// Condensed listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertySummary {
    pub id: Uuid,
    pub title: String,
    pub price: i64,
    pub city: String,
    pub property_type: PropertyType,
    pub bedrooms: i64,
    pub cover_image: Option<String>,
}

/// Request to create a listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePropertyRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    pub address: String,
    pub city: String,
    pub property_type: PropertyType,
    #[serde(default)]
    pub bedrooms: i64,
    #[serde(default)]
    pub bathrooms: i64,
    pub area_sqm: Option<f64>,
    #[serde(default)]
    pub furnished: bool,
    pub available_from: Option<NaiveDate>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl CreatePropertyRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_title(&self.title)?;
        validate_description(&self.description)?;
        validate_price(self.price)?;
        if self.address.trim().is_empty() {
            return Err(SharedError::validation("address", "Address is required"));
        }
        if self.city.trim().is_empty() {
            return Err(SharedError::validation("city", "City is required"));
        }
        validate_rooms(self.bedrooms, self.bathrooms)?;
        validate_images(&self.images)?;
        Ok(())
    }
}

/// Partial update of a listing; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePropertyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub property_type: Option<PropertyType>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<i64>,
    pub area_sqm: Option<f64>,
    pub furnished: Option<bool>,
    pub available_from: Option<NaiveDate>,
    pub images: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl UpdatePropertyRequest {
    /// Apply the present fields onto an existing listing
    pub fn apply_to(self, property: &mut Property) {
        if let Some(title) = self.title {
            property.title = title;
        }
        if let Some(description) = self.description {
            property.description = description;
        }
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(address) = self.address {
            property.address = address;
        }
        if let Some(city) = self.city {
            property.city = city;
        }
        if let Some(property_type) = self.property_type {
            property.property_type = property_type;
        }
        if let Some(bedrooms) = self.bedrooms {
            property.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = self.bathrooms {
            property.bathrooms = bathrooms;
        }
        if self.area_sqm.is_some() {
            property.area_sqm = self.area_sqm;
        }
        if let Some(furnished) = self.furnished {
            property.furnished = furnished;
        }
        if self.available_from.is_some() {
            property.available_from = self.available_from;
        }
        if let Some(images) = self.images {
            property.images = images;
        }
        if let Some(amenities) = self.amenities {
            property.amenities = amenities;
        }
        if self.latitude.is_some() {
            property.latitude = self.latitude;
        }
        if self.longitude.is_some() {
            property.longitude = self.longitude;
        }
    }
}

/// Validate a listing after an update has been applied
pub fn validate_property(property: &Property) -> Result<(), SharedError> {
    validate_title(&property.title)?;
    validate_description(&property.description)?;
    validate_price(property.price)?;
    validate_rooms(property.bedrooms, property.bathrooms)?;
    validate_images(&property.images)
}

fn validate_title(title: &str) -> Result<(), SharedError> {
    let len = title.trim().chars().count();
    if len == 0 || len > 120 {
        return Err(SharedError::validation("title", "Title must be 1-120 characters"));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), SharedError> {
    if description.chars().count() > 5000 {
        return Err(SharedError::validation("description", "Description must be at most 5000 characters"));
    }
    Ok(())
}

fn validate_price(price: i64) -> Result<(), SharedError> {
    if price <= 0 {
        return Err(SharedError::validation("price", "Price must be positive"));
    }
    Ok(())
}

fn validate_rooms(bedrooms: i64, bathrooms: i64) -> Result<(), SharedError> {
    if bedrooms < 0 || bathrooms < 0 {
        return Err(SharedError::validation("bedrooms", "Room counts cannot be negative"));
    }
    Ok(())
}

fn validate_images(images: &[String]) -> Result<(), SharedError> {
    if images.len() > MAX_IMAGES {
        return Err(SharedError::validation("images", format!("At most {} images are allowed", MAX_IMAGES)));
    }
    if images.iter().any(|url| !(url.starts_with("http://") || url.starts_with("https://"))) {
        return Err(SharedError::validation("images", "Images must be http(s) URLs"));
    }
    Ok(())
}

/// Sort order for listing search
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PropertySort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
}

/// Listing search filters (query string)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyQuery {
    /// Free text matched against title, description and address
    pub q: Option<String>,
    pub city: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_bedrooms: Option<i64>,
    pub property_type: Option<PropertyType>,
    pub furnished: Option<bool>,
    #[serde(default)]
    pub sort: PropertySort,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PropertyQuery {
    pub const DEFAULT_LIMIT: u32 = 12;
    pub const MAX_LIMIT: u32 = 50;

    /// 1-based page number
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, Self::MAX_LIMIT)
    }

    /// Row offset of the page; widened so any `page` is representable
    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.limit())
    }
}

/// One page of search results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyListResponse {
    pub properties: Vec<Property>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
}

/// Owner information shown on a listing page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LandlordSummary {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub verification_status: VerificationStatus,
}

/// Aggregate of a property's reviews
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct RatingSummary {
    pub average: Option<f64>,
    pub count: i64,
}

/// Listing detail page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDetailResponse {
    pub property: Property,
    pub landlord: LandlordSummary,
    pub rating: RatingSummary,
    /// Whether the caller has favorited this listing (false when anonymous)
    pub is_favorited: bool,
}

/// Facts a landlord supplies to get a drafted description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDescriptionRequest {
    pub title: String,
    pub property_type: PropertyType,
    pub city: String,
    #[serde(default)]
    pub bedrooms: i64,
    #[serde(default)]
    pub bathrooms: i64,
    pub price: i64,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub notes: Option<String>,
}

impl GenerateDescriptionRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_title(&self.title)?;
        validate_price(self.price)?;
        if self.city.trim().is_empty() {
            return Err(SharedError::validation("city", "City is required"));
        }
        validate_rooms(self.bedrooms, self.bathrooms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDescriptionResponse {
    pub description: String,
}
