//! Property Listings Module
//!
//! - **`db`** - Listing storage, search and view tracking
//! - **`handlers`** - `/api/properties` and `/api/landlord/properties`

pub mod db;
pub mod handlers;

pub use handlers::load_property;
