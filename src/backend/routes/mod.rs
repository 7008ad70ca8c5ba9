//! Route Configuration Module
//!
//! - **`router`** - Main router creation, static client fallback, tower layers
//! - **`api_routes`** - Public and protected `/api` routes
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint routing
//! ```

/// Main router creation
pub mod router;

/// API endpoint routing
pub mod api_routes;

pub use router::create_router;
