//! FoodBridge Match - manufacturer matching service for the FoodBridge
//! B2B marketplace.
//!
//! This library provides the weighted multi-criteria scorer that ranks
//! manufacturer accounts against a brand project's requirements.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{parse_volume, MatchEngine, MemoryCatalog, ProductCatalog};
pub use crate::models::{
    FindMatchesRequest, FindMatchesResponse, ManufacturerMatch, ManufacturerProfile,
    ProjectRequirements,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert_eq!(parse_volume("50k-100k"), 100_000.0);
    }
}
