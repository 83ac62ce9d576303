// Core algorithm exports
pub mod catalog;
pub mod criteria;
pub mod matcher;
pub mod normalize;
pub mod tables;

pub use catalog::{CatalogError, MemoryCatalog, ProductCatalog};
pub use matcher::{match_strength, score_candidate, EngineError, MatchEngine, MAX_RESULTS, MIN_COMPOSITE_SCORE};
pub use normalize::{merged_certifications, normalize_allergen, parse_volume};
