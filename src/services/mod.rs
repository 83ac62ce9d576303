// Service exports
pub mod cache;
pub mod directory;
pub mod postgres;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use directory::{DirectoryClient, DirectoryCollections, DirectoryError};
pub use postgres::{ContactStatus, ContactStore, ContactStoreError};
