use crate::models::ProductRecord;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from a product-catalog lookup
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog lookup failed: {0}")]
    Lookup(String),
}

/// Read-only access to manufacturer product catalogs.
///
/// Newer catalog rows key by owner id; legacy rows carry a free-text
/// `manufacturer` name instead. The provided `find_for_manufacturer`
/// implements the id-then-name fallback so scorers never reimplement it.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<ProductRecord>, CatalogError>;

    /// Case-insensitive substring match on the legacy manufacturer name field.
    async fn find_by_manufacturer_name_like(
        &self,
        pattern: &str,
    ) -> Result<Vec<ProductRecord>, CatalogError>;

    async fn find_for_manufacturer(
        &self,
        owner_id: &str,
        company_name: &str,
    ) -> Result<Vec<ProductRecord>, CatalogError> {
        let rows = self.find_by_owner(owner_id).await?;
        if !rows.is_empty() {
            return Ok(rows);
        }
        if company_name.trim().is_empty() {
            return Ok(Vec::new());
        }
        self.find_by_manufacturer_name_like(company_name).await
    }
}

/// In-memory catalog used by tests and benchmarks.
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    rows: Vec<ProductRecord>,
}

impl MemoryCatalog {
    pub fn new(rows: Vec<ProductRecord>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl ProductCatalog for MemoryCatalog {
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<ProductRecord>, CatalogError> {
        Ok(self
            .rows
            .iter()
            .filter(|r| r.owner_id.as_deref() == Some(owner_id))
            .cloned()
            .collect())
    }

    async fn find_by_manufacturer_name_like(
        &self,
        pattern: &str,
    ) -> Result<Vec<ProductRecord>, CatalogError> {
        let pattern = pattern.to_lowercase();
        Ok(self
            .rows
            .iter()
            .filter(|r| {
                r.manufacturer
                    .as_deref()
                    .map(|m| m.to_lowercase().contains(&pattern))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }
}
