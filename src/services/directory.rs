use crate::core::catalog::{CatalogError, ProductCatalog};
use crate::models::{ManufacturerProfile, ProductRecord, Project};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the marketplace document store
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Collection IDs in the document store
#[derive(Debug, Clone)]
pub struct DirectoryCollections {
    pub accounts: String,
    pub products: String,
    pub projects: String,
    pub contacts: String,
}

/// Document-store client for the manufacturer directory.
///
/// Handles all reads the matching flow needs: the active-manufacturer pool,
/// project documents, and per-manufacturer product catalogs. Also mirrors
/// contact events as a best-effort secondary write.
pub struct DirectoryClient {
    base_url: String,
    api_key: String,
    project_id: String,
    database_id: String,
    client: Client,
    collections: DirectoryCollections,
}

impl DirectoryClient {
    pub fn new(
        base_url: String,
        api_key: String,
        project_id: String,
        database_id: String,
        collections: DirectoryCollections,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            project_id,
            database_id,
            client,
            collections,
        }
    }

    fn documents_url(&self, collection: &str, queries: &[String]) -> String {
        let base = format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            collection
        );
        if queries.is_empty() {
            return base;
        }
        let queries_json = serde_json::to_string(queries).unwrap_or_default();
        format!("{}?query={}", base, urlencoding::encode(&queries_json))
    }

    async fn fetch_documents(
        &self,
        collection: &str,
        queries: &[String],
    ) -> Result<Vec<Value>, DirectoryError> {
        let url = self.documents_url(collection, queries);
        tracing::debug!("Fetching documents from: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to fetch documents from {}: {}",
                collection,
                response.status()
            )));
        }

        let json: Value = response.json().await?;
        let documents = json
            .get("documents")
            .and_then(|d| d.as_array())
            .ok_or_else(|| DirectoryError::InvalidResponse("Missing documents array".into()))?;

        Ok(documents.to_vec())
    }

    /// Fetch all accounts with role "manufacturer" and status active/online.
    ///
    /// This is the candidate pool for a matching run; documents that fail to
    /// parse are skipped rather than failing the whole pool.
    pub async fn find_active_manufacturers(
        &self,
    ) -> Result<Vec<ManufacturerProfile>, DirectoryError> {
        let queries = vec![
            "equal(\"role\", \"manufacturer\")".to_string(),
            "in(\"status\", [\"active\",\"online\"])".to_string(),
        ];

        let documents = self.fetch_documents(&self.collections.accounts, &queries).await?;
        let profiles: Vec<ManufacturerProfile> = documents
            .iter()
            .filter_map(|doc| {
                let data = doc.get("data").unwrap_or(doc);
                serde_json::from_value(data.clone()).ok()
            })
            .collect();

        tracing::debug!("Fetched {} active manufacturer accounts", profiles.len());
        Ok(profiles)
    }

    /// Load a project document by id.
    pub async fn get_project(&self, project_id: &str) -> Result<Project, DirectoryError> {
        let queries = vec![format!("equal(\"$id\", \"{}\")", project_id)];
        let documents = self.fetch_documents(&self.collections.projects, &queries).await?;

        let doc = documents
            .first()
            .ok_or_else(|| DirectoryError::NotFound(format!("Project {} not found", project_id)))?;

        let data = doc.get("data").unwrap_or(doc);
        serde_json::from_value(data.clone())
            .map_err(|e| DirectoryError::InvalidResponse(format!("Failed to parse project: {}", e)))
    }

    /// Catalog rows owned by the given manufacturer account.
    pub async fn find_products_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Vec<ProductRecord>, DirectoryError> {
        let queries = vec![format!("equal(\"ownerId\", \"{}\")", owner_id)];
        let documents = self.fetch_documents(&self.collections.products, &queries).await?;
        Ok(parse_products(&documents))
    }

    /// Legacy catalog rows keyed by a free-text manufacturer name.
    pub async fn find_products_by_manufacturer_name(
        &self,
        pattern: &str,
    ) -> Result<Vec<ProductRecord>, DirectoryError> {
        let queries = vec![format!("search(\"manufacturer\", \"{}\")", pattern)];
        let documents = self.fetch_documents(&self.collections.products, &queries).await?;

        // The search index is token-based; re-check the substring here so
        // the contract stays a case-insensitive containment match.
        let pattern = pattern.to_lowercase();
        Ok(parse_products(&documents)
            .into_iter()
            .filter(|r| {
                r.manufacturer
                    .as_deref()
                    .map(|m| m.to_lowercase().contains(&pattern))
                    .unwrap_or(false)
            })
            .collect())
    }

    /// Best-effort mirror of a contact event into the document store.
    /// Postgres remains the primary record.
    pub async fn record_contact_event(
        &self,
        project_id: &str,
        manufacturer_id: &str,
        match_score: Option<u32>,
    ) -> Result<(), DirectoryError> {
        let url = format!(
            "{}/databases/{}/collections/{}/documents",
            self.base_url.trim_end_matches('/'),
            self.database_id,
            self.collections.contacts
        );

        let payload = serde_json::json!({
            "$id": uuid::Uuid::new_v4().to_string(),
            "projectId": project_id,
            "manufacturerId": manufacturer_id,
            "matchScore": match_score,
            "status": "contacted",
            "contactedAt": chrono::Utc::now(),
        });

        let response = self
            .client
            .post(&url)
            .header("X-Appwrite-Key", &self.api_key)
            .header("X-Appwrite-Project", &self.project_id)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DirectoryError::ApiError(format!(
                "Failed to record contact event: {}",
                response.status()
            )));
        }

        tracing::debug!("Recorded contact event: {} -> {}", project_id, manufacturer_id);
        Ok(())
    }
}

fn parse_products(documents: &[Value]) -> Vec<ProductRecord> {
    documents
        .iter()
        .filter_map(|doc| {
            let data = doc.get("data").unwrap_or(doc);
            serde_json::from_value(data.clone()).ok()
        })
        .collect()
}

#[async_trait]
impl ProductCatalog for DirectoryClient {
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<ProductRecord>, CatalogError> {
        self.find_products_by_owner(owner_id)
            .await
            .map_err(|e| CatalogError::Lookup(e.to_string()))
    }

    async fn find_by_manufacturer_name_like(
        &self,
        pattern: &str,
    ) -> Result<Vec<ProductRecord>, CatalogError> {
        self.find_products_by_manufacturer_name(pattern)
            .await
            .map_err(|e| CatalogError::Lookup(e.to_string()))
    }
}
