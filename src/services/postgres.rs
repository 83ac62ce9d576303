use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum ContactStoreError {
    #[error("Connection pool error: {0}")]
    PoolError(#[from] deadpool_postgres::PoolError),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Lifecycle of a brand-to-manufacturer contact
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "contact_status", rename_all = "lowercase")]
pub enum ContactStatus {
    Contacted,
    Responded,
    Closed,
}

impl ContactStatus {
    pub fn parse(value: &str) -> Result<Self, ContactStoreError> {
        match value.to_lowercase().as_str() {
            "contacted" => Ok(ContactStatus::Contacted),
            "responded" => Ok(ContactStatus::Responded),
            "closed" => Ok(ContactStatus::Closed),
            other => Err(ContactStoreError::InvalidInput(format!(
                "Unknown contact status: {}",
                other
            ))),
        }
    }
}

/// One recorded contact between a project and a manufacturer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRecord {
    pub project_id: String,
    pub manufacturer_id: String,
    pub match_score: Option<i32>,
    pub status: ContactStatus,
    pub contacted_at: chrono::DateTime<chrono::Utc>,
}

/// Statistics about a project's outreach
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactStats {
    pub project_id: String,
    pub total: i64,
    pub contacted: i64,
    pub responded: i64,
    pub closed: i64,
    pub last_contact_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// PostgreSQL store for contact records.
///
/// Contacts are kept here as the primary record, separate from the document
/// store, so the matching flow can exclude or annotate already-contacted
/// manufacturers reliably.
pub struct ContactStore {
    pool: PgPool,
}

impl ContactStore {
    /// Create a new contact store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, ContactStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new contact store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, ContactStoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Record a contact, updating the status and score on repeat contact.
    pub async fn record_contact(
        &self,
        project_id: &str,
        manufacturer_id: &str,
        match_score: Option<i32>,
        status: ContactStatus,
    ) -> Result<(), ContactStoreError> {
        let query = r#"
            INSERT INTO contact_records (project_id, manufacturer_id, match_score, status, contacted_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (project_id, manufacturer_id)
            DO UPDATE SET
                match_score = EXCLUDED.match_score,
                status = EXCLUDED.status,
                contacted_at = EXCLUDED.contacted_at
        "#;

        sqlx::query(query)
            .bind(project_id)
            .bind(manufacturer_id)
            .bind(match_score)
            .bind(&status)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded contact: {} -> {} ({:?})",
            project_id,
            manufacturer_id,
            status
        );

        Ok(())
    }

    /// Manufacturer ids already contacted for the given project.
    pub async fn get_contacted_ids(&self, project_id: &str) -> Result<Vec<String>, ContactStoreError> {
        let query = r#"
            SELECT manufacturer_id
            FROM contact_records
            WHERE project_id = $1
            ORDER BY contacted_at DESC
        "#;

        let rows = sqlx::query(query).bind(project_id).fetch_all(&self.pool).await?;

        let ids: Vec<String> = rows.iter().map(|row| row.get("manufacturer_id")).collect();

        tracing::debug!("Project {} has contacted {} manufacturers", project_id, ids.len());

        Ok(ids)
    }

    /// Outreach statistics for a project.
    pub async fn get_contact_stats(&self, project_id: &str) -> Result<ContactStats, ContactStoreError> {
        let query = r#"
            SELECT
                COUNT(*) as total,
                COUNT(*) FILTER (WHERE status = 'contacted') as contacted,
                COUNT(*) FILTER (WHERE status = 'responded') as responded,
                COUNT(*) FILTER (WHERE status = 'closed') as closed,
                MAX(contacted_at) as last_contact_at
            FROM contact_records
            WHERE project_id = $1
        "#;

        let row = sqlx::query(query).bind(project_id).fetch_one(&self.pool).await?;

        Ok(ContactStats {
            project_id: project_id.to_string(),
            total: row.get("total"),
            contacted: row.get("contacted"),
            responded: row.get("responded"),
            closed: row.get("closed"),
            last_contact_at: row.get("last_contact_at"),
        })
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, ContactStoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
