use serde::{Deserialize, Serialize};

/// What kind of catalog entity a project's selected product refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryKind {
    Product,
    Category,
    FoodType,
}

/// The product a brand selected when creating a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedProduct {
    pub name: String,
    #[serde(rename = "categoryKind")]
    pub category_kind: CategoryKind,
}

/// A brand's project requirements, as matched against manufacturers.
///
/// Every optional field may be absent; absence is a valid state and maps
/// to a partial-credit score, never an error.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectRequirements {
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(rename = "selectedProduct", default)]
    pub selected_product: Option<SelectedProduct>,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub packaging: Vec<String>,
    #[serde(rename = "allergenRequirements", default)]
    pub allergen_requirements: Vec<String>,
    #[serde(rename = "additionalRequirements", default)]
    pub additional_requirements: Option<String>,
}

/// A brand project document: requirements plus the metadata needed for
/// auth-free cache keying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "$id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub requirements: ProjectRequirements,
    #[serde(rename = "$updatedAt", alias = "updatedAt", default)]
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Legacy certificates field: older documents store a single string,
/// newer ones a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Certificates {
    One(String),
    Many(Vec<String>),
}

/// Manufacturer-declared settings relevant to matching.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ManufacturerSettings {
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(rename = "preferredCategories", default)]
    pub preferred_categories: Vec<String>,
    #[serde(rename = "productionCapacity", default)]
    pub production_capacity: Option<f64>,
}

/// A manufacturer account snapshot, as fetched from the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManufacturerProfile {
    #[serde(rename = "$id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "companyName", default)]
    pub company_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub certificates: Option<Certificates>,
    #[serde(rename = "manufacturerSettings", default)]
    pub manufacturer_settings: Option<ManufacturerSettings>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "companyDescription", default)]
    pub company_description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ManufacturerProfile {
    /// Declared production capacity, if any.
    pub fn production_capacity(&self) -> Option<f64> {
        self.manufacturer_settings
            .as_ref()
            .and_then(|s| s.production_capacity)
    }
}

/// One product record belonging to a manufacturer's catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProductRecord {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "foodType", default)]
    pub food_type: Option<String>,
    #[serde(rename = "packagingType", default)]
    pub packaging_type: Option<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    /// Legacy free-text manufacturer name; newer rows key by `owner_id`.
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(rename = "ownerId", default)]
    pub owner_id: Option<String>,
}

/// Score and explanation for one matching criterion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionScore {
    pub score: u32,
    #[serde(rename = "maxScore")]
    pub max_score: u32,
    pub explanation: String,
}

impl CriterionScore {
    pub fn new(score: u32, max_score: u32, explanation: impl Into<String>) -> Self {
        Self {
            score,
            max_score,
            explanation: explanation.into(),
        }
    }
}

/// Per-criterion breakdown of a composite match score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub location: CriterionScore,
    pub certifications: CriterionScore,
    pub industry: CriterionScore,
    pub capacity: CriterionScore,
    pub packaging: CriterionScore,
    pub allergens: CriterionScore,
    pub additional: CriterionScore,
}

/// A ranked manufacturer match, newly constructed per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManufacturerMatch {
    #[serde(rename = "manufacturerId")]
    pub manufacturer_id: String,
    pub name: String,
    #[serde(rename = "companyName")]
    pub company_name: String,
    pub email: String,
    #[serde(rename = "matchScore")]
    pub match_score: u32,
    #[serde(rename = "matchScoreUnit")]
    pub match_score_unit: f64,
    pub breakdown: MatchBreakdown,
    #[serde(rename = "matchStrength")]
    pub match_strength: String,
}
