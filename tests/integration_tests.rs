// End-to-end tests for the match engine

use async_trait::async_trait;
use foodbridge_match::core::catalog::CatalogError;
use foodbridge_match::core::{MatchEngine, MemoryCatalog, ProductCatalog, MAX_RESULTS, MIN_COMPOSITE_SCORE};
use foodbridge_match::models::{
    Certificates, ManufacturerProfile, ManufacturerSettings, ProductRecord, ProjectRequirements,
};
use std::sync::Arc;

fn manufacturer(id: &str) -> ManufacturerProfile {
    ManufacturerProfile {
        id: id.to_string(),
        name: format!("Owner {id}"),
        company_name: format!("Company {id}"),
        email: format!("{id}@example.com"),
        address: None,
        industry: None,
        certificates: None,
        manufacturer_settings: None,
        description: None,
        company_description: None,
        status: Some("active".to_string()),
    }
}

fn strong_candidate(id: &str) -> ManufacturerProfile {
    let mut candidate = manufacturer(id);
    candidate.address = Some("Osaka, Japan".to_string());
    candidate.certificates = Some(Certificates::Many(vec![
        "ISO 9001".to_string(),
        "Organic".to_string(),
    ]));
    candidate.manufacturer_settings = Some(ManufacturerSettings {
        certifications: vec![],
        preferred_categories: vec![],
        production_capacity: Some(200_000.0),
    });
    candidate
}

fn demanding_requirements() -> ProjectRequirements {
    ProjectRequirements {
        locations: vec!["Japan".to_string()],
        certifications: vec!["ISO 9001".to_string(), "Organic".to_string()],
        volume: Some("50k-100k".to_string()),
        ..Default::default()
    }
}

fn engine_with(rows: Vec<ProductRecord>) -> MatchEngine {
    MatchEngine::new(Arc::new(MemoryCatalog::new(rows)))
}

/// A catalog whose every lookup fails, for fail-soft verification.
struct FailingCatalog;

#[async_trait]
impl ProductCatalog for FailingCatalog {
    async fn find_by_owner(&self, _owner_id: &str) -> Result<Vec<ProductRecord>, CatalogError> {
        Err(CatalogError::Lookup("storage unreachable".to_string()))
    }

    async fn find_by_manufacturer_name_like(
        &self,
        _pattern: &str,
    ) -> Result<Vec<ProductRecord>, CatalogError> {
        Err(CatalogError::Lookup("storage unreachable".to_string()))
    }
}

#[tokio::test]
async fn test_scores_and_subscores_within_bounds() {
    let engine = engine_with(vec![]);
    let requirements = demanding_requirements();
    let pool: Vec<ManufacturerProfile> = (0..10)
        .map(|i| {
            if i % 2 == 0 {
                strong_candidate(&format!("m{i}"))
            } else {
                manufacturer(&format!("m{i}"))
            }
        })
        .collect();

    let matches = engine.rank_manufacturers(&requirements, pool).await;

    assert!(!matches.is_empty());
    for m in &matches {
        assert!(m.match_score >= MIN_COMPOSITE_SCORE && m.match_score <= 100);
        let b = &m.breakdown;
        assert!(b.location.score <= b.location.max_score);
        assert!(b.certifications.score <= b.certifications.max_score);
        assert!(b.industry.score <= b.industry.max_score);
        assert!(b.capacity.score <= b.capacity.max_score);
        assert!(b.packaging.score <= b.packaging.max_score);
        assert!(b.allergens.score <= b.allergens.max_score);
        assert!(b.additional.score <= b.additional.max_score);
    }
}

#[tokio::test]
async fn test_ordering_descending_with_stable_ties() {
    let engine = engine_with(vec![]);
    let requirements = demanding_requirements();

    // Alternate strong and weak candidates; equal-scoring candidates must
    // keep their input order.
    let pool = vec![
        manufacturer("weak-a"),
        strong_candidate("strong-a"),
        manufacturer("weak-b"),
        strong_candidate("strong-b"),
        strong_candidate("strong-c"),
    ];

    let matches = engine.rank_manufacturers(&requirements, pool).await;

    for pair in matches.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
    }

    let strong_order: Vec<&str> = matches
        .iter()
        .filter(|m| m.manufacturer_id.starts_with("strong"))
        .map(|m| m.manufacturer_id.as_str())
        .collect();
    assert_eq!(strong_order, vec!["strong-a", "strong-b", "strong-c"]);
}

#[tokio::test]
async fn test_result_cap_and_pool_bound() {
    let engine = engine_with(vec![]);
    let requirements = ProjectRequirements::default();

    let small: Vec<ManufacturerProfile> = (0..7).map(|i| manufacturer(&format!("m{i}"))).collect();
    let matches = engine.rank_manufacturers(&requirements, small).await;
    assert_eq!(matches.len(), 7);

    let large: Vec<ManufacturerProfile> = (0..120).map(|i| manufacturer(&format!("m{i}"))).collect();
    let matches = engine.rank_manufacturers(&requirements, large).await;
    assert_eq!(matches.len(), MAX_RESULTS);
}

#[tokio::test]
async fn test_threshold_filters_low_scorers() {
    let engine = engine_with(vec![]);

    // Demanding requirements against a bare candidate:
    // location 0 + certs 0 + industry 0 + capacity 6 + packaging 4 +
    // allergens 4 + additional 3 = 17, below the threshold.
    let requirements = demanding_requirements();
    let pool = vec![manufacturer("bare"), strong_candidate("strong")];

    let matches = engine.rank_manufacturers(&requirements, pool).await;

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].manufacturer_id, "strong");
    assert!(matches[0].match_score >= MIN_COMPOSITE_SCORE);
}

#[tokio::test]
async fn test_empty_requirements_baseline() {
    let engine = engine_with(vec![]);
    let requirements = ProjectRequirements::default();

    let matches = engine.rank_manufacturers(&requirements, vec![manufacturer("m1")]).await;

    // 7 (location) + 10 (certs) + 0 (industry) + 7 (capacity) +
    // 4 (packaging) + 4 (allergens) + 3 (additional) = 35
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].match_score, 35);
    assert_eq!(matches[0].match_strength, "Fair Match");
}

#[tokio::test]
async fn test_failing_catalog_degrades_to_fallback_scores() {
    let engine = MatchEngine::new(Arc::new(FailingCatalog));

    let requirements = ProjectRequirements {
        packaging: vec!["bottle".to_string()],
        allergen_requirements: vec!["Peanut Free".to_string()],
        ..Default::default()
    };

    let matches = engine
        .rank_manufacturers(&requirements, vec![strong_candidate("m1")])
        .await;

    assert_eq!(matches.len(), 1);
    let b = &matches[0].breakdown;
    // Catalog-backed criteria fall back instead of erroring the run.
    assert_eq!(b.packaging.score, 4);
    assert_eq!(b.allergens.score, 4);
}

#[tokio::test]
async fn test_catalog_rows_lift_a_candidate_above_threshold() {
    let rows = vec![ProductRecord {
        category: Some("soy sauce".to_string()),
        packaging_type: Some("Glass Bottle".to_string()),
        allergens: vec!["soy".to_string()],
        owner_id: Some("m1".to_string()),
        ..Default::default()
    }];
    let engine = engine_with(rows);

    let requirements = ProjectRequirements {
        selected_product: Some(foodbridge_match::models::SelectedProduct {
            name: "Soy Sauce".to_string(),
            category_kind: foodbridge_match::models::CategoryKind::Product,
        }),
        packaging: vec!["bottle".to_string()],
        ..Default::default()
    };

    let with_catalog = engine
        .rank_manufacturers(&requirements, vec![manufacturer("m1")])
        .await;
    let without_catalog = engine_with(vec![])
        .rank_manufacturers(&requirements, vec![manufacturer("m1")])
        .await;

    assert_eq!(with_catalog.len(), 1);
    assert_eq!(with_catalog[0].breakdown.industry.score, 20);
    assert_eq!(with_catalog[0].breakdown.packaging.score, 10);
    // The same candidate without catalog evidence scores strictly lower.
    if let Some(bare) = without_catalog.first() {
        assert!(bare.match_score < with_catalog[0].match_score);
    }
}
