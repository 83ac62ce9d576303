use crate::core::catalog::ProductCatalog;
use crate::core::criteria::{
    score_additional, score_allergens, score_capacity, score_certifications, score_industry,
    score_location, score_packaging,
};
use crate::models::{ManufacturerMatch, ManufacturerProfile, MatchBreakdown, ProjectRequirements};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;

/// Minimum composite score a candidate needs to appear in the result list.
pub const MIN_COMPOSITE_SCORE: u32 = 30;
/// Hard cap on the number of returned matches.
pub const MAX_RESULTS: usize = 50;

/// Errors from the top-level orchestration itself; scorer-level failures
/// never surface here.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("scoring task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Strength tier label for a composite score.
pub fn match_strength(score: u32) -> &'static str {
    match score {
        s if s >= 75 => "Excellent Match",
        s if s >= 65 => "Very Good Match",
        s if s >= 55 => "Good Match",
        s if s >= 45 => "Moderate Match",
        s if s >= 35 => "Fair Match",
        _ => "Basic Match",
    }
}

/// Score one candidate across all seven criteria.
///
/// Every criterion always produces a sub-score; catalog-backed criteria
/// suspend on their lookups and fall back internally on failure.
pub async fn score_candidate(
    requirements: &ProjectRequirements,
    profile: &ManufacturerProfile,
    catalog: &dyn ProductCatalog,
) -> ManufacturerMatch {
    let breakdown = MatchBreakdown {
        location: score_location(requirements, profile),
        certifications: score_certifications(requirements, profile),
        industry: score_industry(requirements, profile, catalog).await,
        capacity: score_capacity(requirements, profile),
        packaging: score_packaging(requirements, profile, catalog).await,
        allergens: score_allergens(requirements, profile, catalog).await,
        additional: score_additional(requirements, profile, catalog).await,
    };

    let composite = breakdown.location.score
        + breakdown.certifications.score
        + breakdown.industry.score
        + breakdown.capacity.score
        + breakdown.packaging.score
        + breakdown.allergens.score
        + breakdown.additional.score;

    ManufacturerMatch {
        manufacturer_id: profile.id.clone(),
        name: profile.name.clone(),
        company_name: profile.company_name.clone(),
        email: profile.email.clone(),
        match_score: composite,
        match_score_unit: composite as f64 / 100.0,
        breakdown,
        match_strength: match_strength(composite).to_string(),
    }
}

/// Ranks candidate manufacturers against a project's requirements.
///
/// # Pipeline
/// 1. Score every candidate across the seven criteria (concurrently).
/// 2. Drop candidates below the composite threshold.
/// 3. Stable sort by descending composite score (input order on ties).
/// 4. Truncate to the result cap.
#[derive(Clone)]
pub struct MatchEngine {
    catalog: Arc<dyn ProductCatalog>,
}

impl MatchEngine {
    pub fn new(catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { catalog }
    }

    /// Rank a candidate pool against the given requirements.
    ///
    /// Never returns an error: a fatal orchestration failure is logged and
    /// mapped to an empty list. The candidate pool is expected to already
    /// be filtered to active/online manufacturers by the caller.
    pub async fn rank_manufacturers(
        &self,
        requirements: &ProjectRequirements,
        candidates: Vec<ManufacturerProfile>,
    ) -> Vec<ManufacturerMatch> {
        match self.try_rank(requirements, candidates).await {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!("Match run failed, returning empty result: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_rank(
        &self,
        requirements: &ProjectRequirements,
        candidates: Vec<ManufacturerProfile>,
    ) -> Result<Vec<ManufacturerMatch>, EngineError> {
        let pool_size = candidates.len();

        // One task per candidate; each carries its input index so the
        // stable tie-order survives concurrent completion.
        let mut tasks = JoinSet::new();
        for (index, profile) in candidates.into_iter().enumerate() {
            let catalog = Arc::clone(&self.catalog);
            let requirements = requirements.clone();
            tasks.spawn(async move {
                let scored = score_candidate(&requirements, &profile, catalog.as_ref()).await;
                (index, scored)
            });
        }

        let mut by_input_order: Vec<Option<ManufacturerMatch>> =
            (0..pool_size).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            let (index, scored) = joined?;
            by_input_order[index] = Some(scored);
        }

        let mut matches: Vec<ManufacturerMatch> = by_input_order
            .into_iter()
            .flatten()
            .filter(|m| m.match_score >= MIN_COMPOSITE_SCORE)
            .collect();

        // Vec::sort_by is stable, preserving input order among equal scores.
        matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        matches.truncate(MAX_RESULTS);

        tracing::debug!(
            "Ranked {} of {} candidates above threshold {}",
            matches.len(),
            pool_size,
            MIN_COMPOSITE_SCORE
        );

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::MemoryCatalog;

    fn candidate(id: &str) -> ManufacturerProfile {
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

    fn engine() -> MatchEngine {
        MatchEngine::new(Arc::new(MemoryCatalog::default()))
    }

    #[test]
    fn test_match_strength_tiers() {
        assert_eq!(match_strength(80), "Excellent Match");
        assert_eq!(match_strength(75), "Excellent Match");
        assert_eq!(match_strength(70), "Very Good Match");
        assert_eq!(match_strength(60), "Good Match");
        assert_eq!(match_strength(50), "Moderate Match");
        assert_eq!(match_strength(35), "Fair Match");
        assert_eq!(match_strength(34), "Basic Match");
    }

    #[tokio::test]
    async fn test_empty_pool_yields_empty_result() {
        let requirements = ProjectRequirements::default();
        let matches = engine().rank_manufacturers(&requirements, vec![]).await;
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_no_requirements_baseline_passes_threshold() {
        let requirements = ProjectRequirements::default();
        let matches = engine()
            .rank_manufacturers(&requirements, vec![candidate("m1")])
            .await;

        assert_eq!(matches.len(), 1);
        // 7 + 10 + 0 + 7 + 4 + 4 + 3
        assert_eq!(matches[0].match_score, 35);
        assert_eq!(matches[0].match_strength, "Fair Match");
    }

    #[tokio::test]
    async fn test_tie_order_follows_input_order() {
        let requirements = ProjectRequirements::default();
        let pool: Vec<ManufacturerProfile> =
            (0..8).map(|i| candidate(&format!("m{i}"))).collect();

        let matches = engine().rank_manufacturers(&requirements, pool).await;

        let ids: Vec<&str> = matches.iter().map(|m| m.manufacturer_id.as_str()).collect();
        assert_eq!(ids, vec!["m0", "m1", "m2", "m3", "m4", "m5", "m6", "m7"]);
    }

    #[tokio::test]
    async fn test_result_cap() {
        let requirements = ProjectRequirements::default();
        let pool: Vec<ManufacturerProfile> =
            (0..80).map(|i| candidate(&format!("m{i}"))).collect();

        let matches = engine().rank_manufacturers(&requirements, pool).await;
        assert_eq!(matches.len(), MAX_RESULTS);
    }
}
