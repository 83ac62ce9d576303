//! The seven weighted criterion scorers.
//!
//! Every scorer returns a `CriterionScore` for every candidate; absent
//! requirement fields or missing candidate metadata map to partial-credit
//! defaults, and a failed catalog lookup maps to the scorer's documented
//! fallback rather than aborting the run.

use crate::core::catalog::ProductCatalog;
use crate::core::normalize::{
    bidi_contains, fold, merged_certifications, normalize_allergen, parse_volume,
};
use crate::core::tables::{
    CATALOG_SYNONYMS, FOOD_CATEGORIES, PACKAGING_BUCKETS, PREFERRED_CATEGORY_KEYWORDS,
    REGION_COUNTRIES, REQUIREMENT_KEYWORDS,
};
use crate::models::{CategoryKind, CriterionScore, ManufacturerProfile, ProjectRequirements};

pub const LOCATION_MAX: u32 = 15;
pub const CERTIFICATION_MAX: u32 = 20;
pub const INDUSTRY_MAX: u32 = 25;
pub const CAPACITY_MAX: u32 = 15;
pub const PACKAGING_MAX: u32 = 10;
pub const ALLERGEN_MAX: u32 = 10;
pub const ADDITIONAL_MAX: u32 = 5;

/// Regional containment is weaker evidence than an exact address hit.
const LOCATION_REGIONAL_MAX: f64 = 11.0;
/// Any partial packaging match must outrank the no-data default of 4.
const PACKAGING_PARTIAL_FLOOR: u32 = 6;

#[inline]
fn round_score(value: f64) -> u32 {
    value.round().max(0.0) as u32
}

/// Location criterion (max 15).
pub fn score_location(
    requirements: &ProjectRequirements,
    profile: &ManufacturerProfile,
) -> CriterionScore {
    let requested: Vec<String> = requirements
        .locations
        .iter()
        .map(|l| fold(l))
        .filter(|l| !l.is_empty())
        .collect();

    if requested.is_empty() {
        return CriterionScore::new(7, LOCATION_MAX, "No specific location required");
    }

    if requested.iter().any(|l| l == "global") {
        return CriterionScore::new(LOCATION_MAX, LOCATION_MAX, "Global request");
    }

    let address = match profile.address.as_deref().map(fold) {
        Some(a) if !a.is_empty() => a,
        _ => {
            return CriterionScore::new(0, LOCATION_MAX, "No manufacturer address on file");
        }
    };

    let total = requested.len() as f64;
    let exact = requested.iter().filter(|l| address.contains(l.as_str())).count();
    if exact > 0 {
        return CriterionScore::new(
            round_score(LOCATION_MAX as f64 * exact as f64 / total),
            LOCATION_MAX,
            format!("Matched {exact} of {} requested locations", requested.len()),
        );
    }

    let regional = requested
        .iter()
        .filter(|token| {
            REGION_COUNTRIES
                .iter()
                .find(|(region, _)| *region == token.as_str())
                .map(|(_, countries)| countries.iter().any(|c| address.contains(c)))
                .unwrap_or(false)
        })
        .count();
    if regional > 0 {
        return CriterionScore::new(
            round_score(LOCATION_REGIONAL_MAX * regional as f64 / total),
            LOCATION_MAX,
            format!("Regional match for {regional} of {} requested locations", requested.len()),
        );
    }

    CriterionScore::new(0, LOCATION_MAX, "No location match")
}

/// Certification criterion (max 20).
pub fn score_certifications(
    requirements: &ProjectRequirements,
    profile: &ManufacturerProfile,
) -> CriterionScore {
    let required: Vec<String> = requirements
        .certifications
        .iter()
        .map(|c| fold(c))
        .filter(|c| !c.is_empty())
        .collect();

    if required.is_empty() {
        return CriterionScore::new(10, CERTIFICATION_MAX, "No certifications required");
    }

    let held = merged_certifications(profile);
    if held.is_empty() {
        return CriterionScore::new(0, CERTIFICATION_MAX, "No certifications on file");
    }

    let matched = required
        .iter()
        .filter(|req| held.iter().any(|cert| cert == *req || bidi_contains(cert, req)))
        .count();

    let pct = matched as f64 / required.len() as f64;
    let score = if pct >= 0.8 {
        CERTIFICATION_MAX
    } else if pct >= 0.5 {
        15
    } else if pct > 0.0 {
        10
    } else {
        0
    };

    CriterionScore::new(
        score,
        CERTIFICATION_MAX,
        format!("Matched {matched} of {} required certifications", required.len()),
    )
}

/// Whether free text resolves to a food category: it contains the category
/// name or any of the category's keywords.
fn resolves_to_category(text: &str, category: &str, keywords: &[&str]) -> bool {
    text.contains(category) || keywords.iter().any(|k| text.contains(k))
}

/// Industry / product-category criterion (max 25): industry text match,
/// catalog verification, and a preferred-category bonus, capped at 25.
pub async fn score_industry(
    requirements: &ProjectRequirements,
    profile: &ManufacturerProfile,
    catalog: &dyn ProductCatalog,
) -> CriterionScore {
    let product = match &requirements.selected_product {
        Some(p) => p,
        None => return CriterionScore::new(0, INDUSTRY_MAX, "No product requirement"),
    };
    let product_name = fold(&product.name);
    let industry = profile.industry.as_deref().map(fold).unwrap_or_default();

    let mut score: u32 = 0;
    let mut notes: Vec<String> = Vec::new();

    // Source 1: industry text against the requested product name.
    if !industry.is_empty() {
        if bidi_contains(&industry, &product_name) {
            score += 20;
            notes.push("Industry matches requested product".to_string());
        } else {
            let shared_category = FOOD_CATEGORIES.iter().find(|(category, keywords)| {
                resolves_to_category(&product_name, category, keywords)
                    && resolves_to_category(&industry, category, keywords)
            });
            match shared_category {
                Some((category, _)) => {
                    score += 15;
                    notes.push(format!("Industry and product share the {category} category"));
                }
                None => {
                    let kind_allows_fallback = matches!(
                        product.category_kind,
                        CategoryKind::Category | CategoryKind::FoodType
                    );
                    if kind_allows_fallback && industry.contains("food") {
                        score += 10;
                        notes.push("General food industry".to_string());
                    }
                }
            }
        }
    }

    // Source 2: verify against actual catalog contents; raises the score
    // floor to 20 rather than adding.
    match catalog
        .find_for_manufacturer(&profile.id, &profile.company_name)
        .await
    {
        Ok(rows) => {
            let tokens: Vec<String> = rows
                .iter()
                .flat_map(|r| [r.category.as_deref(), r.food_type.as_deref()])
                .flatten()
                .map(fold)
                .filter(|t| !t.is_empty())
                .collect();

            let direct = tokens.iter().any(|t| bidi_contains(&product_name, t));
            let synonym = CATALOG_SYNONYMS.iter().any(|(_, group)| {
                group.iter().any(|s| product_name.contains(s))
                    && tokens
                        .iter()
                        .any(|t| group.iter().any(|s| t.contains(s)))
            });

            if direct || synonym {
                score = score.max(20);
                notes.push("Product catalog match".to_string());
            }
        }
        Err(e) => {
            tracing::warn!(
                "Catalog lookup failed for {} during industry scoring: {}",
                profile.id,
                e
            );
        }
    }

    // Source 3: preferred-category bonus, capped so the total never
    // exceeds the criterion maximum.
    if let Some(settings) = &profile.manufacturer_settings {
        let declared_match = settings.preferred_categories.iter().any(|declared| {
            let declared = fold(declared);
            if declared.is_empty() {
                return false;
            }
            bidi_contains(&declared, &product_name)
                || PREFERRED_CATEGORY_KEYWORDS.iter().any(|(category, keywords)| {
                    resolves_to_category(&product_name, category, keywords)
                        && resolves_to_category(&declared, category, keywords)
                })
        });
        if declared_match && score < INDUSTRY_MAX {
            score += 5.min(INDUSTRY_MAX - score);
            notes.push("Preferred category match".to_string());
        }
    }

    let explanation = if notes.is_empty() {
        "No industry or category match".to_string()
    } else {
        notes.join("; ")
    };
    CriterionScore::new(score.min(INDUSTRY_MAX), INDUSTRY_MAX, explanation)
}

/// Production-capacity criterion (max 15).
pub fn score_capacity(
    requirements: &ProjectRequirements,
    profile: &ManufacturerProfile,
) -> CriterionScore {
    let volume_text = match requirements.volume.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => return CriterionScore::new(7, CAPACITY_MAX, "No volume requirement specified"),
    };
    let volume = parse_volume(volume_text);

    let capacity = match profile.production_capacity() {
        Some(c) => c,
        None => return CriterionScore::new(6, CAPACITY_MAX, "No declared production capacity"),
    };

    let score = if capacity >= volume {
        CAPACITY_MAX
    } else if capacity >= 0.8 * volume {
        12
    } else if capacity >= 0.6 * volume {
        9
    } else if capacity >= 0.4 * volume {
        6
    } else if capacity > 0.0 {
        3
    } else {
        0
    };

    CriterionScore::new(
        score,
        CAPACITY_MAX,
        format!("Capacity {capacity} against requested volume {volume}"),
    )
}

/// Canonical bucket for a raw packaging term, if any.
fn packaging_bucket(term: &str) -> Option<&'static str> {
    PACKAGING_BUCKETS
        .iter()
        .find(|(bucket, synonyms)| {
            term.contains(bucket) || synonyms.iter().any(|s| term.contains(s))
        })
        .map(|(bucket, _)| *bucket)
}

/// Packaging criterion (max 10).
pub async fn score_packaging(
    requirements: &ProjectRequirements,
    profile: &ManufacturerProfile,
    catalog: &dyn ProductCatalog,
) -> CriterionScore {
    let required: Vec<String> = requirements
        .packaging
        .iter()
        .map(|p| fold(p))
        .filter(|p| !p.is_empty())
        .collect();

    if required.is_empty() {
        return CriterionScore::new(4, PACKAGING_MAX, "No packaging requirement specified");
    }

    let rows = match catalog
        .find_for_manufacturer(&profile.id, &profile.company_name)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(
                "Catalog lookup failed for {} during packaging scoring: {}",
                profile.id,
                e
            );
            return CriterionScore::new(4, PACKAGING_MAX, "No product data available");
        }
    };

    let raw_types: Vec<String> = rows
        .iter()
        .filter_map(|r| r.packaging_type.as_deref())
        .map(fold)
        .filter(|p| !p.is_empty())
        .collect();
    if raw_types.is_empty() {
        return CriterionScore::new(4, PACKAGING_MAX, "No product data available");
    }

    let catalog_buckets: Vec<&'static str> =
        raw_types.iter().filter_map(|t| packaging_bucket(t)).collect();

    let matched = required
        .iter()
        .filter(|req| {
            let bucket_hit = packaging_bucket(req)
                .map(|b| catalog_buckets.contains(&b))
                .unwrap_or(false);
            bucket_hit || raw_types.iter().any(|raw| raw.contains(req.as_str()))
        })
        .count();

    if matched == 0 {
        return CriterionScore::new(0, PACKAGING_MAX, "No packaging match");
    }

    let pct = matched as f64 / required.len() as f64;
    CriterionScore::new(
        round_score(PACKAGING_MAX as f64 * pct).max(PACKAGING_PARTIAL_FLOOR),
        PACKAGING_MAX,
        format!("Matched {matched} of {} packaging requirements", required.len()),
    )
}

/// Allergen criterion (max 10).
pub async fn score_allergens(
    requirements: &ProjectRequirements,
    profile: &ManufacturerProfile,
    catalog: &dyn ProductCatalog,
) -> CriterionScore {
    let required: Vec<String> = requirements
        .allergen_requirements
        .iter()
        .map(|a| normalize_allergen(a))
        .filter(|a| !a.is_empty())
        .collect();

    if required.is_empty() {
        return CriterionScore::new(4, ALLERGEN_MAX, "No allergen requirement specified");
    }

    let rows = match catalog
        .find_for_manufacturer(&profile.id, &profile.company_name)
        .await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(
                "Catalog lookup failed for {} during allergen scoring: {}",
                profile.id,
                e
            );
            return CriterionScore::new(4, ALLERGEN_MAX, "No product data available");
        }
    };
    if rows.is_empty() {
        return CriterionScore::new(4, ALLERGEN_MAX, "No product data available");
    }

    let declared: Vec<String> = rows
        .iter()
        .flat_map(|r| r.allergens.iter())
        .map(|a| fold(a))
        .filter(|a| !a.is_empty())
        .collect();

    let matched = required.iter().filter(|req| declared.contains(req)).count();
    let pct = matched as f64 / required.len() as f64;

    CriterionScore::new(
        round_score(ALLERGEN_MAX as f64 * pct),
        ALLERGEN_MAX,
        format!("Matched {matched} of {} allergen requirements", required.len()),
    )
}

/// Additional-requirements criterion (max 5): free-text keyword categories
/// matched against the candidate's descriptive text.
pub async fn score_additional(
    requirements: &ProjectRequirements,
    profile: &ManufacturerProfile,
    catalog: &dyn ProductCatalog,
) -> CriterionScore {
    let requirement_text = match requirements.additional_requirements.as_deref().map(fold) {
        Some(t) if !t.is_empty() => t,
        _ => return CriterionScore::new(3, ADDITIONAL_MAX, "No additional requirements"),
    };

    let candidate_text = fold(&format!(
        "{} {} {}",
        profile.description.as_deref().unwrap_or(""),
        profile.company_description.as_deref().unwrap_or(""),
        profile.industry.as_deref().unwrap_or(""),
    ));

    let matched: Vec<&str> = REQUIREMENT_KEYWORDS
        .iter()
        .filter(|(_, keywords)| {
            keywords.iter().any(|k| requirement_text.contains(k))
                && keywords.iter().any(|k| candidate_text.contains(k))
        })
        .map(|(category, _)| *category)
        .collect();

    if !matched.is_empty() {
        return CriterionScore::new(
            (matched.len() as u32).min(ADDITIONAL_MAX),
            ADDITIONAL_MAX,
            format!("Aligned on {}", matched.join(", ")),
        );
    }

    // No keyword overlap: fall back on whether the candidate has any
    // catalog presence at all.
    match catalog
        .find_for_manufacturer(&profile.id, &profile.company_name)
        .await
    {
        Ok(rows) if !rows.is_empty() => {
            CriterionScore::new(2, ADDITIONAL_MAX, "No keyword alignment; catalog present")
        }
        Ok(_) => CriterionScore::new(1, ADDITIONAL_MAX, "No keyword alignment"),
        Err(e) => {
            tracing::warn!(
                "Catalog probe failed for {} during additional-requirements scoring: {}",
                profile.id,
                e
            );
            CriterionScore::new(2, ADDITIONAL_MAX, "No keyword alignment; catalog present")
        }
    }
}
