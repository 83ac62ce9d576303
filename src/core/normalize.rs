use crate::models::{Certificates, ManufacturerProfile};
use regex::Regex;
use std::sync::OnceLock;

/// Lowercase and trim a piece of free text.
#[inline]
pub fn fold(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Bidirectional containment: either string contains the other,
/// case-insensitively. Empty strings never match.
#[inline]
pub fn bidi_contains(a: &str, b: &str) -> bool {
    if a.trim().is_empty() || b.trim().is_empty() {
        return false;
    }
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

/// Merge a manufacturer's profile certificates (legacy scalar or list) with
/// the certifications declared in settings into one folded, de-duplicated set.
pub fn merged_certifications(profile: &ManufacturerProfile) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();

    let mut push = |raw: &str| {
        let folded = fold(raw);
        if !folded.is_empty() && !merged.contains(&folded) {
            merged.push(folded);
        }
    };

    match &profile.certificates {
        Some(Certificates::One(single)) => push(single),
        Some(Certificates::Many(many)) => many.iter().for_each(|c| push(c)),
        None => {}
    }

    if let Some(settings) = &profile.manufacturer_settings {
        settings.certifications.iter().for_each(|c| push(c));
    }

    merged
}

/// Normalize an allergen requirement token: fold, then strip a trailing
/// " free" or "-free" suffix ("Peanut Free" -> "peanut").
pub fn normalize_allergen(token: &str) -> String {
    let folded = fold(token);
    folded
        .strip_suffix(" free")
        .or_else(|| folded.strip_suffix("-free"))
        .map(|s| s.trim_end().to_string())
        .unwrap_or(folded)
}

fn volume_k_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*k(?:\s*-\s*(\d+(?:\.\d+)?)\s*k)?")
            .expect("invalid volume range pattern")
    })
}

fn volume_min_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(k)?\s*\+").expect("invalid volume minimum pattern")
    })
}

fn volume_int_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("invalid volume integer pattern"))
}

/// Parse a free-text volume descriptor into a unit count.
///
/// Patterns are tried in order: "<N>k-<M>k" / "<N>k" (upper bound of a
/// range, x1000), "<N>+" / "<N>k+" (minimum), then the first bare integer.
/// Unparseable text yields 0.
pub fn parse_volume(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    if let Some(caps) = volume_k_re().captures(text) {
        let bound = caps
            .get(2)
            .or_else(|| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok());
        if let Some(n) = bound {
            return n * 1000.0;
        }
    }

    if let Some(caps) = volume_min_re().captures(text) {
        if let Some(n) = caps.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) {
            let multiplier = if caps.get(2).is_some() { 1000.0 } else { 1.0 };
            return n * multiplier;
        }
    }

    if let Some(m) = volume_int_re().find(text) {
        if let Ok(n) = m.as_str().parse::<f64>() {
            return n;
        }
    }

    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ManufacturerSettings;

    fn profile_with_certs(certificates: Option<Certificates>) -> ManufacturerProfile {
        ManufacturerProfile {
            id: "m1".to_string(),
            name: "Test".to_string(),
            company_name: "Test Foods".to_string(),
            email: "test@example.com".to_string(),
            address: None,
            industry: None,
            certificates,
            manufacturer_settings: None,
            description: None,
            company_description: None,
            status: Some("active".to_string()),
        }
    }

    #[test]
    fn test_bidi_contains() {
        assert!(bidi_contains("Soy Sauce", "sauce"));
        assert!(bidi_contains("sauce", "Soy Sauce"));
        assert!(!bidi_contains("sauce", "miso"));
        assert!(!bidi_contains("", "sauce"));
        assert!(!bidi_contains("sauce", "  "));
    }

    #[test]
    fn test_merged_certifications_scalar_shape() {
        let profile = profile_with_certs(Some(Certificates::One("ISO 9001".to_string())));
        assert_eq!(merged_certifications(&profile), vec!["iso 9001"]);
    }

    #[test]
    fn test_merged_certifications_list_and_settings() {
        let mut profile = profile_with_certs(Some(Certificates::Many(vec![
            "ISO 9001".to_string(),
            "  ".to_string(),
            "Organic".to_string(),
        ])));
        profile.manufacturer_settings = Some(ManufacturerSettings {
            certifications: vec!["organic".to_string(), "HACCP".to_string()],
            preferred_categories: vec![],
            production_capacity: None,
        });

        let merged = merged_certifications(&profile);
        assert_eq!(merged, vec!["iso 9001", "organic", "haccp"]);
    }

    #[test]
    fn test_normalize_allergen() {
        assert_eq!(normalize_allergen("Peanut Free"), "peanut");
        assert_eq!(normalize_allergen("gluten-free"), "gluten");
        assert_eq!(normalize_allergen("  Soy "), "soy");
    }

    #[test]
    fn test_parse_volume_patterns() {
        assert_eq!(parse_volume("50k-100k"), 100_000.0);
        assert_eq!(parse_volume("50K"), 50_000.0);
        assert_eq!(parse_volume("500+"), 500.0);
        assert_eq!(parse_volume("20k+"), 20_000.0);
        assert_eq!(parse_volume("200"), 200.0);
        assert_eq!(parse_volume("about 200 units"), 200.0);
        assert_eq!(parse_volume("unknown"), 0.0);
        assert_eq!(parse_volume(""), 0.0);
    }
}
