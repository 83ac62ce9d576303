//! Static lookup tables used by the scorers.
//!
//! All tables are immutable process constants; the strings are stored
//! lowercase so scorers can compare against folded input directly.

/// Region name -> countries commonly appearing in manufacturer addresses.
pub const REGION_COUNTRIES: &[(&str, &[&str])] = &[
    (
        "asia",
        &[
            "china",
            "japan",
            "india",
            "vietnam",
            "thailand",
            "indonesia",
            "malaysia",
            "south korea",
            "philippines",
        ],
    ),
    (
        "europe",
        &[
            "germany",
            "france",
            "italy",
            "spain",
            "netherlands",
            "poland",
            "united kingdom",
            "belgium",
        ],
    ),
    (
        "north america",
        &["united states", "usa", "canada", "mexico"],
    ),
    (
        "south america",
        &["brazil", "argentina", "chile", "colombia", "peru"],
    ),
    (
        "africa",
        &["south africa", "egypt", "nigeria", "kenya", "morocco"],
    ),
    ("oceania", &["australia", "new zealand", "fiji"]),
];

/// Food category -> related keywords, used to decide whether a product name
/// and a manufacturer's industry text resolve to the same category.
pub const FOOD_CATEGORIES: &[(&str, &[&str])] = &[
    ("sauce", &["condiment", "dressing", "marinade"]),
    ("beverage", &["drink", "juice", "tea", "coffee"]),
    ("snack", &["chips", "crisps", "crackers", "nuts"]),
    ("dairy", &["milk", "cheese", "yogurt", "butter"]),
    ("bakery", &["bread", "pastry", "cake", "biscuit"]),
    ("confectionery", &["candy", "chocolate", "sweets"]),
    ("seasoning", &["spice", "herb", "rub"]),
    ("frozen", &["ice cream", "frozen meal"]),
    ("canned", &["tinned", "preserved"]),
    ("oil", &["cooking oil", "olive", "fats"]),
    ("grain", &["rice", "pasta", "noodle", "flour", "cereal"]),
];

/// Synonym groups used to verify a requested product against catalog
/// category/foodType tokens.
pub const CATALOG_SYNONYMS: &[(&str, &[&str])] = &[
    ("soy sauce", &["soy sauce", "soysauce"]),
    ("sauce", &["sauce", "dressing", "marinade", "condiment"]),
    ("miso", &["miso"]),
    ("seasoning", &["seasoning", "spice", "mix"]),
    ("noodle", &["noodle", "ramen", "pasta"]),
    ("tea", &["tea", "matcha"]),
];

/// Category -> keywords for the preferred-category bonus.
pub const PREFERRED_CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    ("sauce", &["sauce", "condiment", "dressing", "marinade"]),
    ("beverage", &["beverage", "drink", "juice"]),
    ("snack", &["snack", "chips", "crackers"]),
    ("dairy", &["dairy", "milk", "cheese", "yogurt"]),
    ("bakery", &["bakery", "bread", "pastry"]),
    ("confectionery", &["confectionery", "chocolate", "candy"]),
    ("seasoning", &["seasoning", "spice", "herb"]),
    ("frozen", &["frozen", "ice cream"]),
    ("organic", &["organic", "natural"]),
    ("health", &["health", "wellness", "protein"]),
];

/// Canonical packaging buckets and the raw strings that map onto them.
pub const PACKAGING_BUCKETS: &[(&str, &[&str])] = &[
    ("bottle", &["bottle", "flask"]),
    ("can", &["can", "tin"]),
    ("jar", &["jar", "glass jar"]),
    ("bag", &["bag", "sack"]),
    ("pouch", &["pouch", "doypack"]),
    ("box", &["box", "carton"]),
    ("sachet", &["sachet", "stick pack"]),
    ("tray", &["tray"]),
    ("tub", &["tub", "cup"]),
];

/// Keyword groups for the free-text additional-requirements criterion.
/// Entries are stems; matching is by substring.
pub const REQUIREMENT_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "sustainability",
        &["sustainab", "eco-friendly", "recycl", "environment", "carbon", "green"],
    ),
    (
        "quality",
        &["quality", "iso", "haccp", "certifi", "standard", "inspection"],
    ),
    (
        "customization",
        &["custom", "bespoke", "tailor", "private label", "flexib"],
    ),
    (
        "technology",
        &["technolog", "automat", "innovat", "digital", "modern"],
    ),
    (
        "delivery",
        &["delivery", "logistic", "shipping", "lead time", "export", "distribution"],
    ),
    (
        "materials",
        &["ingredient", "raw material", "organic", "natural", "sourc"],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_lowercase() {
        for (region, countries) in REGION_COUNTRIES {
            assert_eq!(*region, region.to_lowercase());
            for c in *countries {
                assert_eq!(*c, c.to_lowercase());
            }
        }
        for (bucket, synonyms) in PACKAGING_BUCKETS {
            assert_eq!(*bucket, bucket.to_lowercase());
            for s in *synonyms {
                assert_eq!(*s, s.to_lowercase());
            }
        }
    }

    #[test]
    fn test_table_sizes() {
        assert_eq!(REGION_COUNTRIES.len(), 6);
        assert_eq!(FOOD_CATEGORIES.len(), 11);
        assert_eq!(PREFERRED_CATEGORY_KEYWORDS.len(), 10);
        assert_eq!(PACKAGING_BUCKETS.len(), 9);
        assert_eq!(REQUIREMENT_KEYWORDS.len(), 6);
    }
}
