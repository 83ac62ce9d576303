// Criterion benchmarks for the FoodBridge match engine

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use foodbridge_match::core::{score_candidate, MatchEngine, MemoryCatalog};
use foodbridge_match::models::{
    CategoryKind, Certificates, ManufacturerProfile, ManufacturerSettings, ProductRecord,
    ProjectRequirements, SelectedProduct,
};
use foodbridge_match::parse_volume;
use std::sync::Arc;

fn create_candidate(id: usize) -> ManufacturerProfile {
    ManufacturerProfile {
        id: format!("m{id}"),
        name: format!("Owner {id}"),
        company_name: format!("Company {id}"),
        email: format!("m{id}@example.com"),
        address: Some(
            if id % 3 == 0 { "Osaka, Japan" } else { "Hamburg, Germany" }.to_string(),
        ),
        industry: Some(
            if id % 2 == 0 { "Sauce manufacturing" } else { "Snack production" }.to_string(),
        ),
        certificates: Some(Certificates::Many(vec![
            "ISO 9001".to_string(),
            "HACCP".to_string(),
        ])),
        manufacturer_settings: Some(ManufacturerSettings {
            certifications: vec![],
            preferred_categories: vec!["sauce".to_string()],
            production_capacity: Some(50_000.0 + (id as f64 * 1_000.0)),
        }),
        description: Some("Flexible private label production".to_string()),
        company_description: None,
        status: Some("active".to_string()),
    }
}

fn create_catalog(candidate_count: usize) -> MemoryCatalog {
    let rows = (0..candidate_count)
        .map(|id| ProductRecord {
            category: Some(if id % 2 == 0 { "soy sauce" } else { "snack" }.to_string()),
            packaging_type: Some(if id % 2 == 0 { "Glass Bottle" } else { "Pouch" }.to_string()),
            allergens: vec!["soy".to_string()],
            owner_id: Some(format!("m{id}")),
            ..Default::default()
        })
        .collect();
    MemoryCatalog::new(rows)
}

fn create_requirements() -> ProjectRequirements {
    ProjectRequirements {
        locations: vec!["Japan".to_string()],
        certifications: vec!["ISO 9001".to_string(), "Organic".to_string()],
        selected_product: Some(SelectedProduct {
            name: "Soy Sauce".to_string(),
            category_kind: CategoryKind::Product,
        }),
        volume: Some("50k-100k".to_string()),
        packaging: vec!["bottle".to_string()],
        allergen_requirements: vec!["Peanut Free".to_string()],
        additional_requirements: Some("sustainable custom production".to_string()),
    }
}

fn bench_volume_parsing(c: &mut Criterion) {
    c.bench_function("parse_volume", |b| {
        b.iter(|| {
            parse_volume(black_box("50k-100k"));
            parse_volume(black_box("500+"));
            parse_volume(black_box("about 200 units"));
        });
    });
}

fn bench_single_candidate(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let requirements = create_requirements();
    let candidate = create_candidate(0);
    let catalog = create_catalog(1);

    c.bench_function("score_candidate", |b| {
        b.iter(|| {
            rt.block_on(score_candidate(
                black_box(&requirements),
                black_box(&candidate),
                black_box(&catalog),
            ))
        });
    });
}

fn bench_ranking(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let requirements = create_requirements();

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let engine = MatchEngine::new(Arc::new(create_catalog(*candidate_count)));
        let candidates: Vec<ManufacturerProfile> =
            (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("rank_manufacturers", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    rt.block_on(engine.rank_manufacturers(
                        black_box(&requirements),
                        black_box(candidates.clone()),
                    ))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_volume_parsing, bench_single_candidate, bench_ranking);

criterion_main!(benches);
