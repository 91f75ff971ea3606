//! Benchmarks for suggestion ranking
//!
//! Run with: cargo bench --package suggest
//!
//! Uses a synthetic catalog so the benchmark needs no snapshot on disk.

use catalog::{Scene, ViewHistoryEntry};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use suggest::{SuggestionRanker, popular_tags, trending};

const TAGS: [&str; 12] = [
    "beach", "sunset", "night", "city", "pool", "garden", "outdoor", "studio", "summer", "winter",
    "vintage", "pov",
];

fn synthetic_catalog(size: u32) -> Vec<Scene> {
    let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    (1..=size)
        .map(|id| Scene {
            tags: (0..3)
                .map(|k| TAGS[((id * 7 + k * 5) as usize) % TAGS.len()].to_string())
                .collect(),
            actress_ids: vec![id % 97, id % 89],
            view_count: id % 13,
            rating: (id % 6) as f32,
            is_favorite: id % 50 == 0,
            duration_minutes: 10 + id % 60,
            ..Scene::new(id, format!("Scene {}", id), base + Duration::days((id % 1500) as i64))
        })
        .collect()
}

fn synthetic_history(catalog: &[Scene]) -> Vec<ViewHistoryEntry> {
    let at = Utc.with_ymd_and_hms(2024, 3, 1, 21, 0, 0).unwrap();
    catalog
        .iter()
        .step_by(40)
        .take(50)
        .map(|scene| ViewHistoryEntry::new(scene.id, at))
        .collect()
}

fn bench_suggest(c: &mut Criterion) {
    let catalog = synthetic_catalog(10_000);
    let favorites: Vec<Scene> = catalog.iter().filter(|s| s.is_favorite).cloned().collect();
    let history = synthetic_history(&catalog);
    let ranker = SuggestionRanker::new();

    c.bench_function("suggest_10k", |b| {
        b.iter(|| {
            let picks = ranker
                .suggest(
                    black_box(&catalog),
                    black_box(&favorites),
                    black_box(&history),
                    black_box(20),
                    Some(42),
                )
                .unwrap();
            black_box(picks)
        })
    });
}

fn bench_trending(c: &mut Criterion) {
    let catalog = synthetic_catalog(10_000);
    let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

    c.bench_function("trending_10k", |b| {
        b.iter(|| black_box(trending(black_box(&catalog), today, 10).unwrap()))
    });
}

fn bench_popular_tags(c: &mut Criterion) {
    let catalog = synthetic_catalog(10_000);

    c.bench_function("popular_tags_10k", |b| {
        b.iter(|| black_box(popular_tags(black_box(&catalog))))
    });
}

criterion_group!(benches, bench_suggest, bench_trending, bench_popular_tags);
criterion_main!(benches);
