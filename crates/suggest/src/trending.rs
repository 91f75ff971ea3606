//! Catalog-wide rankings that need no user profile: trending scenes and
//! popular tags.

use catalog::badges::is_recent;
use catalog::{Scene, SceneId, ValidationError};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

const RATING_POINTS: f64 = 200.0;
const FAVORITE_BONUS: f64 = 500.0;
const VIEW_POINTS: f64 = 100.0;
const RECENT_BONUS: f64 = 300.0;

/// Trending score for a single scene.
pub fn trending_score(scene: &Scene, today: NaiveDate) -> f64 {
    let mut score = scene.rating as f64 * RATING_POINTS + scene.view_count as f64 * VIEW_POINTS;
    if scene.is_favorite {
        score += FAVORITE_BONUS;
    }
    if is_recent(scene.release_date, today) {
        score += RECENT_BONUS;
    }
    score
}

/// The `limit` highest-scoring scenes, ties broken by id ascending.
#[instrument(skip(catalog), fields(catalog_len = catalog.len()))]
pub fn trending(catalog: &[Scene], today: NaiveDate, limit: usize) -> Result<Vec<Scene>, ValidationError> {
    if limit == 0 {
        return Err(ValidationError::new("limit", "must be greater than zero"));
    }

    let mut scored: Vec<(f64, &Scene)> = catalog
        .iter()
        .map(|scene| (trending_score(scene, today), scene))
        .collect();
    scored.sort_by(|(sa, a), (sb, b)| sb.total_cmp(sa).then_with(|| a.id.cmp(&b.id)));
    scored.truncate(limit);

    debug!("Trending: {} scenes", scored.len());
    Ok(scored.into_iter().map(|(_, scene)| scene.clone()).collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
    /// Scenes carrying the tag, id ascending
    pub scene_ids: Vec<SceneId>,
}

/// Tag usage across the catalog, most used first, then by name.
pub fn popular_tags(catalog: &[Scene]) -> Vec<TagCount> {
    let mut usage: HashMap<&str, Vec<SceneId>> = HashMap::new();
    for scene in catalog {
        for tag in &scene.tags {
            usage.entry(tag.as_str()).or_default().push(scene.id);
        }
    }

    let mut counts: Vec<TagCount> = usage
        .into_iter()
        .map(|(tag, mut scene_ids)| {
            scene_ids.sort_unstable();
            scene_ids.dedup();
            TagCount {
                tag: tag.to_string(),
                count: scene_ids.len(),
                scene_ids,
            }
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scene(id: SceneId, rating: f32, views: u32, favorite: bool, released: NaiveDate) -> Scene {
        Scene {
            rating,
            view_count: views,
            is_favorite: favorite,
            ..Scene::new(id, format!("Scene {}", id), released)
        }
    }

    #[test]
    fn test_trending_score_components() {
        let today = date(2024, 6, 30);
        let old = date(2020, 1, 1);

        assert_eq!(trending_score(&scene(1, 4.0, 0, false, old), today), 800.0);
        assert_eq!(trending_score(&scene(2, 0.0, 3, false, old), today), 300.0);
        assert_eq!(trending_score(&scene(3, 0.0, 0, true, old), today), 500.0);
        assert_eq!(trending_score(&scene(4, 0.0, 0, false, date(2024, 6, 20)), today), 300.0);
    }

    #[test]
    fn test_trending_order_and_limit() {
        let today = date(2024, 6, 30);
        let old = date(2020, 1, 1);
        let catalog = vec![
            scene(1, 5.0, 0, false, old),  // 1000
            scene(2, 1.0, 0, true, old),   // 700
            scene(3, 0.0, 10, false, old), // 1000
            scene(4, 0.0, 0, false, old),  // 0
        ];

        let result = trending(&catalog, today, 3).unwrap();
        let ids: Vec<SceneId> = result.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
    }

    #[test]
    fn test_trending_zero_limit_rejected() {
        let err = trending(&[], date(2024, 1, 1), 0).unwrap_err();
        assert_eq!(err.field, "limit");
    }

    #[test]
    fn test_popular_tags() {
        let released = date(2022, 1, 1);
        let tagged = |id, tags: &[&str]| Scene {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Scene::new(id, "t", released)
        };
        let catalog = vec![
            tagged(1, &["beach", "sunset"]),
            tagged(2, &["beach", "night"]),
            tagged(3, &["night", "city"]),
        ];

        let tags = popular_tags(&catalog);
        let names: Vec<(&str, usize)> = tags.iter().map(|t| (t.tag.as_str(), t.count)).collect();
        assert_eq!(
            names,
            vec![("beach", 2), ("night", 2), ("city", 1), ("sunset", 1)]
        );
        assert_eq!(tags[1].scene_ids, vec![2, 3]);
    }
}
