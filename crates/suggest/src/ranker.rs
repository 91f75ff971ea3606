//! SuggestionRanker - "surprise me" recommendations
//!
//! ## Algorithm
//! 1. Build a FavoriteProfile from favorites and history
//! 2. Candidate pool = catalog minus favorites minus viewed scenes
//! 3. Compute three signals per candidate, each in [0, 1]:
//!    - tag overlap: share of the scene's tags found among favorite tags
//!    - actress overlap: share of the scene's cast found among favorite casts
//!    - popularity: view count relative to the most viewed candidate
//! 4. Combine them with RankingWeights
//! 5. Order by score descending; ties follow a seeded shuffle, or id
//!    ascending without a seed
//! 6. Keep the top `count` (the whole pool if it is smaller)
//!
//! Calls are stateless: the same inputs and seed always give the same list.

use crate::profile::{FavoriteProfile, build_favorite_profile};
use crate::weights::RankingWeights;
use catalog::{Scene, SceneId, ValidationError, ViewHistoryEntry};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::hash::Hash;
use tracing::{debug, instrument};

/// Score breakdown for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredScene {
    pub scene_id: SceneId,
    pub tag_overlap: f64,
    pub actress_overlap: f64,
    pub popularity: f64,
    pub score: f64,
}

impl ScoredScene {
    /// Human-readable reason, used by the CLI's `--explain`.
    pub fn explanation(&self) -> String {
        format!(
            "tags {:.0}% · cast {:.0}% · popularity {:.0}%",
            self.tag_overlap * 100.0,
            self.actress_overlap * 100.0,
            self.popularity * 100.0
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionRanker {
    weights: RankingWeights,
}

impl SuggestionRanker {
    /// Create a ranker with the default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure signal weights (default: 0.5 / 0.3 / 0.2)
    pub fn with_weights(mut self, weights: RankingWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn weights(&self) -> &RankingWeights {
        &self.weights
    }

    /// Up to `count` suggestions, best first.
    #[instrument(skip(self, catalog, favorites, history), fields(catalog_len = catalog.len()))]
    pub fn suggest(
        &self,
        catalog: &[Scene],
        favorites: &[Scene],
        history: &[ViewHistoryEntry],
        count: usize,
        seed: Option<u64>,
    ) -> Result<Vec<Scene>, ValidationError> {
        let ranked = self.rank(catalog, favorites, history, count, seed)?;
        Ok(ranked.into_iter().map(|(scene, _)| scene.clone()).collect())
    }

    /// Like `suggest`, but keeps the score breakdown next to each scene.
    pub fn suggest_explained(
        &self,
        catalog: &[Scene],
        favorites: &[Scene],
        history: &[ViewHistoryEntry],
        count: usize,
        seed: Option<u64>,
    ) -> Result<Vec<(Scene, ScoredScene)>, ValidationError> {
        let ranked = self.rank(catalog, favorites, history, count, seed)?;
        Ok(ranked
            .into_iter()
            .map(|(scene, scored)| (scene.clone(), scored))
            .collect())
    }

    fn rank<'a>(
        &self,
        catalog: &'a [Scene],
        favorites: &[Scene],
        history: &[ViewHistoryEntry],
        count: usize,
        seed: Option<u64>,
    ) -> Result<Vec<(&'a Scene, ScoredScene)>, ValidationError> {
        if count == 0 {
            return Err(ValidationError::new("count", "must be greater than zero"));
        }
        self.weights.validate()?;

        let profile = build_favorite_profile(favorites, history);

        let mut pool: Vec<&Scene> = catalog
            .iter()
            .filter(|scene| !profile.is_known(scene.id))
            .collect();
        debug!(
            "Candidate pool: {} of {} scenes ({} favorites, {} viewed)",
            pool.len(),
            catalog.len(),
            profile.favorite_ids.len(),
            profile.viewed_ids.len()
        );

        // Fixed starting order, then the seeded shuffle decides ties
        pool.sort_by_key(|scene| scene.id);
        pool.dedup_by_key(|scene| scene.id);
        if let Some(seed) = seed {
            let mut rng = StdRng::seed_from_u64(seed);
            pool.shuffle(&mut rng);
        }

        let scored = self.score_pool(&pool, &profile);
        let mut ranked: Vec<(&Scene, ScoredScene)> = pool.into_iter().zip(scored).collect();

        // Stable: equal scores keep the order established above
        ranked.sort_by(|(_, a), (_, b)| b.score.total_cmp(&a.score));
        ranked.truncate(count);

        debug!("Returning {} suggestions", ranked.len());
        Ok(ranked)
    }

    /// Score every candidate in parallel; output order matches `pool`.
    pub fn score_pool(&self, pool: &[&Scene], profile: &FavoriteProfile) -> Vec<ScoredScene> {
        let max_views = pool.iter().map(|s| s.view_count).max().unwrap_or(0);

        pool.par_iter()
            .map(|scene| self.score_single(scene, profile, max_views))
            .collect()
    }

    fn score_single(&self, scene: &Scene, profile: &FavoriteProfile, max_views: u32) -> ScoredScene {
        let tag_overlap = overlap(scene.tags.iter().map(String::as_str), |tag| {
            profile.tags.contains(*tag)
        });
        let actress_overlap = overlap(scene.actress_ids.iter().copied(), |id| {
            profile.actress_ids.contains(id)
        });
        let popularity = if max_views == 0 {
            0.0
        } else {
            scene.view_count as f64 / max_views as f64
        };

        ScoredScene {
            scene_id: scene.id,
            tag_overlap,
            actress_overlap,
            popularity,
            score: self.weights.combine(tag_overlap, actress_overlap, popularity),
        }
    }
}

/// Fraction of distinct `items` accepted by `known`, or 0 when there are none.
///
/// Normalized by the scene side only, so the score does not shrink as the
/// favorite profile grows.
fn overlap<T: Eq + Hash>(items: impl Iterator<Item = T>, known: impl Fn(&T) -> bool) -> f64 {
    let distinct: HashSet<T> = items.collect();
    if distinct.is_empty() {
        return 0.0;
    }
    let shared = distinct.iter().filter(|item| known(item)).count();
    shared as f64 / distinct.len() as f64
}

/// Convenience wrapper using the default weights.
pub fn suggest(
    catalog: &[Scene],
    favorites: &[Scene],
    history: &[ViewHistoryEntry],
    count: usize,
    seed: Option<u64>,
) -> Result<Vec<Scene>, ValidationError> {
    SuggestionRanker::new().suggest(catalog, favorites, history, count, seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn scene(id: SceneId, tags: &[&str], actress_ids: Vec<u32>, view_count: u32) -> Scene {
        Scene {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            actress_ids,
            view_count,
            ..Scene::new(id, format!("Scene {}", id), NaiveDate::from_ymd_opt(2022, 1, 1).unwrap())
        }
    }

    fn viewed(scene_id: SceneId) -> ViewHistoryEntry {
        ViewHistoryEntry::new(scene_id, Utc.with_ymd_and_hms(2024, 2, 2, 20, 0, 0).unwrap())
    }

    fn ids(scenes: &[Scene]) -> Vec<SceneId> {
        scenes.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_overlap_is_share_of_scene_side() {
        let known: HashSet<u32> = [1, 2, 3, 9].into_iter().collect();
        assert_eq!(overlap([2u32, 4].into_iter(), |x| known.contains(x)), 0.5);
        assert_eq!(overlap([2u32, 2, 3].into_iter(), |x| known.contains(x)), 1.0);
        assert_eq!(overlap(std::iter::empty::<u32>(), |x| known.contains(x)), 0.0);
    }

    #[test]
    fn test_covered_tags_beat_popularity_with_many_favorites() {
        // Twenty distinct favorite tags; the candidate carries two of them
        let favorites: Vec<Scene> = (0..10)
            .map(|i| {
                let a = format!("t{}", 2 * i);
                let b = format!("t{}", 2 * i + 1);
                scene(100 + i, &[a.as_str(), b.as_str()], vec![], 0)
            })
            .collect();
        let catalog = vec![scene(1, &[], vec![], 40), scene(2, &["t0", "t7"], vec![], 0)];

        let explained = SuggestionRanker::new()
            .suggest_explained(&catalog, &favorites, &[], 2, None)
            .unwrap();

        assert_eq!(explained[0].0.id, 2);
        assert_eq!(explained[0].1.tag_overlap, 1.0);
        assert!(explained[0].1.score > explained[1].1.score);
    }

    #[test]
    fn test_zero_count_rejected() {
        let err = suggest(&[], &[], &[], 0, None).unwrap_err();
        assert_eq!(err.field, "count");
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let ranker = SuggestionRanker::new().with_weights(RankingWeights::new(0.0, 0.0, 0.0));
        assert!(ranker.suggest(&[], &[], &[], 3, None).is_err());
    }

    #[test]
    fn test_excludes_favorites_and_history() {
        let catalog: Vec<Scene> = (1..=6).map(|id| scene(id, &[], vec![], 0)).collect();
        let favorites = vec![catalog[0].clone(), catalog[3].clone()];
        let history = vec![viewed(2), viewed(6)];

        let result = suggest(&catalog, &favorites, &history, 10, None).unwrap();
        assert_eq!(ids(&result), vec![3, 5]);
    }

    #[test]
    fn test_tag_signal_outranks_actress_and_popularity() {
        let favorites = vec![scene(100, &["beach", "sunset"], vec![7], 0)];
        let catalog = vec![
            scene(1, &[], vec![], 50),                  // popularity only
            scene(2, &[], vec![7], 0),                  // cast only
            scene(3, &["beach", "sunset"], vec![], 0),  // tags only
        ];

        let result = suggest(&catalog, &favorites, &[], 3, None).unwrap();
        assert_eq!(ids(&result), vec![3, 2, 1]);
    }

    #[test]
    fn test_ties_fall_back_to_id_without_seed() {
        let catalog = vec![scene(9, &[], vec![], 0), scene(4, &[], vec![], 0), scene(6, &[], vec![], 0)];
        let result = suggest(&catalog, &[], &[], 2, None).unwrap();
        assert_eq!(ids(&result), vec![4, 6]);
    }

    #[test]
    fn test_seeded_ties_are_repeatable() {
        let catalog: Vec<Scene> = (1..=20).map(|id| scene(id, &[], vec![], 0)).collect();

        let first = suggest(&catalog, &[], &[], 5, Some(42)).unwrap();
        let second = suggest(&catalog, &[], &[], 5, Some(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_seed_does_not_override_scores() {
        let favorites = vec![scene(100, &["pool"], vec![], 0)];
        let mut catalog: Vec<Scene> = (1..=10).map(|id| scene(id, &[], vec![], 0)).collect();
        catalog.push(scene(11, &["pool"], vec![], 0));

        for seed in [1, 2, 3, 99] {
            let result = suggest(&catalog, &favorites, &[], 3, Some(seed)).unwrap();
            assert_eq!(result[0].id, 11);
        }
    }

    #[test]
    fn test_pool_smaller_than_count() {
        let catalog: Vec<Scene> = (1..=5).map(|id| scene(id, &[], vec![], id)).collect();
        let result = suggest(&catalog, &[], &[], 10, Some(7)).unwrap();
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_explained_scores_are_normalized() {
        let favorites = vec![scene(100, &["a", "b"], vec![1], 0)];
        let catalog = vec![scene(1, &["a", "b"], vec![1], 10), scene(2, &["a", "z"], vec![], 5)];

        let explained = SuggestionRanker::new()
            .suggest_explained(&catalog, &favorites, &[], 2, None)
            .unwrap();

        let (top, top_score) = &explained[0];
        assert_eq!(top.id, 1);
        assert_eq!(top_score.tag_overlap, 1.0);
        assert_eq!(top_score.actress_overlap, 1.0);
        assert_eq!(top_score.popularity, 1.0);
        assert!((top_score.score - 1.0).abs() < 1e-9);

        let (_, second) = &explained[1];
        assert_eq!(second.tag_overlap, 0.5);
        assert_eq!(second.popularity, 0.5);
        assert!(!second.explanation().is_empty());
    }
}
