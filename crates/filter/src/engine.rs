//! FilterEngine: catalog + FilterSpec → ordered matching scenes.
//!
//! ## Algorithm
//! 1. Validate the spec (fail fast on malformed bounds)
//! 2. Unconstrained spec: hand the catalog back in input order
//! 3. Build one filter per active option and run the pipeline
//! 4. Order the survivors:
//!    - text query: match position ascending, rating descending, id ascending
//!    - otherwise: id ascending
//!
//! The catalog is only borrowed; survivors are cloned out at the end.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::*;
use crate::spec::FilterSpec;
use catalog::{Scene, ValidationError};
use std::cmp::Ordering;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, Default)]
pub struct FilterEngine;

impl FilterEngine {
    pub fn new() -> Self {
        Self
    }

    /// Filter and order `catalog` according to `spec`.
    ///
    /// An empty result is a valid outcome, not an error.
    #[instrument(skip_all, fields(catalog_len = catalog.len()))]
    pub fn filter(&self, catalog: &[Scene], spec: &FilterSpec) -> Result<Vec<Scene>, ValidationError> {
        spec.validate()?;

        if spec.is_unconstrained() {
            debug!("Unconstrained spec, returning catalog as is");
            return Ok(catalog.to_vec());
        }

        let text = spec.effective_text_query().and_then(TextQueryFilter::new);
        let pipeline = Self::build_pipeline(spec);
        let mut kept = pipeline.apply(catalog.iter().collect());

        match text {
            Some(text) => {
                let mut ranked: Vec<(usize, &Scene)> = kept
                    .into_iter()
                    .filter_map(|scene| text.match_position(scene).map(|pos| (pos, scene)))
                    .collect();
                ranked.sort_by(|(pos_a, a), (pos_b, b)| compare_relevance(*pos_a, a, *pos_b, b));
                kept = ranked.into_iter().map(|(_, scene)| scene).collect();
            }
            None => kept.sort_by_key(|scene| scene.id),
        }

        debug!("Filter kept {} of {} scenes", kept.len(), catalog.len());
        Ok(kept.into_iter().cloned().collect())
    }

    /// One filter per active, non-text option.
    ///
    /// The text query is matched while ranking, since its match position is
    /// needed there anyway.
    pub fn build_pipeline(spec: &FilterSpec) -> FilterPipeline {
        let favorites = spec.favorites_only.unwrap_or(false).then_some(FavoritesOnlyFilter);
        let viewed = spec.viewed_only.unwrap_or(false).then_some(ViewedOnlyFilter);
        let cast_size = spec.actress_count.map(ActressCountFilter::new);
        let min_rating = spec.min_rating.map(MinimumRatingFilter::new);
        let max_duration = spec
            .max_duration_minutes
            .map(|m| MaxDurationFilter::new(u32::try_from(m).unwrap_or(u32::MAX)));
        let quality = spec
            .quality
            .clone()
            .filter(|q| !q.is_empty())
            .map(QualityFilter::new);
        let tags = spec
            .tags
            .clone()
            .filter(|t| !t.is_empty())
            .map(RequiredTagsFilter::new);
        let actresses = spec
            .actress_ids
            .clone()
            .filter(|a| !a.is_empty())
            .map(ActressFilter::new);
        let window = ReleaseWindowFilter::new(spec.released_after, spec.released_before);

        // Cheap scalar checks first, set lookups after
        FilterPipeline::new()
            .add_optional(favorites)
            .add_optional(viewed)
            .add_optional(min_rating)
            .add_optional(max_duration)
            .add_optional(quality)
            .add_optional(cast_size)
            .add_optional(window)
            .add_optional(actresses)
            .add_optional(tags)
    }
}

/// Earlier match first, then higher rating, then lower id.
fn compare_relevance(pos_a: usize, a: &Scene, pos_b: usize, b: &Scene) -> Ordering {
    pos_a
        .cmp(&pos_b)
        .then_with(|| b.rating.total_cmp(&a.rating))
        .then_with(|| a.id.cmp(&b.id))
}

/// Convenience wrapper around `FilterEngine::filter`.
pub fn filter(catalog: &[Scene], spec: &FilterSpec) -> Result<Vec<Scene>, ValidationError> {
    FilterEngine::new().filter(catalog, spec)
}
