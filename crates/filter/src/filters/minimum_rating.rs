//! Filter to ensure a minimum personal rating.

use crate::traits::Filter;
use catalog::Scene;

/// Keeps scenes whose rating is at least `min_rating` (inclusive).
pub struct MinimumRatingFilter {
    min_rating: f32,
}

impl MinimumRatingFilter {
    /// `min_rating` is expected to be validated already (finite, in [0, 5]).
    pub fn new(min_rating: f32) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn matches(&self, scene: &Scene) -> bool {
        scene.rating >= self.min_rating
    }
}
