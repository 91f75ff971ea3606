//! Filter on an upper duration bound.

use crate::traits::Filter;
use catalog::Scene;

/// Keeps scenes no longer than `max_minutes` (inclusive).
pub struct MaxDurationFilter {
    max_minutes: u32,
}

impl MaxDurationFilter {
    pub fn new(max_minutes: u32) -> Self {
        Self { max_minutes }
    }
}

impl Filter for MaxDurationFilter {
    fn name(&self) -> &str {
        "MaxDurationFilter"
    }

    fn matches(&self, scene: &Scene) -> bool {
        scene.duration_minutes <= self.max_minutes
    }
}
