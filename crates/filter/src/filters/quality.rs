//! Filter on an allowed set of quality tiers.

use crate::traits::Filter;
use catalog::{Quality, Scene};
use std::collections::BTreeSet;

pub struct QualityFilter {
    allowed: BTreeSet<Quality>,
}

impl QualityFilter {
    pub fn new(allowed: BTreeSet<Quality>) -> Self {
        Self { allowed }
    }
}

impl Filter for QualityFilter {
    fn name(&self) -> &str {
        "QualityFilter"
    }

    fn matches(&self, scene: &Scene) -> bool {
        self.allowed.contains(&scene.quality)
    }
}
