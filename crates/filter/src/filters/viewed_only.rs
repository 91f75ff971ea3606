//! Filter for scenes the user has already watched.

use crate::traits::Filter;
use catalog::Scene;

/// Keeps scenes with at least one recorded view.
pub struct ViewedOnlyFilter;

impl Filter for ViewedOnlyFilter {
    fn name(&self) -> &str {
        "ViewedOnlyFilter"
    }

    fn matches(&self, scene: &Scene) -> bool {
        scene.view_count > 0
    }
}
