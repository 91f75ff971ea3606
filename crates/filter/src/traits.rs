//! Core traits for the scene filtering pipeline.
//!
//! Each active option of a `FilterSpec` becomes one `Filter`; the pipeline
//! chains them, which gives the logical AND of every predicate.

use catalog::Scene;

/// A single scene predicate.
///
/// ## Design Note
/// - `Send + Sync` so one pipeline can be shared by concurrent callers
/// - Filters borrow scenes; records are never mutated or cloned here
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether `scene` satisfies this predicate.
    fn matches(&self, scene: &Scene) -> bool;

    /// Keep the scenes satisfying this predicate, preserving their order.
    fn apply<'a>(&self, scenes: Vec<&'a Scene>) -> Vec<&'a Scene> {
        scenes
            .into_iter()
            .filter(|scene| self.matches(scene))
            .collect()
    }
}
