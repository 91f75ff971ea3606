//! Filter scenes featuring at least one of a set of actresses.

use crate::traits::Filter;
use catalog::{ActressId, Scene};
use std::collections::BTreeSet;

pub struct ActressFilter {
    any_of: BTreeSet<ActressId>,
}

impl ActressFilter {
    pub fn new(any_of: BTreeSet<ActressId>) -> Self {
        Self { any_of }
    }
}

impl Filter for ActressFilter {
    fn name(&self) -> &str {
        "ActressFilter"
    }

    fn matches(&self, scene: &Scene) -> bool {
        scene.actress_ids.iter().any(|id| self.any_of.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn scene(id: u32, actress_ids: Vec<ActressId>) -> Scene {
        Scene {
            actress_ids,
            ..Scene::new(id, "s", NaiveDate::from_ymd_opt(2022, 1, 1).unwrap())
        }
    }

    #[test]
    fn test_any_listed_actress_matches() {
        let scenes = vec![scene(1, vec![4]), scene(2, vec![5, 9]), scene(3, vec![])];

        let kept = ActressFilter::new([9, 4].into_iter().collect()).apply(scenes.iter().collect());
        let ids: Vec<u32> = kept.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
