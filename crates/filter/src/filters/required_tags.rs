//! Filter requiring every listed tag.

use crate::traits::Filter;
use catalog::Scene;
use std::collections::BTreeSet;

/// Keeps scenes whose tag set is a superset of `required`.
///
/// Tag names are compared exactly, as the catalog stores them.
pub struct RequiredTagsFilter {
    required: BTreeSet<String>,
}

impl RequiredTagsFilter {
    pub fn new(required: BTreeSet<String>) -> Self {
        Self { required }
    }
}

impl Filter for RequiredTagsFilter {
    fn name(&self) -> &str {
        "RequiredTagsFilter"
    }

    fn matches(&self, scene: &Scene) -> bool {
        self.required.is_subset(&scene.tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn scene(id: u32, tags: &[&str]) -> Scene {
        Scene {
            tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Scene::new(id, "s", NaiveDate::from_ymd_opt(2022, 1, 1).unwrap())
        }
    }

    #[test]
    fn test_all_tags_required() {
        let scenes = vec![
            scene(1, &["beach", "sunset"]),
            scene(2, &["beach"]),
            scene(3, &["sunset", "beach", "outdoor"]),
        ];

        let required = ["beach", "sunset"].iter().map(|t| t.to_string()).collect();
        let kept = RequiredTagsFilter::new(required).apply(scenes.iter().collect());
        let ids: Vec<u32> = kept.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
