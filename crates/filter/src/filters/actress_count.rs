//! Filter on cast size.

use crate::traits::Filter;
use catalog::Scene;
use serde::{Deserialize, Serialize};

/// How many actresses a scene must credit.
///
/// JSON form: `{"exactly": 2}` or `{"atLeast": 4}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActressCount {
    Exactly(usize),
    AtLeast(usize),
}

impl ActressCount {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            ActressCount::Exactly(n) => count == n,
            ActressCount::AtLeast(n) => count >= n,
        }
    }
}

pub struct ActressCountFilter {
    rule: ActressCount,
}

impl ActressCountFilter {
    pub fn new(rule: ActressCount) -> Self {
        Self { rule }
    }
}

impl Filter for ActressCountFilter {
    fn name(&self) -> &str {
        "ActressCountFilter"
    }

    fn matches(&self, scene: &Scene) -> bool {
        self.rule.accepts(scene.actress_ids.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn scene(id: u32, cast: usize) -> Scene {
        Scene {
            actress_ids: (1..=cast as u32).collect(),
            ..Scene::new(id, "s", NaiveDate::from_ymd_opt(2022, 1, 1).unwrap())
        }
    }

    fn kept_ids(rule: ActressCount, scenes: &[Scene]) -> Vec<u32> {
        ActressCountFilter::new(rule)
            .apply(scenes.iter().collect())
            .iter()
            .map(|s| s.id)
            .collect()
    }

    #[test]
    fn test_exact_and_minimum_counts() {
        let scenes = vec![scene(1, 0), scene(2, 1), scene(3, 2), scene(4, 4), scene(5, 6)];

        assert_eq!(kept_ids(ActressCount::Exactly(2), &scenes), vec![3]);
        assert_eq!(kept_ids(ActressCount::Exactly(0), &scenes), vec![1]);
        assert_eq!(kept_ids(ActressCount::AtLeast(4), &scenes), vec![4, 5]);
    }

    #[test]
    fn test_json_form() {
        let rule: ActressCount = serde_json::from_str(r#"{"atLeast": 4}"#).unwrap();
        assert_eq!(rule, ActressCount::AtLeast(4));
        let rule: ActressCount = serde_json::from_str(r#"{"exactly": 1}"#).unwrap();
        assert_eq!(rule, ActressCount::Exactly(1));
    }
}
