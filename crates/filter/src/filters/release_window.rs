//! Filter on an inclusive release-date window.

use crate::traits::Filter;
use catalog::Scene;
use chrono::NaiveDate;

/// Either bound may be open.
pub struct ReleaseWindowFilter {
    after: Option<NaiveDate>,
    before: Option<NaiveDate>,
}

impl ReleaseWindowFilter {
    /// Returns `None` when both bounds are open.
    pub fn new(after: Option<NaiveDate>, before: Option<NaiveDate>) -> Option<Self> {
        if after.is_none() && before.is_none() {
            return None;
        }
        Some(Self { after, before })
    }
}

impl Filter for ReleaseWindowFilter {
    fn name(&self) -> &str {
        "ReleaseWindowFilter"
    }

    fn matches(&self, scene: &Scene) -> bool {
        let released = scene.release_date;
        self.after.is_none_or(|after| released >= after)
            && self.before.is_none_or(|before| released <= before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let scenes = vec![
            Scene::new(1, "old", date(2019, 12, 31)),
            Scene::new(2, "start", date(2020, 1, 1)),
            Scene::new(3, "end", date(2020, 12, 31)),
            Scene::new(4, "late", date(2021, 1, 1)),
        ];

        let filter = ReleaseWindowFilter::new(Some(date(2020, 1, 1)), Some(date(2020, 12, 31)))
            .unwrap();
        let kept = filter.apply(scenes.iter().collect());
        let ids: Vec<u32> = kept.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_open_bounds() {
        assert!(ReleaseWindowFilter::new(None, None).is_none());

        let scenes = vec![
            Scene::new(1, "old", date(2010, 1, 1)),
            Scene::new(2, "new", date(2024, 1, 1)),
        ];
        let filter = ReleaseWindowFilter::new(Some(date(2020, 1, 1)), None).unwrap();
        let kept = filter.apply(scenes.iter().collect());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 2);
    }
}
