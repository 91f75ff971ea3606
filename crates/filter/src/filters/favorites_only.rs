//! Keep only scenes flagged as favorite.

use crate::traits::Filter;
use catalog::Scene;

pub struct FavoritesOnlyFilter;

impl Filter for FavoritesOnlyFilter {
    fn name(&self) -> &str {
        "FavoritesOnlyFilter"
    }

    fn matches(&self, scene: &Scene) -> bool {
        scene.is_favorite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_favorites_only_filter() {
        let day = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
        let scenes = vec![
            Scene { is_favorite: true, ..Scene::new(1, "a", day) },
            Scene::new(2, "b", day),
        ];

        let kept = FavoritesOnlyFilter.apply(scenes.iter().collect());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }
}
