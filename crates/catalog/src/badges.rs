//! Derived labels shown on scene cards.
//!
//! Two families:
//! - favorite/history badges, driven by the favorite flag and view count
//!   (at most one favorite-side badge and one view-side badge);
//! - info badges, driven by rating, quality, duration, release date and
//!   cast size.
//!
//! Both lists come back sorted by priority (lower first).

use crate::types::Scene;
use chrono::NaiveDate;
use serde::Serialize;

/// Scenes released within this many days of "today" are flagged as new.
pub const RECENT_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeKind {
    Legend,
    SuperHit,
    Favorite,
    Obsession,
    Popular,
    Revisited,
    Viewed,
    HighRated,
    HighQuality,
    LongDuration,
    Recent,
    MultiActress,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub kind: BadgeKind,
    pub label: String,
    pub priority: u8,
}

impl Badge {
    fn new(kind: BadgeKind, label: impl Into<String>, priority: u8) -> Self {
        Self {
            kind,
            label: label.into(),
            priority,
        }
    }
}

/// Favorite/history badges for a scene.
///
/// The favorite chain and the view chain are independent. Heavy-view badges
/// are reserved for non-favorites, but a single view is flagged either way.
pub fn scene_fav_history_badges(scene: &Scene) -> Vec<Badge> {
    let views = scene.view_count;
    let mut badges = Vec::new();

    if scene.is_favorite {
        if views >= 10 {
            badges.push(Badge::new(BadgeKind::Legend, format!("LEGEND {}x", views), 1));
        } else if views >= 5 {
            badges.push(Badge::new(BadgeKind::SuperHit, format!("HIT {}x", views), 2));
        } else if views > 1 {
            badges.push(Badge::new(BadgeKind::Favorite, format!("FAV {}x", views), 3));
        } else {
            badges.push(Badge::new(BadgeKind::Favorite, "FAV", 3));
        }
    }

    if !scene.is_favorite && views >= 7 {
        badges.push(Badge::new(BadgeKind::Obsession, format!("OBSESSION {}x", views), 4));
    } else if !scene.is_favorite && views >= 4 {
        badges.push(Badge::new(BadgeKind::Popular, format!("POPULAR {}x", views), 5));
    } else if !scene.is_favorite && views >= 2 {
        badges.push(Badge::new(BadgeKind::Revisited, format!("REVISITED {}x", views), 6));
    } else if views == 1 {
        badges.push(Badge::new(BadgeKind::Viewed, "VIEWED", 7));
    }

    badges.sort_by_key(|b| b.priority);
    badges
}

/// Info badges for a scene; `today` anchors the "recent" window.
pub fn scene_info_badges(scene: &Scene, today: NaiveDate) -> Vec<Badge> {
    let mut badges = Vec::new();

    if scene.rating >= 4.5 {
        badges.push(Badge::new(BadgeKind::HighRated, format!("{:.1}", scene.rating), 1));
    }

    if scene.quality.is_premium() {
        badges.push(Badge::new(BadgeKind::HighQuality, scene.quality.label(), 2));
    }

    if scene.duration_minutes >= 45 {
        badges.push(Badge::new(
            BadgeKind::LongDuration,
            format!("{}min", scene.duration_minutes),
            3,
        ));
    }

    if is_recent(scene.release_date, today) {
        badges.push(Badge::new(BadgeKind::Recent, "NEW", 4));
    }

    if scene.actress_ids.len() > 1 {
        badges.push(Badge::new(
            BadgeKind::MultiActress,
            format!("{} actresses", scene.actress_ids.len()),
            5,
        ));
    }

    badges.sort_by_key(|b| b.priority);
    badges
}

/// Released no earlier than `RECENT_WINDOW_DAYS` before `today` (future dates
/// count as recent).
pub fn is_recent(release_date: NaiveDate, today: NaiveDate) -> bool {
    (today - release_date).num_days() < RECENT_WINDOW_DAYS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Quality;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scene(is_favorite: bool, view_count: u32) -> Scene {
        Scene {
            is_favorite,
            view_count,
            ..Scene::new(1, "Card", date(2020, 1, 1))
        }
    }

    fn kinds(badges: &[Badge]) -> Vec<BadgeKind> {
        badges.iter().map(|b| b.kind).collect()
    }

    #[test]
    fn test_favorite_thresholds() {
        assert_eq!(kinds(&scene_fav_history_badges(&scene(true, 12))), vec![BadgeKind::Legend]);
        assert_eq!(kinds(&scene_fav_history_badges(&scene(true, 5))), vec![BadgeKind::SuperHit]);

        let fav = scene_fav_history_badges(&scene(true, 0));
        assert_eq!(fav[0].label, "FAV");
        let fav = scene_fav_history_badges(&scene(true, 3));
        assert_eq!(fav[0].label, "FAV 3x");
    }

    #[test]
    fn test_view_thresholds_without_favorite() {
        assert_eq!(kinds(&scene_fav_history_badges(&scene(false, 9))), vec![BadgeKind::Obsession]);
        assert_eq!(kinds(&scene_fav_history_badges(&scene(false, 4))), vec![BadgeKind::Popular]);
        assert_eq!(kinds(&scene_fav_history_badges(&scene(false, 2))), vec![BadgeKind::Revisited]);
        assert_eq!(kinds(&scene_fav_history_badges(&scene(false, 1))), vec![BadgeKind::Viewed]);
        assert!(scene_fav_history_badges(&scene(false, 0)).is_empty());
    }

    #[test]
    fn test_favorite_viewed_once_gets_both_badges() {
        assert_eq!(
            kinds(&scene_fav_history_badges(&scene(true, 1))),
            vec![BadgeKind::Favorite, BadgeKind::Viewed]
        );
        // Repeat views of a favorite stay on the favorite side only
        assert_eq!(kinds(&scene_fav_history_badges(&scene(true, 3))), vec![BadgeKind::Favorite]);
        assert_eq!(kinds(&scene_fav_history_badges(&scene(true, 8))), vec![BadgeKind::SuperHit]);
    }

    #[test]
    fn test_info_badges_all_present_in_priority_order() {
        let s = Scene {
            rating: 4.8,
            quality: Quality::Uhd4k,
            duration_minutes: 50,
            release_date: date(2024, 6, 20),
            actress_ids: vec![1, 2],
            ..Scene::new(3, "Full card", date(2024, 6, 20))
        };

        let badges = scene_info_badges(&s, date(2024, 7, 1));
        assert_eq!(
            kinds(&badges),
            vec![
                BadgeKind::HighRated,
                BadgeKind::HighQuality,
                BadgeKind::LongDuration,
                BadgeKind::Recent,
                BadgeKind::MultiActress,
            ]
        );
        assert_eq!(badges[1].label, "4K");
    }

    #[test]
    fn test_info_badges_plain_scene() {
        let s = Scene {
            rating: 3.0,
            quality: Quality::Hd,
            duration_minutes: 20,
            ..Scene::new(4, "Plain", date(2020, 1, 1))
        };
        assert!(scene_info_badges(&s, date(2024, 7, 1)).is_empty());
    }

    #[test]
    fn test_recent_window_boundary() {
        let today = date(2024, 7, 31);
        assert!(is_recent(date(2024, 7, 2), today));
        assert!(!is_recent(date(2024, 7, 1), today));
    }
}
