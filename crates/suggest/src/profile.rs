//! What the user already knows: favorites and recently viewed scenes.
//!
//! The profile is gathered once per suggestion call so that scoring each
//! candidate is a handful of set lookups.

use catalog::{ActressId, Scene, SceneId, ViewHistoryEntry};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct FavoriteProfile {
    /// Ids of favorited scenes
    pub favorite_ids: HashSet<SceneId>,
    /// Union of every favorite scene's tags
    pub tags: HashSet<String>,
    /// Every actress credited on a favorite scene
    pub actress_ids: HashSet<ActressId>,
    /// Scenes in the recently-viewed history
    pub viewed_ids: HashSet<SceneId>,
}

impl FavoriteProfile {
    /// Whether a scene is already known and must not be suggested.
    pub fn is_known(&self, scene_id: SceneId) -> bool {
        self.favorite_ids.contains(&scene_id) || self.viewed_ids.contains(&scene_id)
    }
}

/// Build a profile from the favorite scenes and the view history.
pub fn build_favorite_profile(favorites: &[Scene], history: &[ViewHistoryEntry]) -> FavoriteProfile {
    let mut profile = FavoriteProfile::default();

    for scene in favorites {
        profile.favorite_ids.insert(scene.id);
        profile.tags.extend(scene.tags.iter().cloned());
        profile.actress_ids.extend(scene.actress_ids.iter().copied());
    }

    profile.viewed_ids = history.iter().map(|entry| entry.scene_id).collect();
    profile
}
