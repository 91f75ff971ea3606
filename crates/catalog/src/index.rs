//! CatalogIndex: one immutable snapshot of the API's catalog.
//!
//! Scenes and actresses are kept in the order the API returned them (the
//! filter engine's "no constraint" path must hand that order back
//! untouched). Lookup maps and secondary indices sit alongside.

use crate::error::{CatalogError, Result, ValidationError};
use crate::history::ViewHistory;
use crate::parser;
use crate::types::*;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// File names expected inside a catalog snapshot directory.
pub const SCENES_FILE: &str = "scenes.json";
pub const ACTRESSES_FILE: &str = "actrices.json";
pub const HISTORY_FILE: &str = "history.json";

#[derive(Debug, Default)]
pub struct CatalogIndex {
    scenes: Vec<Scene>,
    actresses: Vec<Actress>,
    history: Vec<ViewHistoryEntry>,

    scene_positions: HashMap<SceneId, usize>,
    actress_positions: HashMap<ActressId, usize>,

    /// Scenes carrying each tag, in catalog order
    tag_index: BTreeMap<String, Vec<SceneId>>,
    /// Scenes crediting each actress, from either side of the relation
    actress_scenes: HashMap<ActressId, Vec<SceneId>>,
}

impl CatalogIndex {
    /// Build an index from already-decoded records.
    pub fn build(
        scenes: Vec<Scene>,
        actresses: Vec<Actress>,
        history: Vec<ViewHistoryEntry>,
    ) -> Result<Self> {
        let mut scene_positions = HashMap::with_capacity(scenes.len());
        for (pos, scene) in scenes.iter().enumerate() {
            if scene_positions.insert(scene.id, pos).is_some() {
                return Err(CatalogError::DuplicateId {
                    entity: "scene".to_string(),
                    id: scene.id,
                });
            }
        }

        let mut actress_positions = HashMap::with_capacity(actresses.len());
        for (pos, actress) in actresses.iter().enumerate() {
            if actress_positions.insert(actress.id, pos).is_some() {
                return Err(CatalogError::DuplicateId {
                    entity: "actress".to_string(),
                    id: actress.id,
                });
            }
        }

        let mut tag_index: BTreeMap<String, Vec<SceneId>> = BTreeMap::new();
        let mut actress_scenes: HashMap<ActressId, Vec<SceneId>> = HashMap::new();
        for scene in &scenes {
            for tag in &scene.tags {
                tag_index.entry(tag.clone()).or_default().push(scene.id);
            }
            for &actress_id in &scene.actress_ids {
                actress_scenes.entry(actress_id).or_default().push(scene.id);
            }
        }
        for actress in &actresses {
            let linked = actress_scenes.entry(actress.id).or_default();
            for &scene_id in &actress.scene_ids {
                if !linked.contains(&scene_id) {
                    linked.push(scene_id);
                }
            }
        }

        debug!(
            scenes = scenes.len(),
            actresses = actresses.len(),
            tags = tag_index.len(),
            "Catalog index built"
        );

        Ok(Self {
            scenes,
            actresses,
            history,
            scene_positions,
            actress_positions,
            tag_index,
            actress_scenes,
        })
    }

    /// Load a snapshot directory (`scenes.json`, `actrices.json`, optional
    /// `history.json`).
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        info!("Loading catalog snapshot from {:?}", dir);

        let scenes_path = dir.join(SCENES_FILE);
        let actresses_path = dir.join(ACTRESSES_FILE);
        let history_path = dir.join(HISTORY_FILE);

        // Scenes and actresses decode independently
        let (scenes, actresses) = rayon::join(
            || parser::parse_scenes(&scenes_path),
            || parser::parse_actresses(&actresses_path),
        );
        let scenes = scenes?;
        let actresses = actresses?;

        let history = if history_path.exists() {
            parser::parse_history(&history_path)?
        } else {
            Vec::new()
        };

        info!(
            "Loaded {} scenes, {} actresses, {} history rows",
            scenes.len(),
            actresses.len(),
            history.len()
        );

        Self::build(scenes, actresses, history)
    }

    /// All scenes, in API order
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    /// All actresses, in API order
    pub fn actresses(&self) -> &[Actress] {
        &self.actresses
    }

    /// Raw history rows as loaded
    pub fn history_rows(&self) -> &[ViewHistoryEntry] {
        &self.history
    }

    /// Bounded recently-viewed list rebuilt from the history rows
    pub fn recent_history(&self, capacity: usize) -> std::result::Result<ViewHistory, ValidationError> {
        ViewHistory::from_entries(capacity, self.history.iter().copied())
    }

    pub fn get_scene(&self, id: SceneId) -> Option<&Scene> {
        self.scene_positions.get(&id).map(|&pos| &self.scenes[pos])
    }

    pub fn get_actress(&self, id: ActressId) -> Option<&Actress> {
        self.actress_positions.get(&id).map(|&pos| &self.actresses[pos])
    }

    /// Scenes flagged as favorite by the API
    pub fn favorites(&self) -> Vec<Scene> {
        self.scenes.iter().filter(|s| s.is_favorite).cloned().collect()
    }

    /// Scene ids carrying `tag`
    pub fn scenes_with_tag(&self, tag: &str) -> &[SceneId] {
        self.tag_index.get(tag).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Scene ids crediting `actress_id`
    pub fn scenes_for_actress(&self, actress_id: ActressId) -> &[SceneId] {
        self.actress_scenes
            .get(&actress_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Every tag in use, sorted
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tag_index.keys().map(String::as_str)
    }

    /// Get counts for debugging/validation
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.scenes.len(), self.actresses.len(), self.history.len())
    }
}
