//! Core domain types for the scene catalog.
//!
//! Records are created from the API client's JSON payload and are treated as
//! read-only snapshots everywhere else: the engines derive views and subsets,
//! they never mutate a record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a scene
pub type SceneId = u32;

/// Unique identifier for an actress
pub type ActressId = u32;

// =============================================================================
// Quality
// =============================================================================

/// Video quality tier, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Quality {
    #[serde(rename = "SD")]
    Sd,
    #[serde(rename = "HD")]
    Hd,
    #[serde(rename = "Full HD")]
    FullHd,
    #[serde(rename = "4K")]
    Uhd4k,
}

impl Quality {
    /// Full HD and 4K get the "high quality" badge in the UI.
    pub fn is_premium(self) -> bool {
        matches!(self, Quality::FullHd | Quality::Uhd4k)
    }

    pub fn label(self) -> &'static str {
        match self {
            Quality::Sd => "SD",
            Quality::Hd => "HD",
            Quality::FullHd => "Full HD",
            Quality::Uhd4k => "4K",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "SD" | "480P" => Ok(Quality::Sd),
            "HD" | "720P" => Ok(Quality::Hd),
            "FULLHD" | "FHD" | "1080P" => Ok(Quality::FullHd),
            "4K" | "UHD" | "2160P" => Ok(Quality::Uhd4k),
            _ => Err(format!("unknown quality '{}'", s)),
        }
    }
}

impl TryFrom<String> for Quality {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Scene
// =============================================================================

/// A single video record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub id: SceneId,
    pub title: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_note: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub quality: Quality,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub view_count: u32,
    #[serde(default)]
    pub is_favorite: bool,
    /// Personal rating in [0, 5]
    #[serde(default)]
    pub rating: f32,
    pub release_date: NaiveDate,
    /// Actresses in credit order
    #[serde(default)]
    pub actress_ids: Vec<ActressId>,
}

impl Scene {
    /// Bare scene with neutral metadata; tests and fixtures fill in the rest
    /// with struct update syntax.
    pub fn new(id: SceneId, title: impl Into<String>, release_date: NaiveDate) -> Self {
        Self {
            id,
            title: title.into(),
            path: String::new(),
            personal_note: None,
            tags: BTreeSet::new(),
            quality: Quality::Hd,
            duration_minutes: 0,
            view_count: 0,
            is_favorite: false,
            rating: 0.0,
            release_date,
            actress_ids: Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn features_actress(&self, actress_id: ActressId) -> bool {
        self.actress_ids.contains(&actress_id)
    }
}

// =============================================================================
// Actress
// =============================================================================

/// A performer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actress {
    pub id: ActressId,
    pub name: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub scene_ids: Vec<SceneId>,
}

impl Actress {
    pub fn new(id: ActressId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            tags: BTreeSet::new(),
            country: None,
            birth_date: None,
            scene_ids: Vec::new(),
        }
    }
}

// =============================================================================
// View history
// =============================================================================

/// One "recently viewed" row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewHistoryEntry {
    #[serde(alias = "scene_id")]
    pub scene_id: SceneId,
    #[serde(alias = "date_vue", alias = "viewed_at")]
    pub viewed_at: DateTime<Utc>,
}

impl ViewHistoryEntry {
    pub fn new(scene_id: SceneId, viewed_at: DateTime<Utc>) -> Self {
        Self {
            scene_id,
            viewed_at,
        }
    }
}
