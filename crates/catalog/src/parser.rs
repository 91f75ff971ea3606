//! Decoding of the API client's JSON payloads.
//!
//! The catalog API speaks French (`titre`, `chemin`, `qualite`, ...) while the
//! rest of the workspace uses the English camelCase spelling. Both are
//! accepted here. The raw shapes are loose on purpose: tags arrive either as
//! plain strings or as `{ "id": .., "nom": .. }` objects, an actress's typical
//! tags may be a comma-separated string, and `note_perso` is sometimes the
//! numeric personal rating and sometimes free text.
//!
//! Raw records are then checked and converted into the strict domain types.

use crate::error::{CatalogError, Result};
use crate::types::*;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

// =============================================================================
// Raw shapes
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTag {
    Name(String),
    Object {
        #[serde(alias = "nom")]
        name: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTagList {
    List(Vec<RawTag>),
    Csv(String),
}

impl Default for RawTagList {
    fn default() -> Self {
        RawTagList::List(Vec::new())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNote {
    Number(f32),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct RawRef {
    id: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScene {
    id: SceneId,
    #[serde(default, alias = "titre")]
    title: Option<String>,
    #[serde(alias = "chemin")]
    path: String,
    #[serde(default)]
    personal_note: Option<String>,
    #[serde(default, alias = "note_perso")]
    note_perso: Option<RawNote>,
    #[serde(default)]
    tags: RawTagList,
    #[serde(default, alias = "qualite")]
    quality: Option<String>,
    #[serde(default, alias = "duree")]
    duration_minutes: Option<u32>,
    #[serde(default, alias = "nb_vues")]
    view_count: Option<u32>,
    #[serde(default)]
    is_favorite: bool,
    #[serde(default, alias = "note")]
    rating: Option<f32>,
    #[serde(default, alias = "date_scene")]
    release_date: Option<NaiveDate>,
    #[serde(default, alias = "date_ajout")]
    added_date: Option<NaiveDate>,
    #[serde(default)]
    actress_ids: Vec<ActressId>,
    #[serde(default, alias = "actrices")]
    actresses: Vec<RawRef>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawActress {
    id: ActressId,
    #[serde(alias = "nom")]
    name: String,
    #[serde(default, alias = "tags_typiques")]
    tags: Option<RawTagList>,
    #[serde(default, alias = "nationalite")]
    country: Option<String>,
    #[serde(default, alias = "date_naissance")]
    birth_date: Option<NaiveDate>,
    #[serde(default)]
    scene_ids: Vec<SceneId>,
    #[serde(default)]
    scenes: Vec<RawRef>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Instant(DateTime<Utc>),
    Day(NaiveDate),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHistoryRow {
    #[serde(alias = "scene_id")]
    scene_id: SceneId,
    #[serde(alias = "date_vue", alias = "derniere_vue")]
    viewed_at: RawTimestamp,
}

// =============================================================================
// Normalisation helpers
// =============================================================================

fn normalize_tags(raw: RawTagList) -> BTreeSet<String> {
    let names: Vec<String> = match raw {
        RawTagList::List(tags) => tags
            .into_iter()
            .map(|tag| match tag {
                RawTag::Name(name) => name,
                RawTag::Object { name } => name,
            })
            .collect(),
        RawTagList::Csv(csv) => csv.split(',').map(str::to_string).collect(),
    };

    names
        .into_iter()
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Merge two id sources keeping first-seen order.
fn merge_ids(primary: Vec<u32>, refs: Vec<RawRef>) -> Vec<u32> {
    let mut ids = primary;
    for r in refs {
        if !ids.contains(&r.id) {
            ids.push(r.id);
        }
    }
    ids
}

fn invalid(field: &str, id: u32, value: impl ToString) -> CatalogError {
    CatalogError::InvalidValue {
        field: field.to_string(),
        id,
        value: value.to_string(),
    }
}

// =============================================================================
// Conversions
// =============================================================================

fn convert_scene(raw: RawScene) -> Result<Scene> {
    let id = raw.id;

    // A numeric note_perso is the personal rating; anything else is a note.
    let (note_rating, note_text) = match raw.note_perso {
        Some(RawNote::Number(n)) => (Some(n), None),
        Some(RawNote::Text(text)) => match text.trim().parse::<f32>() {
            Ok(n) => (Some(n), None),
            Err(_) => (None, Some(text)),
        },
        None => (None, None),
    };

    let rating = raw.rating.or(note_rating).unwrap_or(0.0);
    if !rating.is_finite() || !(0.0..=5.0).contains(&rating) {
        return Err(invalid("rating", id, rating));
    }

    let quality = match raw.quality.as_deref() {
        Some(q) => q.parse::<Quality>().map_err(|_| invalid("quality", id, q))?,
        None => return Err(invalid("quality", id, "<missing>")),
    };

    let release_date = raw
        .release_date
        .or(raw.added_date)
        .ok_or_else(|| invalid("releaseDate", id, "<missing>"))?;

    let title = match non_blank(raw.title) {
        Some(title) => title,
        None => Path::new(&raw.path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| raw.path.clone()),
    };

    Ok(Scene {
        id,
        title,
        path: raw.path,
        personal_note: non_blank(raw.personal_note.or(note_text)),
        tags: normalize_tags(raw.tags),
        quality,
        duration_minutes: raw.duration_minutes.unwrap_or(0),
        view_count: raw.view_count.unwrap_or(0),
        is_favorite: raw.is_favorite,
        rating,
        release_date,
        actress_ids: merge_ids(raw.actress_ids, raw.actresses),
    })
}

fn convert_actress(raw: RawActress) -> Result<Actress> {
    let name = raw.name.trim().to_string();
    if name.is_empty() {
        return Err(invalid("name", raw.id, "<empty>"));
    }

    Ok(Actress {
        id: raw.id,
        name,
        tags: raw.tags.map(normalize_tags).unwrap_or_default(),
        country: non_blank(raw.country),
        birth_date: raw.birth_date,
        scene_ids: merge_ids(raw.scene_ids, raw.scenes),
    })
}

fn convert_history_row(raw: RawHistoryRow) -> ViewHistoryEntry {
    let viewed_at = match raw.viewed_at {
        RawTimestamp::Instant(instant) => instant,
        RawTimestamp::Day(day) => day.and_time(chrono::NaiveTime::MIN).and_utc(),
    };
    ViewHistoryEntry::new(raw.scene_id, viewed_at)
}

// =============================================================================
// Public entry points
// =============================================================================

fn decode<T: for<'de> Deserialize<'de>>(json: &str, file: &str) -> Result<Vec<T>> {
    serde_json::from_str(json).map_err(|source| CatalogError::DecodeError {
        file: file.to_string(),
        source,
    })
}

/// Decode a JSON array of scene records.
///
/// `file` is only used to label decode errors.
pub fn decode_scenes(json: &str, file: &str) -> Result<Vec<Scene>> {
    decode::<RawScene>(json, file)?
        .into_iter()
        .map(convert_scene)
        .collect()
}

/// Decode a JSON array of actress records.
pub fn decode_actresses(json: &str, file: &str) -> Result<Vec<Actress>> {
    decode::<RawActress>(json, file)?
        .into_iter()
        .map(convert_actress)
        .collect()
}

/// Decode a JSON array of history rows (dates or RFC 3339 timestamps).
pub fn decode_history(json: &str, file: &str) -> Result<Vec<ViewHistoryEntry>> {
    Ok(decode::<RawHistoryRow>(json, file)?
        .into_iter()
        .map(convert_history_row)
        .collect())
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(CatalogError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// Parse a scenes file
pub fn parse_scenes(path: &Path) -> Result<Vec<Scene>> {
    let json = read_file(path)?;
    decode_scenes(&json, &path.display().to_string())
}

/// Parse an actresses file
pub fn parse_actresses(path: &Path) -> Result<Vec<Actress>> {
    let json = read_file(path)?;
    decode_actresses(&json, &path.display().to_string())
}

/// Parse a history file
pub fn parse_history(path: &Path) -> Result<Vec<ViewHistoryEntry>> {
    let json = read_file(path)?;
    decode_history(&json, &path.display().to_string())
}
