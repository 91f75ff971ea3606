//! Filtering and sorting of the actress directory.
//!
//! Works like the scene engine but over `Actress` records, with the scene
//! catalog as a side input for scene counts and "has a favorite scene".

use catalog::{Actress, ActressId, Scene, SceneId, ValidationError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActressSortBy {
    #[default]
    Name,
    SceneCount,
    BirthDate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActressFilterSpec {
    /// Case-insensitive substring of the name or of any tag
    pub text_query: Option<String>,
    /// Case-insensitive country match
    pub country: Option<String>,
    /// Every tag required, compared case-insensitively
    pub tags: Option<BTreeSet<String>>,
    pub min_scene_count: Option<u32>,
    /// Actress appears in at least one favorite scene
    pub favorites_only: Option<bool>,
    pub sort_by: ActressSortBy,
    pub sort_order: SortOrder,
}

impl ActressFilterSpec {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(tags) = &self.tags {
            if tags.iter().any(|t| t.trim().is_empty()) {
                return Err(ValidationError::new("tags", "tag names must not be blank"));
            }
        }
        Ok(())
    }
}

/// Scene ids linked to each actress, from both sides of the relation.
fn scene_links(actresses: &[Actress], scenes: &[Scene]) -> HashMap<ActressId, BTreeSet<SceneId>> {
    let mut links: HashMap<ActressId, BTreeSet<SceneId>> = actresses
        .iter()
        .map(|a| (a.id, a.scene_ids.iter().copied().collect()))
        .collect();

    for scene in scenes {
        for actress_id in &scene.actress_ids {
            if let Some(linked) = links.get_mut(actress_id) {
                linked.insert(scene.id);
            }
        }
    }
    links
}

/// Filter and sort `actresses`; ties always fall back to id ascending.
#[instrument(skip_all, fields(actresses = actresses.len(), scenes = scenes.len()))]
pub fn filter_actresses(
    actresses: &[Actress],
    scenes: &[Scene],
    spec: &ActressFilterSpec,
) -> Result<Vec<Actress>, ValidationError> {
    spec.validate()?;

    let links = scene_links(actresses, scenes);
    let favorite_ids: BTreeSet<SceneId> =
        scenes.iter().filter(|s| s.is_favorite).map(|s| s.id).collect();
    let scene_count = |id: ActressId| links.get(&id).map_or(0, BTreeSet::len);

    let query = spec
        .text_query
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());
    let country = spec
        .country
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let required_tags: Vec<String> = spec
        .tags
        .iter()
        .flatten()
        .map(|t| t.trim().to_lowercase())
        .collect();

    let mut kept: Vec<&Actress> = actresses
        .iter()
        .filter(|a| {
            query.as_deref().is_none_or(|q| {
                a.name.to_lowercase().contains(q)
                    || a.tags.iter().any(|t| t.to_lowercase().contains(q))
            })
        })
        .filter(|a| {
            country.is_none_or(|c| {
                a.country
                    .as_deref()
                    .is_some_and(|own| own.trim().eq_ignore_ascii_case(c))
            })
        })
        .filter(|a| {
            let own: BTreeSet<String> = a.tags.iter().map(|t| t.to_lowercase()).collect();
            required_tags.iter().all(|t| own.contains(t))
        })
        .filter(|a| spec.min_scene_count.is_none_or(|min| scene_count(a.id) >= min as usize))
        .filter(|a| {
            !spec.favorites_only.unwrap_or(false)
                || links
                    .get(&a.id)
                    .is_some_and(|linked| !linked.is_disjoint(&favorite_ids))
        })
        .collect();

    kept.sort_by(|a, b| {
        let primary = match spec.sort_by {
            ActressSortBy::Name => directed(
                a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                spec.sort_order,
            ),
            ActressSortBy::SceneCount => directed(scene_count(a.id).cmp(&scene_count(b.id)), spec.sort_order),
            ActressSortBy::BirthDate => match (a.birth_date, b.birth_date) {
                (Some(x), Some(y)) => directed(x.cmp(&y), spec.sort_order),
                // Unknown birth dates go last whatever the direction
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };
        primary.then_with(|| a.id.cmp(&b.id))
    });

    debug!("Actress filter kept {} of {}", kept.len(), actresses.len());
    Ok(kept.into_iter().cloned().collect())
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}
