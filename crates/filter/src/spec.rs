//! Declarative scene filter configuration.
//!
//! Every option is optional; an absent option is no constraint. Empty sets
//! and a blank text query are treated the same as absent, which matches what
//! the UI sends when a control is reset to "all".

use crate::filters::ActressCount;
use catalog::{ActressId, Quality, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    /// Case-insensitive substring of title or personal note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_query: Option<String>,
    /// Every tag must be present on the scene
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<BTreeSet<String>>,
    /// Inclusive lower bound, in [0, 5]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f32>,
    /// Inclusive upper bound, must not be negative
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration_minutes: Option<i64>,
    /// Scene quality must be one of these
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<BTreeSet<Quality>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites_only: Option<bool>,
    /// Scene has been viewed at least once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewed_only: Option<bool>,
    /// Scene must feature at least one of these actresses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actress_ids: Option<BTreeSet<ActressId>>,
    /// Exact or minimum number of credited actresses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actress_count: Option<ActressCount>,
    /// Inclusive release-date window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_after: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released_before: Option<NaiveDate>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text_query(mut self, query: impl Into<String>) -> Self {
        self.text_query = Some(query.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_min_rating(mut self, min_rating: f32) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn with_max_duration_minutes(mut self, minutes: i64) -> Self {
        self.max_duration_minutes = Some(minutes);
        self
    }

    pub fn with_quality(mut self, quality: impl IntoIterator<Item = Quality>) -> Self {
        self.quality = Some(quality.into_iter().collect());
        self
    }

    pub fn with_favorites_only(mut self, favorites_only: bool) -> Self {
        self.favorites_only = Some(favorites_only);
        self
    }

    pub fn with_viewed_only(mut self, viewed_only: bool) -> Self {
        self.viewed_only = Some(viewed_only);
        self
    }

    pub fn with_actress_count(mut self, rule: ActressCount) -> Self {
        self.actress_count = Some(rule);
        self
    }

    pub fn with_actress_ids(mut self, ids: impl IntoIterator<Item = ActressId>) -> Self {
        self.actress_ids = Some(ids.into_iter().collect());
        self
    }

    pub fn with_release_window(
        mut self,
        after: Option<NaiveDate>,
        before: Option<NaiveDate>,
    ) -> Self {
        self.released_after = after;
        self.released_before = before;
        self
    }

    /// The trimmed text query, if it constrains anything.
    pub fn effective_text_query(&self) -> Option<&str> {
        self.text_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }

    /// True when no option constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.effective_text_query().is_none()
            && self.tags.as_ref().is_none_or(BTreeSet::is_empty)
            && self.min_rating.is_none()
            && self.max_duration_minutes.is_none()
            && self.quality.as_ref().is_none_or(BTreeSet::is_empty)
            && !self.favorites_only.unwrap_or(false)
            && !self.viewed_only.unwrap_or(false)
            && self.actress_count.is_none()
            && self.actress_ids.as_ref().is_none_or(BTreeSet::is_empty)
            && self.released_after.is_none()
            && self.released_before.is_none()
    }

    /// Reject malformed bounds before any scene is looked at.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(min_rating) = self.min_rating {
            if !min_rating.is_finite() || !(0.0..=5.0).contains(&min_rating) {
                return Err(ValidationError::new(
                    "minRating",
                    format!("{} is outside [0, 5]", min_rating),
                ));
            }
        }

        if let Some(max_duration) = self.max_duration_minutes {
            if max_duration < 0 {
                return Err(ValidationError::new(
                    "maxDurationMinutes",
                    format!("{} is negative", max_duration),
                ));
            }
        }

        if let Some(tags) = &self.tags {
            if tags.iter().any(|t| t.trim().is_empty()) {
                return Err(ValidationError::new("tags", "tag names must not be blank"));
            }
        }

        if let (Some(after), Some(before)) = (self.released_after, self.released_before) {
            if after > before {
                return Err(ValidationError::new(
                    "releasedAfter",
                    format!("{} is later than releasedBefore {}", after, before),
                ));
            }
        }

        Ok(())
    }
}
