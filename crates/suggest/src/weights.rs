//! Tunable weights for combining suggestion signals.

use catalog::ValidationError;
use serde::{Deserialize, Serialize};

/// Relative weight of each normalized signal.
///
/// Defaults favour tag affinity over cast affinity over raw popularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankingWeights {
    pub tag_overlap: f64,
    pub actress_overlap: f64,
    pub popularity: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            tag_overlap: 0.5,
            actress_overlap: 0.3,
            popularity: 0.2,
        }
    }
}

impl RankingWeights {
    pub fn new(tag_overlap: f64, actress_overlap: f64, popularity: f64) -> Self {
        Self {
            tag_overlap,
            actress_overlap,
            popularity,
        }
    }

    /// Weights must be finite, non-negative and not all zero.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let named = [
            ("weights.tagOverlap", self.tag_overlap),
            ("weights.actressOverlap", self.actress_overlap),
            ("weights.popularity", self.popularity),
        ];
        for (field, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::new(
                    field,
                    format!("{} must be a finite, non-negative number", value),
                ));
            }
        }
        if self.tag_overlap + self.actress_overlap + self.popularity == 0.0 {
            return Err(ValidationError::new("weights", "at least one weight must be positive"));
        }
        Ok(())
    }

    /// Weighted sum of signals already normalized to [0, 1].
    pub fn combine(&self, tag_overlap: f64, actress_overlap: f64, popularity: f64) -> f64 {
        self.tag_overlap * tag_overlap
            + self.actress_overlap * actress_overlap
            + self.popularity * popularity
    }
}
