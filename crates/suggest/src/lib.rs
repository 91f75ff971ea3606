//! Suggestions and catalog-wide rankings.
//!
//! This crate provides:
//! - FavoriteProfile: tags, actresses and scene ids the user already knows
//! - RankingWeights: how the three suggestion signals are combined
//! - SuggestionRanker: "surprise me" picks outside favorites and history
//! - trending / popular_tags: rankings that need no user profile
//!
//! ## Example Usage
//! ```ignore
//! use suggest::{RankingWeights, SuggestionRanker};
//!
//! let ranker = SuggestionRanker::new().with_weights(RankingWeights::new(0.6, 0.3, 0.1));
//! let picks = ranker.suggest(index.scenes(), &index.favorites(), index.history_rows(), 5, Some(7))?;
//! ```

pub mod profile;
pub mod ranker;
pub mod trending;
pub mod weights;

// Re-export main types
pub use profile::{FavoriteProfile, build_favorite_profile};
pub use ranker::{ScoredScene, SuggestionRanker, suggest};
pub use trending::{TagCount, popular_tags, trending, trending_score};
pub use weights::RankingWeights;
