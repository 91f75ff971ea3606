//! Filter implementations for the scene pipeline.
//!
//! One filter per recognised `FilterSpec` option.

pub mod actress_count;
pub mod actresses;
pub mod favorites_only;
pub mod max_duration;
pub mod minimum_rating;
pub mod quality;
pub mod release_window;
pub mod required_tags;
pub mod text_query;
pub mod viewed_only;

// Re-export for convenience
pub use actress_count::{ActressCount, ActressCountFilter};
pub use actresses::ActressFilter;
pub use favorites_only::FavoritesOnlyFilter;
pub use max_duration::MaxDurationFilter;
pub use minimum_rating::MinimumRatingFilter;
pub use quality::QualityFilter;
pub use release_window::ReleaseWindowFilter;
pub use required_tags::RequiredTagsFilter;
pub use text_query::TextQueryFilter;
pub use viewed_only::ViewedOnlyFilter;
