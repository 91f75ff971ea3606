//! Scene and actress filtering for the catalog front-end.
//!
//! This crate provides:
//! - Filter trait and one implementation per filter option
//! - FilterPipeline for composing filters
//! - FilterSpec, the declarative configuration sent by the UI
//! - FilterEngine, which validates a spec, runs the pipeline and orders results
//! - Actress directory filtering and sorting
//!
//! ## Example Usage
//! ```ignore
//! use filter::{FilterEngine, FilterSpec};
//! use catalog::Quality;
//!
//! let spec = FilterSpec::new()
//!     .with_min_rating(3.0)
//!     .with_quality([Quality::Hd, Quality::Uhd4k]);
//!
//! let matching = FilterEngine::new().filter(index.scenes(), &spec)?;
//! ```

pub mod actress_search;
pub mod engine;
pub mod filter_pipeline;
pub mod filters;
pub mod spec;
pub mod traits;

// Re-export main types
pub use actress_search::{ActressFilterSpec, ActressSortBy, SortOrder, filter_actresses};
pub use engine::{FilterEngine, filter};
pub use filter_pipeline::FilterPipeline;
pub use filters::ActressCount;
pub use spec::FilterSpec;
pub use traits::Filter;
