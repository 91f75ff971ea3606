//! # Catalog Crate
//!
//! Read-only snapshot of the scene catalog handed over by the API client.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Scene, Actress, Quality, ViewHistoryEntry)
//! - **parser**: Decode the API's JSON payloads (French or English field names)
//! - **index**: CatalogIndex with id lookups and tag/actress indices
//! - **history**: Bounded most-recent-first view history
//! - **badges**: Derived card labels
//! - **error**: ValidationError and CatalogError
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CatalogIndex;
//! use std::path::Path;
//!
//! let index = CatalogIndex::load_from_dir(Path::new("snapshot"))?;
//! let scene = index.get_scene(42).unwrap();
//! println!("{} is tagged {:?}", scene.title, scene.tags);
//! ```

// Public modules
pub mod badges;
pub mod error;
pub mod history;
pub mod index;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use badges::{Badge, BadgeKind, scene_fav_history_badges, scene_info_badges};
pub use error::{CatalogError, Result, ValidationError};
pub use history::{DEFAULT_HISTORY_CAPACITY, ViewHistory};
pub use index::CatalogIndex;
pub use types::{
    // Type aliases
    ActressId,
    SceneId,
    // Core types
    Actress,
    Quality,
    Scene,
    ViewHistoryEntry,
};
