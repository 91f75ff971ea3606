//! Error types for the catalog crate.
//!
//! Two kinds of failure live here:
//! - `ValidationError`: a caller handed us a malformed configuration value
//!   (filter bounds, ranking weights, a zero result count). Always reported,
//!   never coerced into "match everything" or "match nothing".
//! - `CatalogError`: the snapshot handed over by the API client could not be
//!   read or decoded.

use thiserror::Error;

/// A configuration value was rejected before any work was done.
///
/// `field` names the offending option using its JSON spelling so the UI can
/// point at the right control.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid value for {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while loading a catalog snapshot
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON payload could not be decoded
    #[error("Decode error in {file}: {source}")]
    DecodeError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record field had an invalid value
    #[error("Invalid value for {field} on record {id}: {value}")]
    InvalidValue {
        field: String,
        id: u32,
        value: String,
    },

    /// Two records of the same kind share an id
    #[error("Duplicate {entity} id {id}")]
    DuplicateId { entity: String, id: u32 },

    /// Configuration was rejected
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
