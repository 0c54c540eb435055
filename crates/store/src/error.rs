//! Error types produced by the store crate.

use thiserror::Error;

/// Errors surfaced by the repository and the record round-trip.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreError {
    /// A creation-time invariant: every credential field and the name must
    /// be unique across all databases held by one manager.
    #[error("all {field}s must be unique; there is already a database with the {field} \"{value}\"")]
    DuplicateDatabaseKey { field: &'static str, value: String },

    #[error("no database named \"{0}\"")]
    UnknownDatabase(String),

    #[error("no target with id \"{0}\"")]
    UnknownTarget(String),

    /// The name collides with a not-deleted target in the same database.
    #[error("a target named \"{0}\" already exists")]
    TargetNameExists(String),

    /// Deleting is forbidden while the target is processing.
    #[error("target status is processing")]
    TargetStatusProcessing,

    /// Updating is forbidden unless the target's status is success.
    #[error("target status is not success")]
    TargetStatusNotSuccess,

    #[error("invalid stored record: {0}")]
    InvalidRecord(String),
}
