//! Database states.

use serde::{Deserialize, Serialize};

/// The state of an emulated cloud database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatabaseState {
    #[default]
    Working,
    /// A project is inactive if its license key has been deleted.
    ProjectInactive,
}
