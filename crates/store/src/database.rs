//! The tenant isolation unit: a credential set plus its targets.

use crate::error::StoreError;
use crate::random_hex;
use crate::states::DatabaseState;
use crate::target::{Target, TargetDict, TargetStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Credentials and targets for one emulated cloud database.
///
/// The quota and reco counters of the real service are reported as
/// constants; the emulator does not reproduce usage accounting.
#[derive(Debug, Clone)]
pub struct VuforiaDatabase {
    pub database_name: String,
    pub server_access_key: String,
    pub server_secret_key: String,
    pub client_access_key: String,
    pub client_secret_key: String,
    pub state: DatabaseState,
    pub targets: HashMap<String, Target>,
}

impl VuforiaDatabase {
    pub const TARGET_QUOTA: u32 = 1000;
    pub const REQUEST_QUOTA: u32 = 100_000;
    pub const RECO_THRESHOLD: u32 = 1000;

    /// A database with fresh random credentials and a random name.
    pub fn new() -> Self {
        Self {
            database_name: random_hex(),
            server_access_key: random_hex(),
            server_secret_key: random_hex(),
            client_access_key: random_hex(),
            client_secret_key: random_hex(),
            state: DatabaseState::Working,
            targets: HashMap::new(),
        }
    }

    pub fn with_state(mut self, state: DatabaseState) -> Self {
        self.state = state;
        self
    }

    pub fn target(&self, target_id: &str) -> Option<&Target> {
        self.targets.get(target_id)
    }

    pub fn not_deleted_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.values().filter(|target| !target.is_deleted())
    }

    /// Whether a not-deleted target other than `excluding` carries `name`.
    pub fn name_taken(&self, name: &str, excluding: Option<&str>) -> bool {
        self.not_deleted_targets()
            .any(|target| target.name == name && Some(target.target_id.as_str()) != excluding)
    }

    pub fn count_with_status(&self, status: TargetStatus, now: DateTime<Utc>) -> usize {
        self.not_deleted_targets()
            .filter(|target| target.status(now) == status)
            .count()
    }

    pub fn to_dict(&self) -> DatabaseDict {
        DatabaseDict {
            database_name: self.database_name.clone(),
            server_access_key: self.server_access_key.clone(),
            server_secret_key: self.server_secret_key.clone(),
            client_access_key: self.client_access_key.clone(),
            client_secret_key: self.client_secret_key.clone(),
            state: self.state,
            targets: self.targets.values().map(Target::to_dict).collect(),
        }
    }

    pub fn from_dict(dict: &DatabaseDict) -> Result<Self, StoreError> {
        let mut targets = HashMap::new();
        for target_dict in &dict.targets {
            let target = Target::from_dict(target_dict)?;
            targets.insert(target.target_id.clone(), target);
        }
        Ok(Self {
            database_name: dict.database_name.clone(),
            server_access_key: dict.server_access_key.clone(),
            server_secret_key: dict.server_secret_key.clone(),
            client_access_key: dict.client_access_key.clone(),
            client_secret_key: dict.client_secret_key.clone(),
            state: dict.state,
            targets,
        })
    }
}

impl Default for VuforiaDatabase {
    fn default() -> Self {
        Self::new()
    }
}

/// JSON representation of a database and its targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseDict {
    pub database_name: String,
    pub server_access_key: String,
    pub server_secret_key: String,
    pub client_access_key: String,
    pub client_secret_key: String,
    pub state: DatabaseState,
    pub targets: Vec<TargetDict>,
}
