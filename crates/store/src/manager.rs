//! The repository: every database behind one coarse lock.

use crate::database::VuforiaDatabase;
use crate::error::StoreError;
use crate::target::{Target, TargetStatus};
use chrono::{DateTime, Utc};
use matchers::TargetTrackingRater;
use rand::prelude::IndexedRandom;
use std::sync::{Arc, Mutex};

/// Fields for a new target version.
#[derive(Debug, Clone)]
pub struct NewTarget {
    pub name: String,
    pub width: f64,
    pub image_value: Vec<u8>,
    pub active_flag: bool,
    pub application_metadata: Option<String>,
    pub processing_time_seconds: f64,
}

/// Partial update for an existing target.
#[derive(Debug, Clone, Default)]
pub struct TargetUpdate {
    pub name: Option<String>,
    pub width: Option<f64>,
    pub image_value: Option<Vec<u8>>,
    pub active_flag: Option<bool>,
    pub application_metadata: Option<String>,
}

/// In-memory store of databases, the unit the request handlers share.
///
/// One mutex guards the whole collection. Contention is irrelevant for a
/// test double, and the coarse lock makes the name-uniqueness
/// read-modify-write atomic: two racing adds with the same name cannot both
/// succeed.
pub struct TargetManager {
    databases: Mutex<Vec<VuforiaDatabase>>,
    rater: Arc<dyn TargetTrackingRater>,
}

impl TargetManager {
    pub fn new(rater: Arc<dyn TargetTrackingRater>) -> Self {
        Self {
            databases: Mutex::new(Vec::new()),
            rater,
        }
    }

    /// Add a database, enforcing field-wise global uniqueness of every
    /// credential field and the name.
    pub fn add_database(&self, database: VuforiaDatabase) -> Result<(), StoreError> {
        let mut databases = self.lock();
        for existing in databases.iter() {
            for (existing_value, new_value, field) in [
                (
                    &existing.server_access_key,
                    &database.server_access_key,
                    "server access key",
                ),
                (
                    &existing.server_secret_key,
                    &database.server_secret_key,
                    "server secret key",
                ),
                (
                    &existing.client_access_key,
                    &database.client_access_key,
                    "client access key",
                ),
                (
                    &existing.client_secret_key,
                    &database.client_secret_key,
                    "client secret key",
                ),
                (&existing.database_name, &database.database_name, "name"),
            ] {
                if existing_value == new_value {
                    return Err(StoreError::DuplicateDatabaseKey {
                        field,
                        value: new_value.clone(),
                    });
                }
            }
        }
        tracing::info!(database_name = %database.database_name, "database added");
        databases.push(database);
        Ok(())
    }

    pub fn remove_database(&self, database_name: &str) -> Result<(), StoreError> {
        let mut databases = self.lock();
        let before = databases.len();
        databases.retain(|database| database.database_name != database_name);
        if databases.len() == before {
            return Err(StoreError::UnknownDatabase(database_name.to_owned()));
        }
        tracing::info!(database_name, "database removed");
        Ok(())
    }

    /// A cloned snapshot for read-only paths (authentication, validation).
    pub fn snapshot(&self) -> Vec<VuforiaDatabase> {
        self.lock().clone()
    }

    pub fn database(&self, database_name: &str) -> Option<VuforiaDatabase> {
        self.lock()
            .iter()
            .find(|database| database.database_name == database_name)
            .cloned()
    }

    /// Create a target, re-checking name uniqueness under the lock.
    pub fn add_target(
        &self,
        database_name: &str,
        new: NewTarget,
        now: DateTime<Utc>,
    ) -> Result<Target, StoreError> {
        let mut databases = self.lock();
        let database = find_database(&mut databases, database_name)?;
        if database.name_taken(&new.name, None) {
            return Err(StoreError::TargetNameExists(new.name));
        }
        let target = Target::new(
            new.name,
            new.width,
            new.image_value,
            new.active_flag,
            new.application_metadata,
            new.processing_time_seconds,
            self.rater.as_ref(),
            now,
        );
        tracing::info!(database_name, target_id = %target.target_id, "target added");
        database
            .targets
            .insert(target.target_id.clone(), target.clone());
        Ok(target)
    }

    /// Replace a target with an updated version.
    ///
    /// Allowed only while the current version's status is success. The
    /// replacement gets a fresh `last_modified_date` (re-entering
    /// processing) and a tracking rating redrawn to differ from the previous
    /// one, so the version swap is observable.
    pub fn update_target(
        &self,
        database_name: &str,
        target_id: &str,
        update: TargetUpdate,
        now: DateTime<Utc>,
    ) -> Result<Target, StoreError> {
        let mut databases = self.lock();
        let database = find_database(&mut databases, database_name)?;
        let current = database
            .target(target_id)
            .filter(|target| !target.is_deleted())
            .ok_or_else(|| StoreError::UnknownTarget(target_id.to_owned()))?;
        if current.status(now) != TargetStatus::Success {
            return Err(StoreError::TargetStatusNotSuccess);
        }
        if let Some(name) = &update.name {
            if database.name_taken(name, Some(target_id)) {
                return Err(StoreError::TargetNameExists(name.clone()));
            }
        }

        let mut replacement = current.clone();
        if let Some(name) = update.name {
            replacement.name = name;
        }
        if let Some(width) = update.width {
            replacement.width = width;
        }
        if let Some(image_value) = update.image_value {
            replacement.image_value = image_value;
        }
        if let Some(active_flag) = update.active_flag {
            replacement.active_flag = active_flag;
        }
        if let Some(application_metadata) = update.application_metadata {
            replacement.application_metadata = Some(application_metadata);
        }
        replacement.processed_tracking_rating =
            redraw_rating(replacement.processed_tracking_rating);
        replacement.last_modified_date = now;
        tracing::info!(database_name, target_id, "target updated");
        database
            .targets
            .insert(target_id.to_owned(), replacement.clone());
        Ok(replacement)
    }

    /// Tombstone a target. Forbidden while the target is processing.
    pub fn delete_target(
        &self,
        database_name: &str,
        target_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Target, StoreError> {
        let mut databases = self.lock();
        let database = find_database(&mut databases, database_name)?;
        let current = database
            .target(target_id)
            .filter(|target| !target.is_deleted())
            .ok_or_else(|| StoreError::UnknownTarget(target_id.to_owned()))?;
        if current.status(now) == TargetStatus::Processing {
            return Err(StoreError::TargetStatusProcessing);
        }
        let mut replacement = current.clone();
        replacement.delete_date = Some(now);
        tracing::info!(database_name, target_id, "target tombstoned");
        database
            .targets
            .insert(target_id.to_owned(), replacement.clone());
        Ok(replacement)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<VuforiaDatabase>> {
        // A poisoned lock means a panic mid-mutation; the test double has
        // nothing sensible to recover, so propagate the panic.
        self.databases.lock().expect("target manager lock poisoned")
    }
}

fn find_database<'a>(
    databases: &'a mut [VuforiaDatabase],
    database_name: &str,
) -> Result<&'a mut VuforiaDatabase, StoreError> {
    databases
        .iter_mut()
        .find(|database| database.database_name == database_name)
        .ok_or_else(|| StoreError::UnknownDatabase(database_name.to_owned()))
}

/// Uniform draw from `0..=5` excluding the previous rating.
fn redraw_rating(previous: i32) -> i32 {
    let choices: Vec<i32> = (0..=5).filter(|rating| *rating != previous).collect();
    *choices
        .choose(&mut rand::rng())
        .expect("five candidate ratings always remain")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use image::{ImageBuffer, Rgb};
    use matchers::HardcodedRater;
    use std::io::Cursor;

    fn high_contrast_png() -> Vec<u8> {
        let image = ImageBuffer::from_fn(8, 8, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([0u8, 0, 0])
            } else {
                Rgb([255u8, 255, 255])
            }
        });
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("in-memory PNG encoding succeeds");
        bytes
    }

    fn manager() -> TargetManager {
        TargetManager::new(Arc::new(HardcodedRater::new(3)))
    }

    fn new_target(name: &str) -> NewTarget {
        NewTarget {
            name: name.to_owned(),
            width: 1.0,
            image_value: high_contrast_png(),
            active_flag: true,
            application_metadata: None,
            processing_time_seconds: 1.0,
        }
    }

    #[test]
    fn duplicate_credentials_are_rejected_field_wise() {
        let manager = manager();
        let first = VuforiaDatabase::new();
        let mut second = VuforiaDatabase::new();
        second.client_access_key = first.client_access_key.clone();
        manager.add_database(first).expect("first add succeeds");
        let err = manager.add_database(second).expect_err("collision");
        assert!(matches!(
            err,
            StoreError::DuplicateDatabaseKey {
                field: "client access key",
                ..
            }
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let manager = manager();
        let first = VuforiaDatabase::new();
        let mut second = VuforiaDatabase::new();
        second.database_name = first.database_name.clone();
        manager.add_database(first).expect("first add succeeds");
        let err = manager.add_database(second).expect_err("collision");
        assert!(matches!(
            err,
            StoreError::DuplicateDatabaseKey { field: "name", .. }
        ));
    }

    #[test]
    fn second_add_with_same_target_name_fails() {
        let manager = manager();
        let database = VuforiaDatabase::new();
        let name = database.database_name.clone();
        manager.add_database(database).expect("add succeeds");
        let now = Utc::now();
        manager
            .add_target(&name, new_target("duplicate"), now)
            .expect("first target");
        let err = manager
            .add_target(&name, new_target("duplicate"), now)
            .expect_err("name collision");
        assert!(matches!(err, StoreError::TargetNameExists(_)));
    }

    #[test]
    fn name_is_reusable_after_deletion() {
        let manager = manager();
        let database = VuforiaDatabase::new();
        let db_name = database.database_name.clone();
        manager.add_database(database).expect("add succeeds");
        let now = Utc::now();
        let target = manager
            .add_target(&db_name, new_target("reused"), now)
            .expect("first target");
        let after_processing = now + Duration::seconds(2);
        manager
            .delete_target(&db_name, &target.target_id, after_processing)
            .expect("delete succeeds");
        manager
            .add_target(&db_name, new_target("reused"), after_processing)
            .expect("name is free again");
    }

    #[test]
    fn delete_is_forbidden_while_processing() {
        let manager = manager();
        let database = VuforiaDatabase::new();
        let db_name = database.database_name.clone();
        manager.add_database(database).expect("add succeeds");
        let now = Utc::now();
        let target = manager
            .add_target(&db_name, new_target("busy"), now)
            .expect("target added");
        let err = manager
            .delete_target(&db_name, &target.target_id, now)
            .expect_err("still processing");
        assert!(matches!(err, StoreError::TargetStatusProcessing));
    }

    #[test]
    fn update_requires_success_and_redraws_rating() {
        let manager = manager();
        let database = VuforiaDatabase::new();
        let db_name = database.database_name.clone();
        manager.add_database(database).expect("add succeeds");
        let now = Utc::now();
        let target = manager
            .add_target(&db_name, new_target("versioned"), now)
            .expect("target added");

        let err = manager
            .update_target(&db_name, &target.target_id, TargetUpdate::default(), now)
            .expect_err("still processing");
        assert!(matches!(err, StoreError::TargetStatusNotSuccess));

        let after_processing = now + Duration::seconds(2);
        let updated = manager
            .update_target(
                &db_name,
                &target.target_id,
                TargetUpdate {
                    width: Some(2.5),
                    ..TargetUpdate::default()
                },
                after_processing,
            )
            .expect("update succeeds");
        assert_eq!(updated.width, 2.5);
        assert_ne!(
            updated.processed_tracking_rating,
            target.processed_tracking_rating
        );
        assert_eq!(updated.last_modified_date, after_processing);
        assert_eq!(updated.status(after_processing), TargetStatus::Processing);
    }

    #[test]
    fn update_rejects_colliding_name_but_allows_own() {
        let manager = manager();
        let database = VuforiaDatabase::new();
        let db_name = database.database_name.clone();
        manager.add_database(database).expect("add succeeds");
        let now = Utc::now();
        let first = manager
            .add_target(&db_name, new_target("first"), now)
            .expect("target added");
        manager
            .add_target(&db_name, new_target("second"), now)
            .expect("target added");

        let after_processing = now + Duration::seconds(2);
        let err = manager
            .update_target(
                &db_name,
                &first.target_id,
                TargetUpdate {
                    name: Some("second".to_owned()),
                    ..TargetUpdate::default()
                },
                after_processing,
            )
            .expect_err("name collision");
        assert!(matches!(err, StoreError::TargetNameExists(_)));

        manager
            .update_target(
                &db_name,
                &first.target_id,
                TargetUpdate {
                    name: Some("first".to_owned()),
                    ..TargetUpdate::default()
                },
                after_processing,
            )
            .expect("own name is allowed");
    }

    #[test]
    fn redraw_never_repeats_previous_rating() {
        for previous in 0..=5 {
            for _ in 0..50 {
                assert_ne!(redraw_rating(previous), previous);
            }
        }
    }
}
