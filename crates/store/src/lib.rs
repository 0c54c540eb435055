//! Data model and in-memory repository for the VWS emulator.
//!
//! This is where the emulated service's state lives. The shape follows the
//! real service's target manager:
//!
//! - A [`VuforiaDatabase`] is the unit of tenant isolation: one credential
//!   set (server pair for the management API, client pair for the query API)
//!   plus its collection of [`Target`]s and constant quota counters.
//! - A [`Target`] is an immutable-per-version value object. Updates and
//!   deletes never mutate a stored target in place; they swap in a
//!   replacement version. Deletion is a tombstone (`delete_date` set) so the
//!   query engine can apply its post-delete grace window.
//! - The [`TargetManager`] holds every database behind one coarse mutex and
//!   enforces the cross-database credential uniqueness invariant and the
//!   per-database name uniqueness invariant atomically.
//!
//! Target `status` and `tracking_rating` are **derived**, not stored: both
//! are pure functions of the target's fields and a caller-supplied `now`,
//! which keeps time injectable for tests.

mod database;
mod error;
mod manager;
mod states;
mod target;

pub use database::{DatabaseDict, VuforiaDatabase};
pub use error::StoreError;
pub use manager::{NewTarget, TargetManager, TargetUpdate};
pub use states::DatabaseState;
pub use target::{Target, TargetDict, TargetStatus};

use uuid::Uuid;

/// Random 32-char lowercase hex value, the shape the real service uses for
/// credentials, target ids, and transaction ids.
pub fn random_hex() -> String {
    Uuid::new_v4().simple().to_string()
}
