//! The target value object and its time-derived lifecycle state.

use crate::error::StoreError;
use crate::random_hex;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use matchers::{mean_channel_stddev, TargetTrackingRater};
use serde::{Deserialize, Serialize};

/// Statuses a target moves through after upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetStatus {
    Processing,
    Success,
    Failed,
}

impl TargetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetStatus::Processing => "processing",
            TargetStatus::Success => "success",
            TargetStatus::Failed => "failed",
        }
    }
}

/// Mean channel standard deviation above which processing ends in success.
///
/// How the real service decides this is unknown; it relates to how suitable
/// the image is for detection.
const SUCCESS_STDDEV_THRESHOLD: f64 = 5.0;

/// One version of a recognition target.
///
/// Instances are never mutated once stored; the repository swaps in
/// replacement versions on update and delete. `status` and
/// `tracking_rating` are derived from the stored fields and a supplied
/// `now`, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub target_id: String,
    pub name: String,
    pub width: f64,
    pub image_value: Vec<u8>,
    pub active_flag: bool,
    pub application_metadata: Option<String>,
    pub processing_time_seconds: f64,
    pub upload_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
    pub delete_date: Option<DateTime<Utc>>,
    /// The rating the configured rater assigned to this version's image.
    /// Drawn once so repeated reads are stable.
    pub processed_tracking_rating: i32,
}

impl Target {
    /// Create a fresh target version. The rater is consulted exactly once.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        width: f64,
        image_value: Vec<u8>,
        active_flag: bool,
        application_metadata: Option<String>,
        processing_time_seconds: f64,
        rater: &dyn TargetTrackingRater,
        now: DateTime<Utc>,
    ) -> Self {
        let processed_tracking_rating = rater.rate(&image_value);
        Self {
            target_id: random_hex(),
            name,
            width,
            image_value,
            active_flag,
            application_metadata,
            processing_time_seconds,
            upload_date: now,
            last_modified_date: now,
            delete_date: None,
            processed_tracking_rating,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.delete_date.is_some()
    }

    /// The target's status at `now`.
    ///
    /// Processing holds while `now - last_modified_date` is within the
    /// processing time; afterwards the image quality heuristic decides
    /// between success and failure.
    pub fn status(&self, now: DateTime<Utc>) -> TargetStatus {
        let elapsed = seconds_since(self.last_modified_date, now);
        if elapsed <= self.processing_time_seconds {
            return TargetStatus::Processing;
        }
        self.post_processing_status()
    }

    fn post_processing_status(&self) -> TargetStatus {
        match mean_channel_stddev(&self.image_value) {
            Some(stddev) if stddev > SUCCESS_STDDEV_THRESHOLD => TargetStatus::Success,
            _ => TargetStatus::Failed,
        }
    }

    /// The target's tracking rating at `now`.
    ///
    /// The real service reports -1 for a short period after upload, then the
    /// processed rating even while still processing. The -1 window here is
    /// half the processing time.
    pub fn tracking_rating(&self, now: DateTime<Utc>) -> i32 {
        let elapsed = seconds_since(self.upload_date, now);
        if elapsed <= self.processing_time_seconds / 2.0 {
            return -1;
        }
        self.processed_tracking_rating
    }

    /// Dump this version to a JSON-friendly record.
    pub fn to_dict(&self) -> TargetDict {
        TargetDict {
            name: self.name.clone(),
            width: self.width,
            image_base64: BASE64.encode(&self.image_value),
            active_flag: self.active_flag,
            processing_time_seconds: self.processing_time_seconds,
            application_metadata: self.application_metadata.clone(),
            target_id: self.target_id.clone(),
            last_modified_date: self.last_modified_date.to_rfc3339(),
            delete_date_optional: self.delete_date.map(|date| date.to_rfc3339()),
            upload_date: self.upload_date.to_rfc3339(),
            processed_tracking_rating: self.processed_tracking_rating,
        }
    }

    /// Load a version from a record produced by [`Target::to_dict`].
    pub fn from_dict(dict: &TargetDict) -> Result<Self, StoreError> {
        let image_value = BASE64
            .decode(&dict.image_base64)
            .map_err(|err| StoreError::InvalidRecord(format!("image_base64: {err}")))?;
        let delete_date = dict
            .delete_date_optional
            .as_deref()
            .map(parse_date)
            .transpose()?;
        Ok(Self {
            target_id: dict.target_id.clone(),
            name: dict.name.clone(),
            width: dict.width,
            image_value,
            active_flag: dict.active_flag,
            application_metadata: dict.application_metadata.clone(),
            processing_time_seconds: dict.processing_time_seconds,
            upload_date: parse_date(&dict.upload_date)?,
            last_modified_date: parse_date(&dict.last_modified_date)?,
            delete_date,
            processed_tracking_rating: dict.processed_tracking_rating,
        })
    }
}

fn parse_date(value: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|err| StoreError::InvalidRecord(format!("date {value:?}: {err}")))
}

fn seconds_since(earlier: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - earlier).num_milliseconds() as f64 / 1000.0
}

/// JSON representation of one target version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetDict {
    pub name: String,
    pub width: f64,
    pub image_base64: String,
    pub active_flag: bool,
    pub processing_time_seconds: f64,
    pub application_metadata: Option<String>,
    pub target_id: String,
    pub last_modified_date: String,
    pub delete_date_optional: Option<String>,
    pub upload_date: String,
    pub processed_tracking_rating: i32,
}
