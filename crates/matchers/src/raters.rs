//! Raters for target tracking quality.

use crate::quality::mean_channel_stddev;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Strategy seam: the tracking quality score a target image deserves.
///
/// Scores are in `0..=5`; the pre-processing `-1` value is applied by the
/// target itself, not by raters.
pub trait TargetTrackingRater: Send + Sync {
    fn rate(&self, image_content: &[u8]) -> i32;
}

/// A rater which returns a hardcoded number.
#[derive(Debug, Clone, Copy)]
pub struct HardcodedRater {
    rating: i32,
}

impl HardcodedRater {
    pub fn new(rating: i32) -> Self {
        Self { rating }
    }
}

impl TargetTrackingRater for HardcodedRater {
    fn rate(&self, _image_content: &[u8]) -> i32 {
        self.rating
    }
}

/// A rater which returns a random number in `0..=5`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRater;

impl TargetTrackingRater for RandomRater {
    fn rate(&self, _image_content: &[u8]) -> i32 {
        rand::rng().random_range(0..=5)
    }
}

/// A rater which scores images by how much pixel variation they carry.
///
/// This stands in for the proprietary quality analysis of the real service:
/// flat or undecodable images rate 0, busy high-contrast images rate up to 5.
#[derive(Debug, Clone, Copy, Default)]
pub struct QualityRater;

impl TargetTrackingRater for QualityRater {
    fn rate(&self, image_content: &[u8]) -> i32 {
        let Some(stddev) = mean_channel_stddev(image_content) else {
            tracing::warn!("rating undecodable image as 0");
            return 0;
        };
        // 25.5 steps split the 0..=127.5 stddev range into the five rating
        // bands above zero.
        ((stddev / 25.5).ceil() as i32).clamp(0, 5)
    }
}

/// Target rater choices, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetRaterChoice {
    #[default]
    Quality,
    Perfect,
    Random,
}

impl TargetRaterChoice {
    pub fn to_target_rater(self) -> Arc<dyn TargetTrackingRater> {
        match self {
            TargetRaterChoice::Quality => Arc::new(QualityRater),
            TargetRaterChoice::Perfect => Arc::new(HardcodedRater::new(5)),
            TargetRaterChoice::Random => Arc::new(RandomRater),
        }
    }
}
