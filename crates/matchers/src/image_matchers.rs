//! Matchers for query and duplicate requests.

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Strategy seam: whether one image's content matches another's closely
/// enough to be considered the same target.
pub trait ImageMatcher: Send + Sync {
    fn matches(&self, first_image_content: &[u8], second_image_content: &[u8]) -> bool;
}

/// A matcher which returns whether two images are exactly equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl ImageMatcher for ExactMatcher {
    fn matches(&self, first_image_content: &[u8], second_image_content: &[u8]) -> bool {
        first_image_content == second_image_content
    }
}

/// A perceptual matcher based on 8x8 average hashes.
///
/// Two images match when the Hamming distance between their 64-bit average
/// hashes is within the threshold. Bytes which do not decode as an image
/// never match anything.
#[derive(Debug, Clone, Copy)]
pub struct AverageHashMatcher {
    threshold: u32,
}

impl AverageHashMatcher {
    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }
}

impl ImageMatcher for AverageHashMatcher {
    fn matches(&self, first_image_content: &[u8], second_image_content: &[u8]) -> bool {
        match (
            average_hash(first_image_content),
            average_hash(second_image_content),
        ) {
            (Some(first), Some(second)) => (first ^ second).count_ones() <= self.threshold,
            _ => false,
        }
    }
}

fn average_hash(image_content: &[u8]) -> Option<u64> {
    let decoded = image::load_from_memory(image_content).ok()?;
    let small = decoded.resize_exact(8, 8, FilterType::Triangle).to_luma8();
    let total: u64 = small.pixels().map(|p| u64::from(p.0[0])).sum();
    let mean = total / 64;
    let mut hash = 0u64;
    for (index, pixel) in small.pixels().enumerate() {
        if u64::from(pixel.0[0]) > mean {
            hash |= 1 << index;
        }
    }
    Some(hash)
}

/// Image matcher choices, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImageMatcherChoice {
    Exact,
    #[default]
    AverageHash,
}

impl ImageMatcherChoice {
    /// The default Hamming distance threshold for the average hash matcher.
    const AVERAGE_HASH_THRESHOLD: u32 = 10;

    pub fn to_image_matcher(self) -> Arc<dyn ImageMatcher> {
        match self {
            ImageMatcherChoice::Exact => Arc::new(ExactMatcher),
            ImageMatcherChoice::AverageHash => {
                Arc::new(AverageHashMatcher::new(Self::AVERAGE_HASH_THRESHOLD))
            }
        }
    }
}
