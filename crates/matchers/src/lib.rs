//! Pluggable matching and rating strategies for the VWS emulator.
//!
//! Two strategy seams are defined here:
//!
//! - [`ImageMatcher`]: "do two raw image byte blobs match?" Used by the
//!   duplicates endpoint and by the query engine. Ships with an exact
//!   byte-equality matcher and a perceptual average-hash matcher.
//! - [`TargetTrackingRater`]: "what tracking quality score does this image
//!   deserve?" Used once per target version to assign the 0..=5 rating that
//!   the real service derives from its proprietary quality analysis.
//!
//! Both are selected at startup via the serde-friendly choice enums
//! ([`ImageMatcherChoice`], [`TargetRaterChoice`]) so that configuration
//! files and environment variables can pick an implementation by name.

mod image_matchers;
mod quality;
mod raters;

pub use image_matchers::{
    AverageHashMatcher, ExactMatcher, ImageMatcher, ImageMatcherChoice,
};
pub use quality::mean_channel_stddev;
pub use raters::{
    HardcodedRater, QualityRater, RandomRater, TargetRaterChoice, TargetTrackingRater,
};
