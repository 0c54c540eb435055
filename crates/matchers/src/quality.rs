//! Pixel statistics shared by the status heuristic and the quality rater.

use image::DynamicImage;

/// Mean of the per-channel standard deviations of an image's pixel values.
///
/// Greyscale images contribute one channel, everything else is measured over
/// the RGB channels. Returns `None` when the bytes do not decode as an image.
pub fn mean_channel_stddev(image_content: &[u8]) -> Option<f64> {
    let decoded = image::load_from_memory(image_content).ok()?;
    let stddevs = channel_stddevs(&decoded);
    Some(stddevs.iter().sum::<f64>() / stddevs.len() as f64)
}

fn channel_stddevs(image: &DynamicImage) -> Vec<f64> {
    match image {
        DynamicImage::ImageLuma8(luma) => {
            vec![stddev(luma.pixels().map(|p| f64::from(p.0[0])))]
        }
        other => {
            let rgb = other.to_rgb8();
            (0..3)
                .map(|channel| stddev(rgb.pixels().map(|p| f64::from(p.0[channel]))))
                .collect()
        }
    }
}

fn stddev(values: impl Iterator<Item = f64>) -> f64 {
    let mut count = 0u64;
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    for value in values {
        count += 1;
        sum += value;
        sum_sq += value * value;
    }
    if count == 0 {
        return 0.0;
    }
    let mean = sum / count as f64;
    (sum_sq / count as f64 - mean * mean).max(0.0).sqrt()
}
