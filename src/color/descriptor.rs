//! Color descriptor extraction
//!
//! A descriptor is the histogram-weighted mean of each RGB channel: build a
//! 256-bin histogram per channel, then take sum(i * count_i) / sum(count_i).
//! The reduction is deterministic for identical image bytes, which the
//! matcher relies on.

use image::RgbImage;
use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::constants::descriptor::{BINS, CHANNELS};
use crate::error::{RecommendError, Result};

/// Fixed-length color summary of an image, one value per RGB channel
/// in the range [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorDescriptor([f64; CHANNELS]);

impl ColorDescriptor {
    /// Build a descriptor from raw channel values. Intended for tests and
    /// fixture construction; real descriptors come from `from_image`.
    pub fn from_channels(channels: [f64; CHANNELS]) -> Self {
        Self(channels)
    }

    /// Compute the descriptor of a decoded RGB image.
    ///
    /// # Errors
    ///
    /// Returns `RecommendError::ImageLoad` for an image with no pixels.
    pub fn from_image(image: &RgbImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(RecommendError::ImageLoad {
                message: "image has no pixels".into(),
                source: None,
            });
        }

        let histogram = channel_histograms(image);
        let mut channels = [0.0; CHANNELS];
        for (channel, hist) in channels.iter_mut().zip(histogram.iter()) {
            *channel = weighted_mean(hist);
        }
        Ok(Self(channels))
    }

    /// Decode image bytes and compute their descriptor.
    ///
    /// # Errors
    ///
    /// Returns `RecommendError::ImageLoad` if the bytes are not a decodable
    /// image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| RecommendError::image_load("failed to decode image bytes", e))?;
        Self::from_image(&decoded.to_rgb8())
    }

    /// Raw channel values (R, G, B)
    pub fn channels(&self) -> &[f64; CHANNELS] {
        &self.0
    }

    /// Descriptor as a display color
    pub fn mean_color(&self) -> Srgb {
        Srgb::new(
            (self.0[0] / 255.0) as f32,
            (self.0[1] / 255.0) as f32,
            (self.0[2] / 255.0) as f32,
        )
    }

    /// Hex representation of the mean color, for the results page swatch
    pub fn hex(&self) -> String {
        let rgb: Srgb<u8> = self.mean_color().into_format();
        format!("#{:02X}{:02X}{:02X}", rgb.red, rgb.green, rgb.blue)
    }
}

/// Per-channel 256-bin histogram over all pixels
fn channel_histograms(image: &RgbImage) -> [[u64; BINS]; CHANNELS] {
    let mut histogram = [[0u64; BINS]; CHANNELS];
    for pixel in image.pixels() {
        for (channel, hist) in histogram.iter_mut().enumerate() {
            hist[pixel.0[channel] as usize] += 1;
        }
    }
    histogram
}

/// Weighted average bin index of a single-channel histogram
fn weighted_mean(hist: &[u64; BINS]) -> f64 {
    let total: u64 = hist.iter().sum();
    let weighted: f64 = hist
        .iter()
        .enumerate()
        .map(|(value, count)| value as f64 * *count as f64)
        .sum();
    weighted / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid_image(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(color))
    }

    #[test]
    fn test_solid_color_descriptor() {
        let image = solid_image(4, 4, [200, 100, 50]);
        let descriptor = ColorDescriptor::from_image(&image).unwrap();
        assert_eq!(descriptor.channels(), &[200.0, 100.0, 50.0]);
    }

    #[test]
    fn test_descriptor_is_deterministic() {
        let mut image = solid_image(8, 8, [10, 20, 30]);
        image.put_pixel(3, 3, Rgb([250, 0, 125]));

        let first = ColorDescriptor::from_image(&image).unwrap();
        let second = ColorDescriptor::from_image(&image).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_two_pixel_mean() {
        let mut image = solid_image(2, 1, [0, 0, 0]);
        image.put_pixel(1, 0, Rgb([255, 101, 7]));

        let descriptor = ColorDescriptor::from_image(&image).unwrap();
        assert_eq!(descriptor.channels(), &[127.5, 50.5, 3.5]);
    }

    #[test]
    fn test_empty_image_rejected() {
        let image = RgbImage::new(0, 0);
        let err = ColorDescriptor::from_image(&image).unwrap_err();
        assert!(matches!(err, RecommendError::ImageLoad { .. }));
    }

    #[test]
    fn test_from_bytes_round_trip() {
        let image = solid_image(6, 6, [12, 200, 77]);
        let mut bytes = std::io::Cursor::new(Vec::new());
        image
            .write_to(&mut bytes, image::ImageFormat::Png)
            .unwrap();

        let descriptor = ColorDescriptor::from_bytes(bytes.get_ref()).unwrap();
        assert_eq!(descriptor.channels(), &[12.0, 200.0, 77.0]);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let err = ColorDescriptor::from_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, RecommendError::ImageLoad { .. }));
    }

    #[test]
    fn test_hex_swatch() {
        let descriptor = ColorDescriptor::from_channels([255.0, 0.0, 128.0]);
        assert_eq!(descriptor.hex(), "#FF0080");
    }
}
