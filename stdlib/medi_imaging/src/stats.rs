//! Per-channel colour statistics over a region of interest.

use std::path::Path;

use image::{imageops, DynamicImage, GenericImageView, Rgb, RgbImage};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{ImagingError, Result};
use crate::region::Region;

/// Pixel-to-metric convention: how many pixels span one centimetre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelScale {
    pub pixels_per_cm: f64,
}

impl PixelScale {
    pub const DEFAULT_PIXELS_PER_CM: f64 = 100.0;

    pub fn new(pixels_per_cm: f64) -> Result<Self> {
        if !(pixels_per_cm.is_finite() && pixels_per_cm > 0.0) {
            return Err(ImagingError::InvalidScale(pixels_per_cm));
        }
        Ok(Self { pixels_per_cm })
    }

    /// Physical area in cm² of a `width` x `height` pixel rectangle.
    pub fn area_cm2(&self, width: u32, height: u32) -> f64 {
        let pixels = f64::from(width) * f64::from(height);
        pixels / (self.pixels_per_cm * self.pixels_per_cm)
    }
}

impl Default for PixelScale {
    fn default() -> Self {
        Self {
            pixels_per_cm: Self::DEFAULT_PIXELS_PER_CM,
        }
    }
}

/// Channel order for the `[f64; 3]` arrays below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionStatistics {
    /// Arithmetic mean per RGB channel.
    pub mean: [f64; 3],
    /// Population standard deviation per RGB channel.
    pub std_dev: [f64; 3],
    /// Area of the requested rectangle in cm².
    pub area_cm2: f64,
    /// Pixels that actually fell inside the image.
    pub pixel_count: u64,
}

impl RegionStatistics {
    pub fn mean_of(&self, channel: Channel) -> f64 {
        self.mean[channel as usize]
    }

    pub fn std_dev_of(&self, channel: Channel) -> f64 {
        self.std_dev[channel as usize]
    }
}

/// Statistics of `region` in an RGB image with the default 100 px/cm scale.
pub fn analyze(image: &RgbImage, region: Region) -> Result<RegionStatistics> {
    analyze_with_scale(image, region, PixelScale::default())
}

pub fn analyze_with_scale(
    image: &RgbImage,
    region: Region,
    scale: PixelScale,
) -> Result<RegionStatistics> {
    if region.is_degenerate() {
        return Err(ImagingError::DegenerateRegion {
            width: region.width,
            height: region.height,
        });
    }
    let (width, height) = image.dimensions();
    let clip = region
        .clip_to(width, height)
        .ok_or(ImagingError::EmptyRegion {
            region,
            image_width: width,
            image_height: height,
        })?;

    let crop = imageops::crop_imm(image, clip.x, clip.y, clip.width, clip.height);
    let (mean, std_dev) = channel_moments(&*crop);
    let stats = RegionStatistics {
        mean,
        std_dev,
        area_cm2: scale.area_cm2(region.width, region.height),
        pixel_count: clip.pixel_count(),
    };
    debug!(
        "region {region}: {} pixels, mean {:?}, std {:?}, area {:.4} cm²",
        stats.pixel_count, stats.mean, stats.std_dev, stats.area_cm2
    );
    Ok(stats)
}

/// Like [`analyze_with_scale`] for any decoded image; converts to 8-bit RGB first.
pub fn analyze_dynamic(
    image: &DynamicImage,
    region: Region,
    scale: PixelScale,
) -> Result<RegionStatistics> {
    analyze_with_scale(&image.to_rgb8(), region, scale)
}

/// Loads the image at `path` and analyses `region`.
pub fn analyze_path(
    path: impl AsRef<Path>,
    region: Region,
    scale: PixelScale,
) -> Result<RegionStatistics> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| ImagingError::ImageNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    analyze_dynamic(&image, region, scale)
}

/// Mean and population standard deviation of each channel, in two passes.
fn channel_moments<I>(view: &I) -> ([f64; 3], [f64; 3])
where
    I: GenericImageView<Pixel = Rgb<u8>>,
{
    let n = f64::from(view.width()) * f64::from(view.height());
    let mut sum = [0.0_f64; 3];
    for (_, _, Rgb(px)) in view.pixels() {
        for c in 0..3 {
            sum[c] += f64::from(px[c]);
        }
    }
    let mean = sum.map(|s| s / n);

    let mut sq = [0.0_f64; 3];
    for (_, _, Rgb(px)) in view.pixels() {
        for c in 0..3 {
            let d = f64::from(px[c]) - mean[c];
            sq[c] += d * d;
        }
    }
    let std_dev = sq.map(|s| (s / n).sqrt());
    (mean, std_dev)
}
