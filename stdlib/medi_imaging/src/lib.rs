//! Region-of-interest colour statistics
//!
//! Given a decoded image and a caller-selected rectangle, computes the mean
//! and population standard deviation of each RGB channel over the pixels in
//! the rectangle, and the rectangle's physical area under a fixed
//! pixel-to-centimetre convention.
//!
//! ```rust,no_run
//! use medi_imaging::{analyze_path, PixelScale, Region};
//!
//! let stats = analyze_path("wound.jpg", Region::new(120, 80, 100, 50), PixelScale::default())?;
//! println!("red std {:.2}, area {:.2} cm²", stats.std_dev[0], stats.area_cm2);
//! # Ok::<(), medi_imaging::ImagingError>(())
//! ```

pub mod error;
pub mod region;
pub mod stats;

pub use error::{ImagingError, Result};
pub use region::{Clipped, Region};
pub use stats::{
    analyze, analyze_dynamic, analyze_path, analyze_with_scale, Channel, PixelScale,
    RegionStatistics,
};
