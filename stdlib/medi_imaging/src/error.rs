use std::path::PathBuf;

use thiserror::Error;

use crate::region::Region;

/// Errors raised by region analysis. All of them are caller precondition
/// failures and are returned unchanged.
#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("image not found or unreadable: {}", path.display())]
    ImageNotFound {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("region {region} has no pixels inside a {image_width}x{image_height} image")]
    EmptyRegion {
        region: Region,
        image_width: u32,
        image_height: u32,
    },
    #[error("region must have positive width and height, got {width}x{height}")]
    DegenerateRegion { width: u32, height: u32 },
    #[error("pixel scale must be a positive finite number, got {0}")]
    InvalidScale(f64),
}

pub type Result<T> = std::result::Result<T, ImagingError>;
