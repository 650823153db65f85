//! Product image preparation
//!
//! Uploaded photos are squashed to a fixed 225×225 thumbnail and re-encoded
//! as JPEG before they are attached to an order.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use shipway_domain::model::{ImageSet, ProductImage};
use shipway_types::{Error, Result};
use std::path::Path;

/// Edge length of a prepared image in pixels
pub const IMAGE_SIZE: u32 = 225;
pub const JPEG_QUALITY: u8 = 90;

/// Resize encoded image bytes to the upload format
pub fn prepare_image(bytes: &[u8]) -> Result<ProductImage> {
    let decoded = image::load_from_memory(bytes)?;
    let resized = decoded.resize_exact(IMAGE_SIZE, IMAGE_SIZE, FilterType::Triangle);
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

    let mut out = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY))?;
    Ok(ProductImage { bytes: out })
}

/// Read and prepare an image file
pub fn prepare_image_file(path: &Path) -> Result<ProductImage> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    prepare_image(&bytes)
}

/// Prepare several image files into an image set, keeping their order
pub fn prepare_image_set(paths: &[impl AsRef<Path>]) -> Result<ImageSet> {
    let mut set = ImageSet::new();
    for path in paths {
        set.push(prepare_image_file(path.as_ref())?)?;
    }
    Ok(set)
}
