//! Product images attached to an order

use shipway_types::{Error, Result};

/// Maximum number of product images per order
pub const MAX_IMAGES: usize = 5;

/// A prepared (resized, JPEG-encoded) product image
#[derive(Debug, Clone, PartialEq)]
pub struct ProductImage {
    pub bytes: Vec<u8>,
}

/// Ordered set of product images, capped at [`MAX_IMAGES`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageSet {
    images: Vec<ProductImage>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an image. Fails once the set is full.
    pub fn push(&mut self, image: ProductImage) -> Result<()> {
        if self.images.len() >= MAX_IMAGES {
            return Err(Error::TooManyImages { max: MAX_IMAGES });
        }
        self.images.push(image);
        Ok(())
    }

    /// Remove the image at `index`, if any
    pub fn remove(&mut self, index: usize) -> Option<ProductImage> {
        if index < self.images.len() {
            Some(self.images.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Upload file name for the image at `index`
    pub fn file_name(index: usize) -> String {
        format!("product_{}.jpg", index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductImage> {
        self.images.iter()
    }
}
