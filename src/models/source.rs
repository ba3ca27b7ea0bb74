use std::sync::Arc;

use image::{DynamicImage, GenericImageView};

/// Caller-owned source image; cloning shares the pixels
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: Arc<DynamicImage>,
}

impl SourceImage {
    /// Wrap a decoded image
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    /// Source width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Source height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying pixels
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}

impl From<DynamicImage> for SourceImage {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}
