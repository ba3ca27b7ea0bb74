//! Materializing a transform candidate as a luminance raster

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::error::BackendError;
use crate::models::{RasterBuffer, Rotation, SourceImage, TransformCandidate};
use crate::utils::grayscale::rgba_to_grayscale_parallel;

/// Produces the raster for one candidate.
///
/// Rendering is CPU-bound; the scanner runs it on the blocking pool.
pub trait Renderer: Send + Sync {
    /// Scale and rotate `image` as described by `candidate`
    fn render(
        &self,
        image: &SourceImage,
        candidate: TransformCandidate,
    ) -> Result<RasterBuffer, BackendError>;
}

/// Size of the source after scaling to `target_width`.
///
/// Sources already narrower than the target are left at their own size;
/// the aspect ratio is kept and the height never drops below one pixel.
pub fn scaled_dimensions(width: u32, height: u32, target_width: u32) -> (u32, u32) {
    if width <= target_width || width == 0 {
        return (width, height);
    }
    let scaled = (height as u64 * target_width as u64 + width as u64 / 2) / width as u64;
    (target_width, scaled.max(1) as u32)
}

/// Reference renderer backed by the `image` crate
#[derive(Debug, Clone, Copy)]
pub struct ImageRenderer {
    filter: FilterType,
}

impl Default for ImageRenderer {
    fn default() -> Self {
        Self {
            filter: FilterType::Triangle,
        }
    }
}

impl ImageRenderer {
    /// Renderer with smoothing enabled (bilinear)
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different resampling filter
    pub fn with_filter(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Renderer for ImageRenderer {
    fn render(
        &self,
        image: &SourceImage,
        candidate: TransformCandidate,
    ) -> Result<RasterBuffer, BackendError> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(BackendError::new("source image is empty"));
        }

        let source = image.as_dynamic();
        let (scaled_w, scaled_h) = scaled_dimensions(width, height, candidate.target_width);
        let scaled: RgbaImage = if (scaled_w, scaled_h) == (width, height) {
            source.to_rgba8()
        } else {
            imageops::resize(source, scaled_w, scaled_h, self.filter)
        };

        let rotated = match candidate.rotation {
            Rotation::Deg0 => scaled,
            Rotation::Deg90 => imageops::rotate90(&scaled),
            Rotation::Deg180 => imageops::rotate180(&scaled),
            Rotation::Deg270 => imageops::rotate270(&scaled),
        };

        let (out_w, out_h) = (rotated.width() as usize, rotated.height() as usize);
        let gray = rgba_to_grayscale_parallel(rotated.as_raw(), out_w, out_h);
        RasterBuffer::new(out_w, out_h, gray)
            .ok_or_else(|| BackendError::new("rendered raster has unexpected size"))
    }
}
