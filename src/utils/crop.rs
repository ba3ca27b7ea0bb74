//! Cropping a raster down to a padded detection box

use crate::models::{BoundingQuad, CropRegion, RasterBuffer};

/// Pixels of padding added on every side of a detected quad
pub const DEFAULT_CROP_MARGIN: u32 = 50;

/// Padded enclosing box of `quad`, clamped to a `width` x `height` raster.
///
/// Returns `None` when the clamped box has no area, e.g. a quad lying
/// entirely outside the raster.
pub fn crop_region(
    width: usize,
    height: usize,
    quad: &BoundingQuad,
    margin: u32,
) -> Option<CropRegion> {
    let bounds = quad.bounds();
    let edges = [bounds.left, bounds.top, bounds.right, bounds.bottom];
    if !edges.iter().all(|e| e.is_finite()) {
        return None;
    }

    let margin = margin as f64;
    let clamp = |value: f64, max: usize| value.clamp(0.0, max as f64) as usize;

    let left = clamp((bounds.left as f64).floor() - margin, width);
    let top = clamp((bounds.top as f64).floor() - margin, height);
    let right = clamp((bounds.right as f64).ceil() + margin, width);
    let bottom = clamp((bounds.bottom as f64).ceil() + margin, height);

    if right <= left || bottom <= top {
        return None;
    }

    Some(CropRegion {
        left,
        top,
        width: right - left,
        height: bottom - top,
    })
}

/// Copy the padded detection box out of `raster`
pub fn crop(raster: &RasterBuffer, quad: &BoundingQuad, margin: u32) -> Option<RasterBuffer> {
    crop_region(raster.width(), raster.height(), quad, margin).map(|region| raster.region(region))
}
