//! Helpers shared by the diagnostics CLI

use crate::config::ScanConfig;
use crate::error::{BackendError, ScanError};
use crate::models::{BoundingQuad, Point, RasterBuffer, SourceImage, TransformCandidate};
use crate::search::candidates::generate_candidates;
use crate::utils::render::Renderer;
use image::GenericImageView;
use rayon::prelude::*;
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn max_dim_from_env() -> Option<u32> {
    match env::var("PDF417_MAX_DIM") {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Install a `tracing` subscriber honoring `RUST_LOG` (default `info`)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Load an image from disk, downscaled to `PDF417_MAX_DIM` when set
pub fn load_source<P: AsRef<Path>>(path: P) -> Result<SourceImage, ScanError> {
    let img = image::open(path)?;
    let img = match max_dim_from_env() {
        Some(max_dim) if img.width().max(img.height()) > max_dim => {
            img.resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
        }
        _ => img,
    };
    Ok(SourceImage::new(img))
}

/// Candidates a scan of `image` would try under `config`
pub fn candidate_plan(image: &SourceImage, config: &ScanConfig) -> Vec<TransformCandidate> {
    generate_candidates(image.width(), &config.rotations, config.width_band_count)
}

/// Render the first `limit` planned candidates (all when `None`) in
/// parallel, preserving plan order
pub fn render_plan(
    image: &SourceImage,
    config: &ScanConfig,
    renderer: &dyn Renderer,
    limit: Option<usize>,
) -> Vec<(TransformCandidate, Result<RasterBuffer, BackendError>)> {
    let mut plan = candidate_plan(image, config);
    if let Some(limit) = limit {
        plan.truncate(limit);
    }
    plan.into_par_iter()
        .map(|candidate| (candidate, renderer.render(image, candidate)))
        .collect()
}

/// Save a raster as an 8-bit grayscale image; format follows the extension
pub fn write_raster<P: AsRef<Path>>(raster: RasterBuffer, path: P) -> Result<(), ScanError> {
    let image = raster.into_gray_image().ok_or_else(|| {
        ScanError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "raster size does not match its pixel data",
        ))
    })?;
    image.save(path)?;
    Ok(())
}

/// File name used when dumping a candidate raster
pub fn candidate_file_name(index: usize, candidate: TransformCandidate) -> String {
    format!(
        "{index:03}_w{}_r{}.png",
        candidate.target_width,
        candidate.rotation.degrees()
    )
}

/// Parse `tlx,tly,blx,bly,trx,try,brx,bry` into a quad
pub fn parse_quad(text: &str) -> Option<BoundingQuad> {
    let values: Vec<f32> = text
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .ok()?;
    if values.len() != 8 {
        return None;
    }
    Some(BoundingQuad {
        top_left: Point::new(values[0], values[1]),
        bottom_left: Point::new(values[2], values[3]),
        top_right: Point::new(values[4], values[5]),
        bottom_right: Point::new(values[6], values[7]),
    })
}

/// Summary statistics for raster luminance.
#[derive(Debug, Clone, Copy)]
pub struct RasterStats {
    /// Minimum luminance value.
    pub min: u8,
    /// Maximum luminance value.
    pub max: u8,
    /// Average luminance value.
    pub avg: u8,
}

/// Compute min/max/avg luminance of a raster.
pub fn raster_stats(raster: &RasterBuffer) -> RasterStats {
    let pixels = raster.pixels();
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    for &v in pixels {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
    }
    let avg = if pixels.is_empty() {
        0
    } else {
        (sum / pixels.len() as u64) as u8
    };
    RasterStats { min, max, avg }
}
