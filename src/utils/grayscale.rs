//! Convert rendered color pixels to luminance
//! Y = 0.299*R + 0.587*G + 0.114*B
//! Uses fast integer arithmetic: Y = (76*R + 150*G + 29*B) >> 8
//!
//! Rows are converted in parallel with rayon.

use rayon::prelude::*;

/// Coefficients for grayscale conversion: Y = (76*R + 150*G + 29*B) >> 8
const COEF_R: i32 = 76;
const COEF_G: i32 = 150;
const COEF_B: i32 = 29;

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let lum = (COEF_R * r as i32 + COEF_G * g as i32 + COEF_B * b as i32) >> 8;
    lum.min(255) as u8
}

fn to_grayscale_parallel(pixels: &[u8], width: usize, height: usize, channels: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    if width == 0 || height == 0 {
        return gray;
    }

    // Rows missing from a short input stay black
    gray.par_chunks_mut(width)
        .zip(pixels.par_chunks(width * channels))
        .for_each(|(row, src)| {
            for (out, px) in row.iter_mut().zip(src.chunks_exact(channels)) {
                *out = luma(px[0], px[1], px[2]);
            }
        });

    gray
}

/// Convert RGB to grayscale, one row per rayon task
pub fn rgb_to_grayscale_parallel(rgb: &[u8], width: usize, height: usize) -> Vec<u8> {
    to_grayscale_parallel(rgb, width, height, 3)
}

/// Convert RGBA to grayscale (alpha ignored), one row per rayon task
pub fn rgba_to_grayscale_parallel(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    to_grayscale_parallel(rgba, width, height, 4)
}
