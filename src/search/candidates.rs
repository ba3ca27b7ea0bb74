//! Transform candidate generation
//!
//! Two base widths seed the search: a "high" band just under the source width
//! and a "low" band at half of it. Each band is then walked upward in small
//! steps; shifting the target width by a couple of pixels changes how the
//! scaler rounds, which is often enough to keep thin bars from being smoothed
//! away. Widths are interleaved high/low and every rotation gets the full
//! width list before the next rotation is tried.

use crate::models::{Rotation, TransformCandidate};

/// Upper bound for the high band
pub const HIGH_BAND_CAP: u32 = 2000;
/// Upper bound for the low band
pub const LOW_BAND_CAP: u32 = 1000;
/// Pixels trimmed off the source width to seed the high band
pub const HIGH_BAND_INSET: u32 = 11;
/// Width increment between successive steps of a band
pub const WIDTH_STEP: u32 = 2;

/// Seed widths `(high, low)` for a source of the given width
pub fn band_seeds(source_width: u32) -> (u32, u32) {
    let high = source_width
        .saturating_sub(HIGH_BAND_INSET)
        .min(HIGH_BAND_CAP)
        .max(1);
    let low = (source_width / 2).min(LOW_BAND_CAP).max(1);
    (high, low)
}

/// Interleaved band widths: `high, low, high+2, low+2, ...`, `count` in total.
///
/// Small sources can collapse both bands onto the same width; duplicates are
/// kept.
pub fn band_widths(source_width: u32, count: usize) -> Vec<u32> {
    let (high, low) = band_seeds(source_width);
    (0..count)
        .map(|i| {
            let seed = if i % 2 == 0 { high } else { low };
            let step = (i / 2) as u32;
            seed.saturating_add(step.saturating_mul(WIDTH_STEP))
        })
        .collect()
}

/// Full ordered candidate list, rotation-major.
///
/// Only the source width shapes the list; height plays no part because the
/// renderer preserves aspect ratio.
pub fn generate_candidates(
    source_width: u32,
    rotations: &[Rotation],
    width_band_count: usize,
) -> Vec<TransformCandidate> {
    let widths = band_widths(source_width, width_band_count);
    rotations
        .iter()
        .flat_map(|&rotation| {
            widths
                .iter()
                .map(move |&width| TransformCandidate::new(width, rotation))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_ROTATIONS, DEFAULT_WIDTH_BAND_COUNT};

    #[test]
    fn test_band_seeds() {
        assert_eq!(band_seeds(1011), (1000, 505));
        assert_eq!(band_seeds(4000), (2000, 1000));
        assert_eq!(band_seeds(2011), (2000, 1000));
        assert_eq!(band_seeds(10), (1, 5));
        assert_eq!(band_seeds(0), (1, 1));
    }

    #[test]
    fn test_band_widths_interleave_and_step() {
        let widths = band_widths(1011, DEFAULT_WIDTH_BAND_COUNT);
        assert_eq!(
            widths,
            vec![1000, 505, 1002, 507, 1004, 509, 1006, 511, 1008, 513, 1010, 515]
        );
    }

    #[test]
    fn test_widths_strictly_increase_within_each_band() {
        for source_width in [13, 64, 640, 1011, 1920, 4032] {
            let widths = band_widths(source_width, DEFAULT_WIDTH_BAND_COUNT);
            let high: Vec<u32> = widths.iter().step_by(2).copied().collect();
            let low: Vec<u32> = widths.iter().skip(1).step_by(2).copied().collect();
            assert!(high.windows(2).all(|w| w[0] < w[1]), "{source_width}");
            assert!(low.windows(2).all(|w| w[0] < w[1]), "{source_width}");
        }
    }

    #[test]
    fn test_candidate_count_and_rotation_major_order() {
        for source_width in [1, 50, 800, 1011, 3000] {
            let candidates =
                generate_candidates(source_width, &DEFAULT_ROTATIONS, DEFAULT_WIDTH_BAND_COUNT);
            assert_eq!(
                candidates.len(),
                DEFAULT_ROTATIONS.len() * DEFAULT_WIDTH_BAND_COUNT
            );
            for (block, rotation) in candidates
                .chunks(DEFAULT_WIDTH_BAND_COUNT)
                .zip(DEFAULT_ROTATIONS)
            {
                assert!(block.iter().all(|c| c.rotation == rotation));
                let widths: Vec<u32> = block.iter().map(|c| c.target_width).collect();
                assert_eq!(widths, band_widths(source_width, DEFAULT_WIDTH_BAND_COUNT));
            }
        }
    }

    #[test]
    fn test_first_candidate_is_high_band_upright() {
        let candidates = generate_candidates(1011, &DEFAULT_ROTATIONS, DEFAULT_WIDTH_BAND_COUNT);
        assert_eq!(candidates[0], TransformCandidate::new(1000, Rotation::Deg0));
        assert_eq!(candidates[12], TransformCandidate::new(1000, Rotation::Deg90));
    }

    #[test]
    fn test_collapsed_bands_keep_duplicates() {
        let widths = band_widths(2, 4);
        assert_eq!(widths, vec![1, 1, 3, 3]);
    }

    #[test]
    fn test_odd_band_count() {
        let widths = band_widths(1011, 3);
        assert_eq!(widths, vec![1000, 505, 1002]);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generate_candidates(777, &DEFAULT_ROTATIONS, 12);
        let b = generate_candidates(777, &DEFAULT_ROTATIONS, 12);
        assert_eq!(a, b);
    }
}
