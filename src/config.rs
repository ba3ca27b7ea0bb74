//! Scan configuration with environment overrides

use std::time::Duration;

use crate::error::ScanError;
use crate::models::Rotation;
use crate::search::bounded::AbandonPolicy;
use crate::utils::crop::DEFAULT_CROP_MARGIN;

/// One frame at 60 frames/sec; an attempt this short is not perceptible
pub const FRAME_BUDGET: Duration = Duration::from_millis(16);

/// Widths tried per rotation: two bands, six steps each
pub const DEFAULT_WIDTH_BAND_COUNT: usize = 12;

/// Largest accepted width band count
pub const MAX_WIDTH_BAND_COUNT: usize = 256;

/// Rotations tried when none are configured
pub const DEFAULT_ROTATIONS: [Rotation; 3] = [Rotation::Deg0, Rotation::Deg90, Rotation::Deg270];

/// Tunables for a [`crate::Scanner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Deadline for each localization attempt
    pub detection_deadline: Duration,
    /// Deadline for each decode attempt
    pub decode_deadline: Duration,
    /// Rotations tried, in order; each is exhausted before the next
    pub rotations: Vec<Rotation>,
    /// Number of target widths tried per rotation
    pub width_band_count: usize,
    /// Padding in pixels added on every side of a detection before cropping
    pub crop_margin: u32,
    /// Pause between candidates so the host can repaint
    pub frame_yield: Duration,
    /// What happens to an attempt that misses its deadline
    pub abandon_policy: AbandonPolicy,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            detection_deadline: FRAME_BUDGET,
            decode_deadline: FRAME_BUDGET,
            rotations: DEFAULT_ROTATIONS.to_vec(),
            width_band_count: DEFAULT_WIDTH_BAND_COUNT,
            crop_margin: DEFAULT_CROP_MARGIN,
            frame_yield: FRAME_BUDGET,
            abandon_policy: AbandonPolicy::Detach,
        }
    }
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<u64> {
    lookup(name).and_then(|v| v.trim().parse::<u64>().ok())
}

fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<bool> {
    parse_u64(lookup, name).map(|v| v != 0)
}

fn parse_rotations(value: &str) -> Vec<Rotation> {
    value
        .split(',')
        .filter_map(|part| part.trim().parse::<u16>().ok())
        .filter_map(Rotation::from_degrees)
        .collect()
}

impl ScanConfig {
    /// Defaults overridden by `PDF417_*` environment variables.
    ///
    /// Missing or unparsable values keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overridden by values from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(ms) = parse_u64(&lookup, "PDF417_DETECTION_DEADLINE_MS") {
            config.detection_deadline = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, "PDF417_DECODE_DEADLINE_MS") {
            config.decode_deadline = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_u64(&lookup, "PDF417_FRAME_YIELD_MS") {
            config.frame_yield = Duration::from_millis(ms);
        }
        if let Some(count) = parse_u64(&lookup, "PDF417_WIDTH_BANDS") {
            config.width_band_count = count.min(MAX_WIDTH_BAND_COUNT as u64) as usize;
        }
        if let Some(margin) = parse_u64(&lookup, "PDF417_CROP_MARGIN") {
            config.crop_margin = margin.min(u32::MAX as u64) as u32;
        }
        if let Some(rotations) = lookup("PDF417_ROTATIONS") {
            let parsed = parse_rotations(&rotations);
            if !parsed.is_empty() {
                config.rotations = parsed;
            }
        }
        if let Some(abort) = parse_bool(&lookup, "PDF417_ABORT_ON_TIMEOUT") {
            config.abandon_policy = if abort {
                AbandonPolicy::Abort
            } else {
                AbandonPolicy::Detach
            };
        }

        config
    }

    /// Set both attempt deadlines
    pub fn with_deadlines(mut self, detection: Duration, decode: Duration) -> Self {
        self.detection_deadline = detection;
        self.decode_deadline = decode;
        self
    }

    /// Set the rotation order
    pub fn with_rotations(mut self, rotations: impl Into<Vec<Rotation>>) -> Self {
        self.rotations = rotations.into();
        self
    }

    /// Set the number of widths tried per rotation
    pub fn with_width_band_count(mut self, count: usize) -> Self {
        self.width_band_count = count;
        self
    }

    /// Set the crop padding
    pub fn with_crop_margin(mut self, margin: u32) -> Self {
        self.crop_margin = margin;
        self
    }

    /// Set the pause between candidates
    pub fn with_frame_yield(mut self, frame_yield: Duration) -> Self {
        self.frame_yield = frame_yield;
        self
    }

    /// Set the policy for attempts that miss their deadline
    pub fn with_abandon_policy(mut self, policy: AbandonPolicy) -> Self {
        self.abandon_policy = policy;
        self
    }

    /// Number of candidates a full scan will try
    pub fn candidate_count(&self) -> usize {
        self.rotations.len() * self.width_band_count
    }

    /// Reject configurations that could never produce a candidate
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.rotations.is_empty() {
            return Err(ScanError::InvalidConfig("rotation set is empty".into()));
        }
        if self.width_band_count == 0 {
            return Err(ScanError::InvalidConfig(
                "width band count must be positive".into(),
            ));
        }
        if self.width_band_count > MAX_WIDTH_BAND_COUNT {
            return Err(ScanError::InvalidConfig(format!(
                "width band count {} exceeds {MAX_WIDTH_BAND_COUNT}",
                self.width_band_count
            )));
        }
        if self.detection_deadline.is_zero() || self.decode_deadline.is_zero() {
            return Err(ScanError::InvalidConfig(
                "attempt deadlines must be positive".into(),
            ));
        }
        Ok(())
    }
}
