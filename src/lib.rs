//! pdf417_scan - find and read a PDF417 barcode in an arbitrary photo or scan
//!
//! The symbol's position, scale, rotation and contrast are unknown, so the
//! scanner searches a bounded space of (target width, rotation) transforms
//! and retries an external detector and decoder under each one. Every
//! localization and decode attempt is capped by a deadline so the search
//! never stalls its host.
//!
//! The detector and decoder are pluggable capabilities; this crate supplies
//! the search, the deadline racing, the cropping and the fallback policy.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Scan configuration
pub mod config;
/// Decoder capability and result acceptance
pub mod decoder;
/// Localization backends and their priority chain
pub mod detector;
/// Error types
pub mod error;
/// Core data structures (Point, BoundingQuad, RasterBuffer, ...)
pub mod models;
/// The scan orchestrator
pub mod pipeline;
/// Candidate generation and bounded attempts
pub mod search;
/// Helpers for the diagnostics CLI
pub mod tools;
/// Utility functions (cropping, grayscale, rendering)
pub mod utils;

use std::sync::Arc;

pub use config::ScanConfig;
pub use decoder::Decoder;
pub use detector::{LibraryDetector, NativeDetector};
pub use error::{BackendError, ScanError};
pub use models::{
    BarcodeFormat, BoundingQuad, DecodedBarcode, DetectionSource, PixelRect, Point, RasterBuffer,
    RawQuad, Rotation, SourceImage, TransformCandidate,
};
pub use pipeline::Scanner;
pub use utils::render::{ImageRenderer, Renderer};

/// Per-stage counters collected during one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanTelemetry {
    /// Candidates started
    pub candidates_tried: usize,
    /// Renders that failed
    pub render_faults: usize,
    /// Detections from a native detector
    pub native_hits: usize,
    /// Detections from a library detector
    pub library_hits: usize,
    /// Quads discarded for missing or non-finite corners
    pub invalid_quads: usize,
    /// Localization attempts that missed their deadline
    pub localization_timeouts: usize,
    /// Localization attempts that raised or panicked
    pub localization_faults: usize,
    /// Detections whose padded crop had no area
    pub invalid_crops: usize,
    /// Decode attempts started
    pub decode_attempts: usize,
    /// Decode attempts that missed their deadline
    pub decode_timeouts: usize,
    /// Decode attempts that raised or panicked
    pub decode_faults: usize,
    /// Decodes that found nothing
    pub empty_decodes: usize,
    /// Decodes rejected for returning several symbols
    pub ambiguous_decodes: usize,
}

impl ScanTelemetry {
    pub(crate) fn record_hit(&mut self, source: DetectionSource) {
        match source {
            DetectionSource::Native => self.native_hits += 1,
            DetectionSource::Library => self.library_hits += 1,
        }
    }
}

/// Scan `image` with the default renderer and configuration
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use pdf417_scan::{Decoder, LibraryDetector, SourceImage};
///
/// async fn read(
///     image: &SourceImage,
///     detector: Arc<dyn LibraryDetector>,
///     decoder: Arc<dyn Decoder>,
/// ) {
///     match pdf417_scan::scan(image, detector, decoder).await {
///         Ok(barcode) => println!("{}", barcode.text),
///         Err(err) => eprintln!("{err}"),
///     }
/// }
/// ```
pub async fn scan(
    image: &SourceImage,
    library: Arc<dyn LibraryDetector>,
    decoder: Arc<dyn Decoder>,
) -> Result<DecodedBarcode, ScanError> {
    Scanner::new(library, decoder).scan(image).await
}
