//! Scan orchestration
//!
//! For each candidate in order: render, localize under the detection
//! deadline, crop, then decode under the decode deadline. The first unique
//! decode wins. Faults are recovered per candidate; when the candidate list
//! runs out, the most recent fault is surfaced, or `NoSymbolFound` if there
//! was none.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::ScanTelemetry;
use crate::config::ScanConfig;
use crate::decoder::{DecodeVerdict, Decoder, select_unique};
use crate::detector::{LibraryDetector, LocalizationChain, NativeDetector};
use crate::error::ScanError;
use crate::models::{DecodedBarcode, RasterBuffer, SourceImage, TransformCandidate};
use crate::search::bounded::{Bounded, run_bounded};
use crate::search::candidates::generate_candidates;
use crate::utils::crop::crop_region;
use crate::utils::render::{ImageRenderer, Renderer};

/// Search-and-retry PDF417 scanner.
///
/// Holds no per-scan state, so one scanner can serve concurrent scans.
#[derive(Clone)]
pub struct Scanner {
    renderer: Arc<dyn Renderer>,
    localizers: LocalizationChain,
    decoder: Arc<dyn Decoder>,
    config: ScanConfig,
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("localizers", &self.localizers)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Scanner {
    /// Scanner using the reference renderer and default configuration
    pub fn new(library: Arc<dyn LibraryDetector>, decoder: Arc<dyn Decoder>) -> Self {
        Self {
            renderer: Arc::new(ImageRenderer::new()),
            localizers: LocalizationChain::with_library(library),
            decoder,
            config: ScanConfig::default(),
        }
    }

    /// Try a native platform detector before the library detector
    pub fn with_native(mut self, native: Arc<dyn NativeDetector>) -> Self {
        self.localizers.add_native(native);
        self
    }

    /// Replace the renderer
    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Localization backends in the order they are tried
    pub fn localizers(&self) -> &LocalizationChain {
        &self.localizers
    }

    /// Search `image` for a single PDF417 symbol
    pub async fn scan(&self, image: &SourceImage) -> Result<DecodedBarcode, ScanError> {
        self.scan_with_telemetry(image).await.0
    }

    /// Like [`Scanner::scan`] but also reports per-stage counters
    pub async fn scan_with_telemetry(
        &self,
        image: &SourceImage,
    ) -> (Result<DecodedBarcode, ScanError>, ScanTelemetry) {
        let mut telemetry = ScanTelemetry::default();
        let result = self.run(image, &mut telemetry).await;
        (result, telemetry)
    }

    async fn run(
        &self,
        image: &SourceImage,
        telemetry: &mut ScanTelemetry,
    ) -> Result<DecodedBarcode, ScanError> {
        self.config.validate()?;

        let candidates = generate_candidates(
            image.width(),
            &self.config.rotations,
            self.config.width_band_count,
        );
        debug!(
            width = image.width(),
            height = image.height(),
            candidates = candidates.len(),
            "starting PDF417 scan"
        );

        let mut last_fault = None;
        for (index, &candidate) in candidates.iter().enumerate() {
            if index > 0 {
                self.yield_frame().await;
            }
            telemetry.candidates_tried += 1;
            trace!(index, %candidate, "trying candidate");

            match self.attempt(image, candidate, telemetry).await {
                Ok(Some(barcode)) => {
                    info!(index, %candidate, format = %barcode.format, "PDF417 decoded");
                    return Ok(barcode);
                }
                Ok(None) => {}
                Err(fault) => {
                    warn!(index, %candidate, error = %fault, "candidate failed");
                    last_fault = Some(fault);
                }
            }
        }

        debug!(
            candidates = candidates.len(),
            faulted = last_fault.is_some(),
            "candidate space exhausted"
        );
        Err(last_fault.unwrap_or(ScanError::NoSymbolFound {
            candidates: candidates.len(),
        }))
    }

    async fn yield_frame(&self) {
        if self.config.frame_yield.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.config.frame_yield).await;
        }
    }

    async fn attempt(
        &self,
        image: &SourceImage,
        candidate: TransformCandidate,
        telemetry: &mut ScanTelemetry,
    ) -> Result<Option<DecodedBarcode>, ScanError> {
        let raster = match self.render(image, candidate).await {
            Ok(raster) => Arc::new(raster),
            Err(err) => {
                telemetry.render_faults += 1;
                return Err(err);
            }
        };

        let Some(detection) = self
            .localizers
            .locate(&raster, candidate, &self.config, telemetry)
            .await?
        else {
            return Ok(None);
        };

        let Some(region) = crop_region(
            raster.width(),
            raster.height(),
            &detection.quad,
            self.config.crop_margin,
        ) else {
            telemetry.invalid_crops += 1;
            let err = ScanError::InvalidCrop { candidate };
            debug!(backend = %detection.source, error = %err, "skipping candidate");
            return Ok(None);
        };
        let cropped = Arc::new(raster.region(region));
        drop(raster);

        self.decode(cropped, candidate, telemetry).await
    }

    async fn render(
        &self,
        image: &SourceImage,
        candidate: TransformCandidate,
    ) -> Result<RasterBuffer, ScanError> {
        let renderer = Arc::clone(&self.renderer);
        let image = image.clone();
        let rendered =
            tokio::task::spawn_blocking(move || renderer.render(&image, candidate)).await;

        match rendered {
            Ok(Ok(raster)) => Ok(raster),
            Ok(Err(err)) => Err(ScanError::RenderFault {
                candidate,
                message: err.message().to_string(),
            }),
            Err(join_err) => Err(ScanError::RenderFault {
                candidate,
                message: join_err.to_string(),
            }),
        }
    }

    async fn decode(
        &self,
        cropped: Arc<RasterBuffer>,
        candidate: TransformCandidate,
        telemetry: &mut ScanTelemetry,
    ) -> Result<Option<DecodedBarcode>, ScanError> {
        let decoder = Arc::clone(&self.decoder);
        let attempt = async move { decoder.decode(cropped).await };
        telemetry.decode_attempts += 1;

        let deadline = self.config.decode_deadline;
        let message = match run_bounded(attempt, deadline, self.config.abandon_policy).await {
            Bounded::Completed(Ok(results)) => {
                return Ok(self.accept(results, candidate, telemetry));
            }
            Bounded::Expired => {
                telemetry.decode_timeouts += 1;
                debug!(%candidate, deadline_ms = millis(deadline), "decode deadline elapsed");
                return Ok(None);
            }
            Bounded::Completed(Err(err)) => err.message().to_string(),
            Bounded::Crashed(msg) => msg,
        };

        telemetry.decode_faults += 1;
        Err(ScanError::DecodeFault { candidate, message })
    }

    fn accept(
        &self,
        results: Vec<DecodedBarcode>,
        candidate: TransformCandidate,
        telemetry: &mut ScanTelemetry,
    ) -> Option<DecodedBarcode> {
        match select_unique(results) {
            DecodeVerdict::Unique(barcode) => Some(barcode),
            DecodeVerdict::Empty => {
                telemetry.empty_decodes += 1;
                None
            }
            DecodeVerdict::Ambiguous(count) => {
                telemetry.ambiguous_decodes += 1;
                debug!(%candidate, count, "discarding ambiguous decode");
                None
            }
        }
    }
}

fn millis(duration: Duration) -> u64 {
    duration.as_millis().min(u64::MAX as u128) as u64
}
