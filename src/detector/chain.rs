use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::backend::{LibraryDetector, LocalizationBackend, Located, NativeDetector};
use crate::ScanTelemetry;
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::models::{DetectionResult, DetectionSource, RasterBuffer, TransformCandidate};
use crate::search::bounded::{Bounded, run_bounded};

/// Localization backends in priority order.
///
/// Native detectors are tried before library detectors regardless of the
/// order they were added in; each attempt gets its own deadline.
#[derive(Debug, Clone, Default)]
pub struct LocalizationChain {
    backends: Vec<LocalizationBackend>,
}

impl LocalizationChain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain holding a single library detector
    pub fn with_library(detector: Arc<dyn LibraryDetector>) -> Self {
        let mut chain = Self::new();
        chain.push(LocalizationBackend::Library(detector));
        chain
    }

    /// Add a native detector
    pub fn add_native(&mut self, detector: Arc<dyn NativeDetector>) {
        self.push(LocalizationBackend::Native(detector));
    }

    /// Add a backend, keeping native backends ahead of library ones
    pub fn push(&mut self, backend: LocalizationBackend) {
        let position = match backend.source() {
            DetectionSource::Native => self
                .backends
                .iter()
                .position(|b| b.source() == DetectionSource::Library)
                .unwrap_or(self.backends.len()),
            DetectionSource::Library => self.backends.len(),
        };
        self.backends.insert(position, backend);
    }

    /// Backends in the order they are tried
    pub fn backends(&self) -> &[LocalizationBackend] {
        &self.backends
    }

    /// True when no backend is configured
    pub fn is_empty(&self) -> bool {
        self.backends.is_empty()
    }

    /// Try every backend until one yields a well-formed quad.
    ///
    /// Native failures fall through silently. A library failure is returned
    /// as a fault only when no later backend found anything.
    pub async fn locate(
        &self,
        raster: &Arc<RasterBuffer>,
        candidate: TransformCandidate,
        config: &ScanConfig,
        telemetry: &mut ScanTelemetry,
    ) -> Result<Option<DetectionResult>, ScanError> {
        let mut last_fault = None;

        for backend in &self.backends {
            let source = backend.source();
            let attempt = {
                let backend = backend.clone();
                let raster = Arc::clone(raster);
                async move { backend.locate(raster).await }
            };

            let outcome =
                run_bounded(attempt, config.detection_deadline, config.abandon_policy).await;
            let message = match outcome {
                Bounded::Completed(Ok(Located::Found(quad))) => {
                    telemetry.record_hit(source);
                    trace!(%candidate, backend = %source, ?quad, "barcode localized");
                    return Ok(Some(DetectionResult { quad, source }));
                }
                Bounded::Completed(Ok(Located::Malformed)) => {
                    telemetry.invalid_quads += 1;
                    debug!(%candidate, backend = %source, "discarding quad with missing corners");
                    continue;
                }
                Bounded::Completed(Ok(Located::Nothing)) => continue,
                Bounded::Expired => {
                    telemetry.localization_timeouts += 1;
                    debug!(
                        %candidate,
                        backend = %source,
                        deadline_ms = config.detection_deadline.as_millis() as u64,
                        "localization deadline elapsed"
                    );
                    continue;
                }
                Bounded::Completed(Err(err)) => err.message().to_string(),
                Bounded::Crashed(msg) => msg,
            };

            telemetry.localization_faults += 1;
            match source {
                DetectionSource::Native => {
                    debug!(%candidate, error = %message, "native detector failed, falling through");
                }
                DetectionSource::Library => {
                    warn!(%candidate, error = %message, "library localization failed");
                    last_fault = Some(ScanError::LocalizationFault {
                        backend: source,
                        candidate,
                        message,
                    });
                }
            }
        }

        match last_fault {
            Some(fault) => Err(fault),
            None => Ok(None),
        }
    }
}
