use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BackendError;
use crate::models::{BoundingQuad, DetectionSource, PixelRect, RasterBuffer, RawQuad};

/// Built-in platform barcode detector, when the host offers one.
///
/// Reports an axis-aligned box; failures never abort a scan.
#[async_trait]
pub trait NativeDetector: Send + Sync {
    /// Look for a barcode in `raster`
    async fn detect(&self, raster: Arc<RasterBuffer>) -> Result<Option<PixelRect>, BackendError>;
}

/// General-purpose barcode library detector.
///
/// May report corners it could not place as `None`.
#[async_trait]
pub trait LibraryDetector: Send + Sync {
    /// Look for a barcode in `raster`
    async fn detect(&self, raster: Arc<RasterBuffer>) -> Result<Option<RawQuad>, BackendError>;
}

/// What a single backend reported, normalized to corner form
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Located {
    /// A well-formed quad
    Found(BoundingQuad),
    /// Something was reported but a corner is missing or not finite
    Malformed,
    /// Nothing was reported
    Nothing,
}

/// One localization capability
#[derive(Clone)]
pub enum LocalizationBackend {
    /// Platform detector
    Native(Arc<dyn NativeDetector>),
    /// Library detector
    Library(Arc<dyn LibraryDetector>),
}

impl std::fmt::Debug for LocalizationBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LocalizationBackend::{}", self.source())
    }
}

impl LocalizationBackend {
    /// Tag recorded on detections from this backend
    pub fn source(&self) -> DetectionSource {
        match self {
            LocalizationBackend::Native(_) => DetectionSource::Native,
            LocalizationBackend::Library(_) => DetectionSource::Library,
        }
    }

    /// Run the backend and normalize its answer
    pub async fn locate(&self, raster: Arc<RasterBuffer>) -> Result<Located, BackendError> {
        let located = match self {
            LocalizationBackend::Native(detector) => match detector.detect(raster).await? {
                Some(rect) => {
                    let quad = rect.to_quad();
                    if quad.points().iter().all(|p| p.is_finite()) {
                        Located::Found(quad)
                    } else {
                        Located::Malformed
                    }
                }
                None => Located::Nothing,
            },
            LocalizationBackend::Library(detector) => match detector.detect(raster).await? {
                Some(raw) => raw.validate().map_or(Located::Malformed, Located::Found),
                None => Located::Nothing,
            },
        };
        Ok(located)
    }
}
