//! Barcode decoding
//!
//! Decoding reads the payload of an already-localized, cropped region. The
//! symbology itself is handled by an external [`Decoder`]; this module only
//! decides which of its answers can be trusted.

/// Acceptance policy for decoder output
pub mod policy;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::BackendError;
use crate::models::{DecodedBarcode, RasterBuffer};

pub use policy::{DecodeVerdict, select_unique};

/// External decoder capability.
///
/// Returns every symbol it could read from the cropped raster.
#[async_trait]
pub trait Decoder: Send + Sync {
    /// Decode `raster`
    async fn decode(&self, raster: Arc<RasterBuffer>) -> Result<Vec<DecodedBarcode>, BackendError>;
}
