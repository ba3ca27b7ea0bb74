pub mod barcode;
pub mod candidate;
pub mod point;
pub mod quad;
pub mod raster;
pub mod source;

pub use barcode::{BarcodeFormat, DecodedBarcode};
pub use candidate::{Rotation, TransformCandidate};
pub use point::Point;
pub use quad::{BoundingQuad, DetectionResult, DetectionSource, PixelRect, RawQuad};
pub use raster::{CropRegion, RasterBuffer};
pub use source::SourceImage;
