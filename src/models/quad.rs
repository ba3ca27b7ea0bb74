use std::fmt;

use super::Point;

/// Axis-aligned box as reported by a native platform detector
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub right: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl PixelRect {
    /// Create a rectangle from its edges
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Normalize into the four-corner representation
    pub fn to_quad(&self) -> BoundingQuad {
        BoundingQuad {
            top_left: Point::new(self.left, self.top),
            bottom_left: Point::new(self.left, self.bottom),
            top_right: Point::new(self.right, self.top),
            bottom_right: Point::new(self.right, self.bottom),
        }
    }
}

/// Corner points as reported by a library detector, any of which may be missing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawQuad {
    /// Top-left corner
    pub top_left: Option<Point>,
    /// Bottom-left corner
    pub bottom_left: Option<Point>,
    /// Top-right corner
    pub top_right: Option<Point>,
    /// Bottom-right corner
    pub bottom_right: Option<Point>,
}

impl RawQuad {
    /// Build a raw quad with all four corners present
    pub fn complete(quad: BoundingQuad) -> Self {
        Self {
            top_left: Some(quad.top_left),
            bottom_left: Some(quad.bottom_left),
            top_right: Some(quad.top_right),
            bottom_right: Some(quad.bottom_right),
        }
    }

    /// A quad is only usable when every corner is present and finite
    pub fn validate(&self) -> Option<BoundingQuad> {
        let quad = BoundingQuad {
            top_left: self.top_left?,
            bottom_left: self.bottom_left?,
            top_right: self.top_right?,
            bottom_right: self.bottom_right?,
        };
        quad.points().iter().all(Point::is_finite).then_some(quad)
    }
}

/// Four corners of a localized barcode in raster coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingQuad {
    /// Top-left corner
    pub top_left: Point,
    /// Bottom-left corner
    pub bottom_left: Point,
    /// Top-right corner
    pub top_right: Point,
    /// Bottom-right corner
    pub bottom_right: Point,
}

impl BoundingQuad {
    /// Corners in `[top_left, bottom_left, top_right, bottom_right]` order
    pub fn points(&self) -> [Point; 4] {
        [
            self.top_left,
            self.bottom_left,
            self.top_right,
            self.bottom_right,
        ]
    }

    /// Axis-aligned enclosing box of all four corners
    pub fn bounds(&self) -> PixelRect {
        let init = PixelRect::new(
            f32::INFINITY,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NEG_INFINITY,
        );
        self.points().iter().fold(init, |acc, p| PixelRect {
            left: acc.left.min(p.x),
            top: acc.top.min(p.y),
            right: acc.right.max(p.x),
            bottom: acc.bottom.max(p.y),
        })
    }
}

/// Which localization backend produced a detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionSource {
    /// Built-in platform barcode detector
    Native,
    /// General-purpose barcode library
    Library,
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionSource::Native => f.write_str("native"),
            DetectionSource::Library => f.write_str("library"),
        }
    }
}

/// Outcome of one successful localization attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionResult {
    /// Located corners
    pub quad: BoundingQuad,
    /// Backend that found them
    pub source: DetectionSource,
}
