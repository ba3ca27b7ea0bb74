use std::fmt;

/// Clockwise rotation applied to the source before a detection attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// No rotation
    Deg0,
    /// Quarter turn clockwise
    Deg90,
    /// Half turn
    Deg180,
    /// Three quarter turns clockwise
    Deg270,
}

impl Rotation {
    /// Rotation in degrees
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Parse a degree value; only multiples of a quarter turn are accepted
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees % 360 {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// One (target width, rotation) hypothesis tried during a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransformCandidate {
    /// Width in pixels the source is scaled down to (never up)
    pub target_width: u32,
    /// Rotation applied after scaling
    pub rotation: Rotation,
}

impl TransformCandidate {
    /// Create a new candidate
    pub fn new(target_width: u32, rotation: Rotation) -> Self {
        Self {
            target_width,
            rotation,
        }
    }
}

impl fmt::Display for TransformCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px@{}", self.target_width, self.rotation)
    }
}
