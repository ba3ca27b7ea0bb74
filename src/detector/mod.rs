//! Barcode localization
//!
//! Localization finds the corners of a symbol without reading it. Two kinds
//! of backend are supported:
//! - Native platform detectors, tried first, whose failures are silent
//! - Library detectors, whose quads are only trusted when all four corners
//!   are present

/// Detector capability traits and the tagged backend variant
pub mod backend;
/// Priority-ordered, deadline-bounded backend chain
pub mod chain;

pub use backend::{LibraryDetector, LocalizationBackend, Located, NativeDetector};
pub use chain::LocalizationChain;
