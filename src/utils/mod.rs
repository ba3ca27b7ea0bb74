//! Utility functions for image processing
//!
//! This module provides the pixel-level helpers the scanner relies on:
//! - Cropping (padded, clamped detection boxes)
//! - Grayscale conversion (RGB/RGBA to luminance)
//! - Rendering (scale + rotate a source for one candidate)

pub mod crop;
pub mod grayscale;
pub mod render;
