//! Scripted collaborators for scanner tests.
//!
//! The fake renderer encodes the candidate into the raster it produces: the
//! raster is `target_width` pixels wide and every pixel holds the rotation in
//! quarter turns. Fake detectors read that back to decide what to report.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::{DynamicImage, RgbImage};
use pdf417_scan::{
    BackendError, DecodedBarcode, Decoder, LibraryDetector, NativeDetector, PixelRect, Point,
    RasterBuffer, RawQuad, Renderer, Rotation, SourceImage, TransformCandidate,
};

pub const RASTER_HEIGHT: usize = 64;

/// Source image of the given width; content is irrelevant to the fakes
pub fn source(width: u32) -> SourceImage {
    SourceImage::new(DynamicImage::ImageRgb8(RgbImage::new(width, 4)))
}

/// Rotation a fake raster was rendered with
pub fn rotation_of(raster: &RasterBuffer) -> Rotation {
    let quarter_turns = raster.get(0, 0).unwrap_or(0) as u16;
    Rotation::from_degrees(quarter_turns * 90).unwrap_or(Rotation::Deg0)
}

/// A complete quad well inside any fake raster
pub fn inner_quad() -> RawQuad {
    RawQuad {
        top_left: Some(Point::new(40.0, 20.0)),
        bottom_left: Some(Point::new(40.0, 40.0)),
        top_right: Some(Point::new(80.0, 20.0)),
        bottom_right: Some(Point::new(80.0, 40.0)),
    }
}

type RenderFn = dyn Fn(TransformCandidate) -> Result<(), BackendError> + Send + Sync;

pub struct FakeRenderer {
    calls: Mutex<Vec<TransformCandidate>>,
    check: Box<RenderFn>,
}

impl FakeRenderer {
    pub fn new() -> Arc<Self> {
        Self::failing_when(|_| Ok(()))
    }

    pub fn failing_when(
        check: impl Fn(TransformCandidate) -> Result<(), BackendError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            check: Box::new(check),
        })
    }

    pub fn calls(&self) -> Vec<TransformCandidate> {
        self.calls.lock().unwrap().clone()
    }
}

impl Renderer for FakeRenderer {
    fn render(
        &self,
        _image: &SourceImage,
        candidate: TransformCandidate,
    ) -> Result<RasterBuffer, BackendError> {
        self.calls.lock().unwrap().push(candidate);
        (self.check)(candidate)?;
        let quarter_turns = (candidate.rotation.degrees() / 90) as u8;
        Ok(RasterBuffer::filled(
            candidate.target_width as usize,
            RASTER_HEIGHT,
            quarter_turns,
        ))
    }
}

type LibraryFn = dyn Fn(&RasterBuffer) -> Result<Option<RawQuad>, BackendError> + Send + Sync;

pub struct ScriptedLibrary {
    calls: AtomicUsize,
    script: Box<LibraryFn>,
}

impl ScriptedLibrary {
    pub fn new(
        script: impl Fn(&RasterBuffer) -> Result<Option<RawQuad>, BackendError>
        + Send
        + Sync
        + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            script: Box::new(script),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LibraryDetector for ScriptedLibrary {
    async fn detect(&self, raster: Arc<RasterBuffer>) -> Result<Option<RawQuad>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.script)(&raster)
    }
}

/// Library detector that never answers
pub struct StalledLibrary;

#[async_trait]
impl LibraryDetector for StalledLibrary {
    async fn detect(&self, _raster: Arc<RasterBuffer>) -> Result<Option<RawQuad>, BackendError> {
        std::future::pending().await
    }
}

type NativeFn = dyn Fn(&RasterBuffer) -> Result<Option<PixelRect>, BackendError> + Send + Sync;

pub struct ScriptedNative {
    calls: AtomicUsize,
    script: Box<NativeFn>,
}

impl ScriptedNative {
    pub fn new(
        script: impl Fn(&RasterBuffer) -> Result<Option<PixelRect>, BackendError>
        + Send
        + Sync
        + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            script: Box::new(script),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NativeDetector for ScriptedNative {
    async fn detect(&self, raster: Arc<RasterBuffer>) -> Result<Option<PixelRect>, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.script)(&raster)
    }
}

/// Native detector that never answers
pub struct StalledNative;

#[async_trait]
impl NativeDetector for StalledNative {
    async fn detect(&self, _raster: Arc<RasterBuffer>) -> Result<Option<PixelRect>, BackendError> {
        std::future::pending().await
    }
}

type DecodeFn = dyn Fn(usize, &RasterBuffer) -> Result<Vec<DecodedBarcode>, BackendError> + Send + Sync;

/// Decoder whose answer depends on how many times it has been called
pub struct ScriptedDecoder {
    calls: AtomicUsize,
    seen: Mutex<Vec<(usize, usize)>>,
    script: Box<DecodeFn>,
}

impl ScriptedDecoder {
    pub fn new(
        script: impl Fn(usize, &RasterBuffer) -> Result<Vec<DecodedBarcode>, BackendError>
        + Send
        + Sync
        + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            script: Box::new(script),
        })
    }

    /// Decoder that always reads one payload
    pub fn always(text: &'static str) -> Arc<Self> {
        Self::new(move |_, _| Ok(vec![DecodedBarcode::pdf417(text)]))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Dimensions of every raster handed to the decoder
    pub fn seen(&self) -> Vec<(usize, usize)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Decoder for ScriptedDecoder {
    async fn decode(&self, raster: Arc<RasterBuffer>) -> Result<Vec<DecodedBarcode>, BackendError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((raster.width(), raster.height()));
        (self.script)(call, &raster)
    }
}

/// Decoder that never answers
pub struct StalledDecoder;

#[async_trait]
impl Decoder for StalledDecoder {
    async fn decode(&self, _raster: Arc<RasterBuffer>) -> Result<Vec<DecodedBarcode>, BackendError> {
        std::future::pending().await
    }
}

/// Decoder that panics
pub struct PanickingDecoder;

#[async_trait]
impl Decoder for PanickingDecoder {
    async fn decode(&self, _raster: Arc<RasterBuffer>) -> Result<Vec<DecodedBarcode>, BackendError> {
        panic!("decoder state corrupted")
    }
}
