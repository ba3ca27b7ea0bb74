use image::GrayImage;

/// Axis-aligned pixel region inside a raster, always non-empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    /// Left edge (inclusive)
    pub left: usize,
    /// Top edge (inclusive)
    pub top: usize,
    /// Region width in pixels
    pub width: usize,
    /// Region height in pixels
    pub height: usize,
}

impl CropRegion {
    /// Right edge (exclusive)
    pub fn right(&self) -> usize {
        self.left + self.width
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> usize {
        self.top + self.height
    }
}

/// Luminance buffer (1 byte per pixel) produced for one transform candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RasterBuffer {
    /// Wrap row-major luminance bytes; `None` if the length does not match
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a buffer with every pixel set to `value`
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width * height],
        }
    }

    /// Get buffer width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get buffer height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw row-major luminance bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Get pixel at (x, y); out-of-range reads return `None`
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// Copy a sub-region into a new independent buffer.
    ///
    /// The region is intersected with the buffer bounds first, so a region
    /// produced by [`crate::utils::crop::crop_region`] is copied verbatim.
    pub fn region(&self, region: CropRegion) -> RasterBuffer {
        let left = region.left.min(self.width);
        let top = region.top.min(self.height);
        let right = region.right().min(self.width);
        let bottom = region.bottom().min(self.height);
        let width = right - left;
        let height = bottom - top;

        let mut pixels = Vec::with_capacity(width * height);
        for y in top..bottom {
            let row = y * self.width;
            pixels.extend_from_slice(&self.pixels[row + left..row + right]);
        }

        RasterBuffer {
            width,
            height,
            pixels,
        }
    }

    /// Convert into an `image` crate buffer (for saving to disk)
    pub fn into_gray_image(self) -> Option<GrayImage> {
        GrayImage::from_raw(self.width as u32, self.height as u32, self.pixels)
    }

    /// Build from an `image` crate luminance buffer
    pub fn from_gray_image(image: GrayImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width: width as usize,
            height: height as usize,
            pixels: image.into_raw(),
        }
    }
}
