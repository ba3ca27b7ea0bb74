use std::fmt;

/// Symbology of a decoded barcode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarcodeFormat {
    /// Standard PDF417
    Pdf417,
    /// MicroPDF417 variant
    MicroPdf417,
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarcodeFormat::Pdf417 => f.write_str("PDF_417"),
            BarcodeFormat::MicroPdf417 => f.write_str("MICRO_PDF_417"),
        }
    }
}

/// A decoded barcode payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBarcode {
    /// Decoded text content
    pub text: String,
    /// Symbology the payload was read from
    pub format: BarcodeFormat,
}

impl DecodedBarcode {
    /// Create a new decoded barcode
    pub fn new(text: impl Into<String>, format: BarcodeFormat) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }

    /// Shorthand for a PDF417 payload
    pub fn pdf417(text: impl Into<String>) -> Self {
        Self::new(text, BarcodeFormat::Pdf417)
    }
}
