use crate::models::DecodedBarcode;

/// How a decoder's answer for one crop is classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeVerdict {
    /// Exactly one symbol; the only accepted outcome
    Unique(DecodedBarcode),
    /// No symbol
    Empty,
    /// Several symbols from one crop, usually noise or fragments
    Ambiguous(usize),
}

/// Accept a decode only when it yielded exactly one symbol
pub fn select_unique(mut results: Vec<DecodedBarcode>) -> DecodeVerdict {
    match results.len() {
        0 => DecodeVerdict::Empty,
        1 => match results.pop() {
            Some(barcode) => DecodeVerdict::Unique(barcode),
            None => DecodeVerdict::Empty,
        },
        n => DecodeVerdict::Ambiguous(n),
    }
}
