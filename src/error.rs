//! Error types surfaced by the scanner and its collaborators

use thiserror::Error;

use crate::models::{DetectionSource, TransformCandidate};

/// Failure reported by an external collaborator (renderer, detector, decoder)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    /// Create an error from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Capture the display text of any error
    pub fn from_error<E: std::error::Error>(err: &E) -> Self {
        Self::new(err.to_string())
    }

    /// Error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for BackendError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for BackendError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Errors returned by a scan
#[derive(Debug, Error)]
pub enum ScanError {
    /// Every candidate was tried without a unique decode and no fault occurred
    #[error("no PDF417 symbol found after {candidates} candidates")]
    NoSymbolFound {
        /// Number of candidates attempted
        candidates: usize,
    },

    /// A localization backend raised during one candidate
    #[error("{backend} localization failed at {candidate}: {message}")]
    LocalizationFault {
        /// Backend that failed
        backend: DetectionSource,
        /// Candidate being tried
        candidate: TransformCandidate,
        /// Collaborator message
        message: String,
    },

    /// The decoder raised during one candidate
    #[error("decode failed at {candidate}: {message}")]
    DecodeFault {
        /// Candidate being tried
        candidate: TransformCandidate,
        /// Collaborator message
        message: String,
    },

    /// The renderer could not materialize a candidate
    #[error("render failed at {candidate}: {message}")]
    RenderFault {
        /// Candidate being rendered
        candidate: TransformCandidate,
        /// Collaborator message
        message: String,
    },

    /// The padded and clamped crop around a detection has no area
    #[error("crop around detection at {candidate} is empty")]
    InvalidCrop {
        /// Candidate whose detection degenerated
        candidate: TransformCandidate,
    },

    /// Rejected scan configuration
    #[error("invalid scan configuration: {0}")]
    InvalidConfig(String),

    /// Image could not be loaded or written
    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// Filesystem error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScanError {
    /// True for the terminal "searched everything, found nothing" outcome
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScanError::NoSymbolFound { .. })
    }

    /// True for faults raised by a collaborator during a candidate attempt
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            ScanError::LocalizationFault { .. }
                | ScanError::DecodeFault { .. }
                | ScanError::RenderFault { .. }
        )
    }
}
