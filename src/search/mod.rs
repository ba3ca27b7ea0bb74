//! Search-space enumeration and time-bounded attempts
//!
//! - Candidate generation (target width × rotation, rotation-major)
//! - Deadline racing for localization and decode attempts

/// Ordered (width, rotation) candidates
pub mod candidates;
/// Deadline-bounded attempt runner
pub mod bounded;

pub use bounded::{AbandonPolicy, Bounded, run_bounded};
pub use candidates::generate_candidates;
