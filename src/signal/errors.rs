//! Errors raised while building sampled signals.

use thiserror::Error;

/// Invalid sampling parameters.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SignalError {
    /// The sampling rate must be strictly positive and finite.
    #[error("sampling rate must be positive, got {0} Hz")]
    InvalidSampleRate(f64),

    /// The time window `[start, end)` contains no sampling instant.
    #[error("time window [{start}, {end}) is empty")]
    EmptyWindow { start: f64, end: f64 },

    /// Two sequences that must be sampled on the same instants have different lengths.
    #[error("{samples} samples do not match {times} sampling instants")]
    LengthMismatch { samples: usize, times: usize },
}
