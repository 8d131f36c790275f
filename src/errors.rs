//! Crate-level error type.

use thiserror::Error;

use crate::{compression::errors::CompressionError, dft::ShapeError, signal::SignalError};

/// Any error raised by this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The input does not fit the requested DFT decomposition.
    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// Invalid sampling parameters.
    #[error(transparent)]
    Signal(#[from] SignalError),

    /// Invalid compression parameters or images.
    #[error(transparent)]
    Compression(#[from] CompressionError),
}
