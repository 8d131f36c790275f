//! Errors for block-DCT compression.

use thiserror::Error;

/// Invalid compression parameters or incompatible images.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionError {
    /// Blocks must have at least one pixel per side.
    #[error("block size must be positive")]
    ZeroBlockSize,

    /// More coefficients were requested than a block holds.
    #[error("cannot retain {retained} coefficients from a block of {available}")]
    TooManyCoefficients { retained: usize, available: usize },

    /// The pixel buffer does not match the declared dimensions.
    #[error("{len} pixels do not form a {width}x{height} image")]
    PixelCountMismatch {
        width: usize,
        height: usize,
        len: usize,
    },

    /// The image cannot hold a single block.
    #[error("a {width}x{height} image has no complete {block_size}x{block_size} block")]
    ImageTooSmall {
        width: usize,
        height: usize,
        block_size: usize,
    },

    /// Two images that must be compared pixel by pixel have different shapes.
    #[error("cannot compare a {0}x{1} image with a {2}x{3} image")]
    DimensionMismatch(usize, usize, usize, usize),
}
