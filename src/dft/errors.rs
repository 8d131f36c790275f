//! Shape errors for the composite DFT.

use thiserror::Error;

/// The input does not fit the requested `n1 x n2` decomposition.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// The input length differs from `n1 * n2`.
    #[error("input of length {len} cannot be arranged as a {n1}x{n2} grid")]
    LengthMismatch { len: usize, n1: usize, n2: usize },

    /// One of the factors is zero.
    #[error("factorization {n1}x{n2} has a zero factor")]
    ZeroFactor { n1: usize, n2: usize },

    /// `n1 * n2` does not fit in a `usize`.
    #[error("factorization {n1}x{n2} overflows")]
    Overflow { n1: usize, n2: usize },
}
