//! Zig-zag ordering of DCT coefficients.
//!
//! The scan walks the anti-diagonals of an `n x n` block from the DC corner outwards,
//! alternating direction: up-right on even diagonals, down-left on odd ones.
//!
//! ```text
//!     0  1  5  6
//!     2  4  7 12
//!     3  8 11 13
//!     9 10 14 15
//! ```
//!
//! Keeping the first `C` cells of the scan keeps the `C` lowest spatial frequencies.

use super::errors::CompressionError;

/// Cells `(row, col)` of an `n x n` block in zig-zag order.
#[must_use]
pub fn zigzag_order(n: usize) -> Vec<(usize, usize)> {
    let mut order = Vec::with_capacity(n * n);
    for diagonal in 0..(2 * n).saturating_sub(1) {
        let first = diagonal.saturating_sub(n - 1);
        let last = diagonal.min(n - 1);
        if diagonal % 2 == 0 {
            // Up-right: start at the bottom of the diagonal.
            order.extend((first..=last).rev().map(|row| (row, diagonal - row)));
        } else {
            // Down-left: start at the top.
            order.extend((first..=last).map(|row| (row, diagonal - row)));
        }
    }
    order
}

/// A 0/1 mask over an `n x n` block keeping the first `retained` zig-zag coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientMask {
    size: usize,
    weights: Vec<f64>,
}

impl CoefficientMask {
    /// The mask keeping the `retained` lowest-frequency coefficients of an `n x n` block.
    pub fn zigzag(retained: usize, n: usize) -> Result<Self, CompressionError> {
        if n == 0 {
            return Err(CompressionError::ZeroBlockSize);
        }
        if retained > n * n {
            return Err(CompressionError::TooManyCoefficients {
                retained,
                available: n * n,
            });
        }

        let mut weights = vec![0.0; n * n];
        for (row, col) in zigzag_order(n).into_iter().take(retained) {
            weights[row * n + col] = 1.0;
        }
        Ok(Self { size: n, weights })
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of coefficients the mask keeps.
    #[must_use]
    pub fn retained(&self) -> usize {
        self.weights.iter().filter(|&&w| w != 0.0).count()
    }

    #[must_use]
    pub fn keeps(&self, row: usize, col: usize) -> bool {
        self.weights[row * self.size + col] != 0.0
    }

    /// Row-major mask values.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Zeroes the coefficients of a row-major block that the mask drops.
    pub fn apply(&self, coefficients: &mut [f64]) {
        debug_assert_eq!(coefficients.len(), self.weights.len());
        for (c, w) in coefficients.iter_mut().zip(&self.weights) {
            *c *= w;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_4x4() {
        let order = zigzag_order(4);
        let mut rank = [[0; 4]; 4];
        for (i, (r, c)) in order.iter().enumerate() {
            rank[*r][*c] = i;
        }
        assert_eq!(
            rank,
            [[0, 1, 5, 6], [2, 4, 7, 12], [3, 8, 11, 13], [9, 10, 14, 15]]
        );
    }

    #[test]
    fn test_order_visits_every_cell_once() {
        for n in 1..10 {
            let mut order = zigzag_order(n);
            assert_eq!(order.len(), n * n);
            order.sort_unstable();
            order.dedup();
            assert_eq!(order.len(), n * n);
        }
        assert!(zigzag_order(0).is_empty());
    }

    #[test]
    fn test_mask_first_coefficients() {
        // The first ten cells of an 8x8 scan fill the first four anti-diagonals.
        let mask = CoefficientMask::zigzag(10, 8).unwrap();
        assert_eq!(mask.retained(), 10);
        for r in 0..8 {
            for c in 0..8 {
                assert_eq!(mask.keeps(r, c), r + c < 4, "cell ({r}, {c})");
            }
        }

        let mask = CoefficientMask::zigzag(3, 8).unwrap();
        assert!(mask.keeps(0, 0) && mask.keeps(0, 1) && mask.keeps(1, 0));
        assert_eq!(mask.retained(), 3);

        let mask = CoefficientMask::zigzag(1, 8).unwrap();
        assert_eq!(mask.weights()[0], 1.0);
        assert_eq!(mask.retained(), 1);
    }

    #[test]
    fn test_mask_bounds() {
        assert_eq!(CoefficientMask::zigzag(0, 8).unwrap().retained(), 0);
        assert_eq!(CoefficientMask::zigzag(64, 8).unwrap().retained(), 64);
        assert_eq!(
            CoefficientMask::zigzag(65, 8),
            Err(CompressionError::TooManyCoefficients {
                retained: 65,
                available: 64
            })
        );
        assert_eq!(
            CoefficientMask::zigzag(1, 0),
            Err(CompressionError::ZeroBlockSize)
        );
    }

    #[test]
    fn test_apply() {
        let mask = CoefficientMask::zigzag(2, 2).unwrap();
        let mut block = [1.0, 2.0, 3.0, 4.0];
        mask.apply(&mut block);
        assert_eq!(block, [1.0, 2.0, 0.0, 0.0]);
    }
}
