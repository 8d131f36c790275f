use core::fmt::Display;

use serde::Serialize;

use super::errors::CompressionError;

/// Block size and number of retained coefficients for block-DCT compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompressionParameters {
    /// Side length `N` of the square blocks.
    pub block_size: usize,
    /// Number `C` of zig-zag coefficients kept per block, at most `N²`.
    pub retained: usize,
}

impl CompressionParameters {
    pub const fn new(block_size: usize, retained: usize) -> Result<Self, CompressionError> {
        let params = Self {
            block_size,
            retained,
        };
        match params.validate() {
            Ok(()) => Ok(params),
            Err(e) => Err(e),
        }
    }

    /// Checks `N ≥ 1` and `C ≤ N²`.
    pub const fn validate(&self) -> Result<(), CompressionError> {
        if self.block_size == 0 {
            return Err(CompressionError::ZeroBlockSize);
        }
        if self.retained > self.coefficients_per_block() {
            return Err(CompressionError::TooManyCoefficients {
                retained: self.retained,
                available: self.coefficients_per_block(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn coefficients_per_block(&self) -> usize {
        self.block_size * self.block_size
    }

    /// Fraction of coefficients kept, in `[0, 1]`.
    #[must_use]
    pub fn kept_ratio(&self) -> f64 {
        self.retained as f64 / self.coefficients_per_block() as f64
    }
}

impl Default for CompressionParameters {
    fn default() -> Self {
        Self {
            block_size: 8,
            retained: 10,
        }
    }
}

impl Display for CompressionParameters {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{n}x{n} blocks, {c}/{total} coefficients",
            n = self.block_size,
            c = self.retained,
            total = self.coefficients_per_block()
        )
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_validate() {
        assert!(CompressionParameters::new(8, 0).is_ok());
        assert!(CompressionParameters::new(8, 64).is_ok());
        assert_eq!(
            CompressionParameters::new(8, 65),
            Err(CompressionError::TooManyCoefficients {
                retained: 65,
                available: 64
            })
        );
        assert_eq!(
            CompressionParameters::new(0, 0),
            Err(CompressionError::ZeroBlockSize)
        );
        assert!(CompressionParameters::default().validate().is_ok());
    }

    #[test]
    fn test_display() {
        let params = CompressionParameters::new(8, 10).unwrap();
        assert_eq!(params.to_string(), "8x8 blocks, 10/64 coefficients");
    }

    #[test]
    fn test_kept_ratio() {
        let params = CompressionParameters::new(4, 4).unwrap();
        assert!((params.kept_ratio() - 0.25).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn proptest_validate_matches_bounds(n in 0usize..16, c in 0usize..300) {
            let valid = n > 0 && c <= n * n;
            prop_assert_eq!(CompressionParameters::new(n, c).is_ok(), valid);
        }
    }
}
