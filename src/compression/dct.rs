//! Orthonormal 2D DCT-II and its inverse for square blocks.
//!
//! Same scaling as OpenCV's `dct`/`idct`: the basis is orthonormal, so the inverse is the
//! transpose and energy is preserved.

use std::f64::consts::PI;

/// Cosine basis of an `n`-point DCT.
///
/// `table[k * n + i] = cos(π · (2i + 1) · k / 2n)`, and `alpha[k]` is the orthonormal
/// scale: `sqrt(1/n)` for `k = 0`, `sqrt(2/n)` otherwise.
#[derive(Debug, Clone)]
pub struct CosineTable {
    n: usize,
    table: Vec<f64>,
    alpha: Vec<f64>,
}

impl CosineTable {
    #[must_use]
    pub fn new(n: usize) -> Self {
        let nf = n as f64;
        let alpha = (0..n)
            .map(|k| if k == 0 { (1.0 / nf).sqrt() } else { (2.0 / nf).sqrt() })
            .collect();
        let table = (0..n)
            .flat_map(|k| {
                (0..n).map(move |i| (PI * (2.0 * i as f64 + 1.0) * k as f64 / (2.0 * nf)).cos())
            })
            .collect();

        Self { n, table, alpha }
    }

    /// Side length of the blocks this table transforms.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.n
    }

    /// 1D DCT-II.
    pub fn dct1d(&self, input: &[f64], output: &mut [f64]) {
        let n = self.n;
        for (k, out) in output.iter_mut().enumerate().take(n) {
            let basis = &self.table[k * n..(k + 1) * n];
            let sum: f64 = input.iter().zip(basis).map(|(x, c)| x * c).sum();
            *out = self.alpha[k] * sum;
        }
    }

    /// 1D DCT-III, the inverse of [`Self::dct1d`].
    pub fn idct1d(&self, input: &[f64], output: &mut [f64]) {
        let n = self.n;
        for (i, out) in output.iter_mut().enumerate().take(n) {
            *out = (0..n)
                .map(|k| self.alpha[k] * input[k] * self.table[k * n + i])
                .sum();
        }
    }

    /// 2D DCT-II of a row-major `n x n` block: rows first, then columns.
    #[must_use]
    pub fn dct2(&self, block: &[f64]) -> Vec<f64> {
        self.separable(block, Self::dct1d)
    }

    /// 2D inverse DCT of a row-major `n x n` block.
    #[must_use]
    pub fn idct2(&self, block: &[f64]) -> Vec<f64> {
        self.separable(block, Self::idct1d)
    }

    /// Applies a 1D transform to every row, then to every column.
    ///
    /// The two passes commute, so the same order serves the forward and inverse transforms.
    fn separable(&self, block: &[f64], pass: fn(&Self, &[f64], &mut [f64])) -> Vec<f64> {
        let n = self.n;
        debug_assert_eq!(block.len(), n * n);

        let mut rows = vec![0.0; n * n];
        for (src, dst) in block.chunks_exact(n).zip(rows.chunks_exact_mut(n)) {
            pass(self, src, dst);
        }

        let mut result = vec![0.0; n * n];
        let mut column = vec![0.0; n];
        let mut transformed = vec![0.0; n];
        for c in 0..n {
            for (r, value) in column.iter_mut().enumerate() {
                *value = rows[r * n + c];
            }
            pass(self, &column, &mut transformed);
            for (r, &value) in transformed.iter().enumerate() {
                result[r * n + c] = value;
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_constant_block_has_only_dc() {
        let table = CosineTable::new(8);
        let coeffs = table.dct2(&[0.5; 64]);

        // DC of an orthonormal 8x8 DCT is 8 * mean.
        assert!((coeffs[0] - 4.0).abs() < 1e-12);
        assert!(coeffs[1..].iter().all(|c| c.abs() < 1e-12));
    }

    #[test]
    fn test_inverse_restores_block() {
        let mut rng = StdRng::seed_from_u64(0);
        let table = CosineTable::new(8);
        let block: Vec<f64> = (0..64).map(|_| rng.random()).collect();

        let restored = table.idct2(&table.dct2(&block));
        for (a, b) in restored.iter().zip(&block) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_energy_is_preserved() {
        let mut rng = StdRng::seed_from_u64(1);
        let table = CosineTable::new(4);
        let block: Vec<f64> = (0..16).map(|_| rng.random_range(-1.0..1.0)).collect();

        let energy = |v: &Vec<f64>| v.iter().map(|x| x * x).sum::<f64>();
        assert!((energy(&block) - energy(&table.dct2(&block))).abs() < 1e-12);
    }

    #[test]
    fn test_two_point_basis() {
        // n = 2: [a, b] -> [(a + b) / √2, (a - b) / √2]
        let table = CosineTable::new(2);
        let mut out = [0.0; 2];
        table.dct1d(&[3.0, 1.0], &mut out);

        let s = std::f64::consts::SQRT_2;
        assert!((out[0] - 4.0 / s).abs() < 1e-12);
        assert!((out[1] - 2.0 / s).abs() < 1e-12);
    }
}
