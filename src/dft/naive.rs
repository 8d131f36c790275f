//! Direct O(N²) Discrete Fourier Transform.
//!
//! This is the reference definition
//!
//! ```text
//!     X[k] = Σ_{n=0}^{N-1} x[n] · exp(-2πi · k · n / N)
//! ```
//!
//! evaluated term by term. It serves two purposes:
//! - it is the ground truth the composite transform is checked against,
//! - it computes the small row and column sub-transforms inside the composite transform.

use std::f64::consts::TAU;

use num_complex::Complex64;

/// A direct DFT of a fixed length with its roots of unity precomputed.
///
/// `roots[j] = exp(-2πi · j / len)`. The kernel reads `roots[(k · n) mod len]`, so every
/// twiddle is taken from the same table and no phase is accumulated by repeated products.
#[derive(Debug, Clone)]
pub struct DirectDft {
    roots: Vec<Complex64>,
}

impl DirectDft {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            roots: roots_of_unity(len),
        }
    }

    /// Writes the DFT of `input` into `output`.
    ///
    /// Both slices must have the planned length.
    pub fn process(&self, input: &[Complex64], output: &mut [Complex64]) {
        let len = self.roots.len();
        debug_assert_eq!(input.len(), len);
        debug_assert_eq!(output.len(), len);

        for (k, out) in output.iter_mut().enumerate() {
            *out = input
                .iter()
                .enumerate()
                .map(|(n, &x)| x * self.roots[(k * n) % len])
                .sum();
        }
    }

    /// Transforms `data` in place, using `scratch` as the working buffer.
    pub fn process_in_place(&self, data: &mut [Complex64], scratch: &mut [Complex64]) {
        scratch.copy_from_slice(data);
        self.process(scratch, data);
    }
}

/// The `len` roots of unity `exp(-2πi · j / len)` for `j = 0..len`.
#[must_use]
pub fn roots_of_unity(len: usize) -> Vec<Complex64> {
    (0..len)
        .map(|j| Complex64::from_polar(1.0, -TAU * j as f64 / len as f64))
        .collect()
}

/// Computes the DFT of `x` straight from the definition.
///
/// Returns an empty vector for an empty input.
#[must_use]
pub fn naive_dft(x: &[Complex64]) -> Vec<Complex64> {
    let dft = DirectDft::new(x.len());
    let mut out = vec![Complex64::default(); x.len()];
    dft.process(x, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use rustfft::FftPlanner;

    use super::*;

    fn assert_close(a: &[Complex64], b: &[Complex64], tol: f64) {
        assert_eq!(a.len(), b.len());
        for (i, (x, y)) in a.iter().zip(b).enumerate() {
            assert!((x - y).norm() <= tol, "bin {i}: {x} != {y}");
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(naive_dft(&[]).is_empty());
    }

    #[test]
    fn test_single_sample_is_identity() {
        let x = [Complex64::new(2.5, -1.0)];
        assert_eq!(naive_dft(&x), x.to_vec());
    }

    #[test]
    fn test_two_point_dft() {
        // [a, b] -> [a + b, a - b]
        let x = [Complex64::new(3.0, 1.0), Complex64::new(1.0, -2.0)];
        assert_close(
            &naive_dft(&x),
            &[Complex64::new(4.0, -1.0), Complex64::new(2.0, 3.0)],
            1e-12,
        );
    }

    #[test]
    fn test_roots_of_unity() {
        let roots = roots_of_unity(4);
        assert_close(
            &roots,
            &[
                Complex64::new(1.0, 0.0),
                Complex64::new(0.0, -1.0),
                Complex64::new(-1.0, 0.0),
                Complex64::new(0.0, 1.0),
            ],
            1e-15,
        );
    }

    #[test]
    fn test_matches_rustfft() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut planner = FftPlanner::<f64>::new();

        for len in [1, 2, 3, 5, 8, 12, 31, 64] {
            let x: Vec<Complex64> = (0..len)
                .map(|_| Complex64::new(rng.random(), rng.random()))
                .collect();

            let mut expected = x.clone();
            planner.plan_fft_forward(len).process(&mut expected);

            assert_close(&naive_dft(&x), &expected, 1e-9);
        }
    }

    #[test]
    fn test_in_place_matches_out_of_place() {
        let x: Vec<Complex64> = (0..6).map(|i| Complex64::new(f64::from(i), 1.0)).collect();
        let dft = DirectDft::new(6);

        let mut data = x.clone();
        let mut scratch = vec![Complex64::default(); 6];
        dft.process_in_place(&mut data, &mut scratch);

        assert_eq!(data, naive_dft(&x));
    }
}
