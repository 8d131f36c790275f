//! # Composite DFT
//!
//! This module computes the Discrete Fourier Transform of a sequence whose length factors
//! as $N = N_1 \cdot N_2$, by splitting it into $N_1$ transforms of size $N_2$ and $N_2$
//! transforms of size $N_1$ (the two-factor Cooley-Tukey decomposition).
//!
//! ## Algorithm Overview
//!
//! Write the input index as $n = n_1 + N_1 n_2$ and the output index as $k = k_1 N_2 + k_2$.
//! Expanding the exponent of $\omega_N^{nk}$ and dropping the multiples of $N$ gives
//!
//! $$ X_{k_1 N_2 + k_2} = \sum_{n_1} \omega_{N_1}^{n_1 k_1} \, \omega_N^{n_1 k_2} \sum_{n_2} x_{n_1 + N_1 n_2} \, \omega_{N_2}^{n_2 k_2} $$
//!
//! which is evaluated in five steps:
//!
//! 1.  **Decimation**: arrange the input as an $N_1 \times N_2$ grid, row $n_1$ holding every
//!     $N_1$-th sample starting at offset $n_1$.
//! 2.  **Row DFTs**: an $N_2$-point DFT along each row.
//! 3.  **Twiddle factors**: multiply cell $(n_1, k_2)$ by $\omega_N^{n_1 k_2}$.
//! 4.  **Column DFTs**: an $N_1$-point DFT along each column.
//! 5.  **Re-indexing**: cell $(k_1, k_2)$ holds output bin $k_1 N_2 + k_2$.
//!
//! Any factorization works, the factors need not be coprime or prime. With $N_1 = 1$ or
//! $N_2 = 1$ one stage is a length-1 transform and the twiddle grid is all ones.

use itertools::iproduct;
use num_complex::Complex64;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

use super::{
    errors::ShapeError,
    grid::ComplexGrid,
    naive::{DirectDft, roots_of_unity},
};

/// A composite DFT plan for a fixed `n1 x n2` factorization.
///
/// Holds the two sub-transforms and the twiddle grid, so one plan can process any number
/// of inputs of length `n1 * n2`. A plan is immutable once built and can be shared
/// between threads.
#[derive(Debug, Clone)]
pub struct CompositeDft {
    /// Number of rows of the decimation grid (the stride of the decimation).
    n1: usize,
    /// Number of columns of the decimation grid.
    n2: usize,
    /// `n2`-point transform applied to each row.
    row_dft: DirectDft,
    /// `n1`-point transform applied to each column.
    column_dft: DirectDft,
    /// `W[n1, k2] = exp(-2πi · n1 · k2 / N)`.
    twiddles: ComplexGrid,
}

impl CompositeDft {
    /// Builds the plan for a `n1 x n2` decomposition.
    pub fn new(n1: usize, n2: usize) -> Result<Self, ShapeError> {
        if n1 == 0 || n2 == 0 {
            return Err(ShapeError::ZeroFactor { n1, n2 });
        }
        let n = n1
            .checked_mul(n2)
            .ok_or(ShapeError::Overflow { n1, n2 })?;

        // ## Twiddle grid
        //
        // The exponent `n1 * k2` is reduced modulo `N` and looked up in a single table of the
        // `N`-th roots of unity.
        //
        // ### Example with N=6 (n1=2, n2=3)
        // `[ ω_6^{0 * 0}, ω_6^{0 * 1}, ω_6^{0 * 2} ]`  <- n1=0
        // `[ ω_6^{1 * 0}, ω_6^{1 * 1}, ω_6^{1 * 2} ]`  <- n1=1
        //
        // The first row is always ones, and so is the first column.
        let roots = roots_of_unity(n);
        let twiddles = ComplexGrid::from_fn(n1, n2, |row, k2| roots[(row * k2) % n]);

        Ok(Self {
            n1,
            n2,
            row_dft: DirectDft::new(n2),
            column_dft: DirectDft::new(n1),
            twiddles,
        })
    }

    /// Builds a plan for length `n` using the most balanced factorization.
    ///
    /// See [`balanced_factors`].
    pub fn for_len(n: usize) -> Result<Self, ShapeError> {
        let (n1, n2) = balanced_factors(n);
        Self::new(n1, n2)
    }

    #[must_use]
    pub const fn n1(&self) -> usize {
        self.n1
    }

    #[must_use]
    pub const fn n2(&self) -> usize {
        self.n2
    }

    /// The transform length `N = n1 * n2`.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.n1 * self.n2
    }

    /// The output bin held by cell `(k1, k2)` after the column DFTs.
    #[must_use]
    pub const fn bin_index(&self, k1: usize, k2: usize) -> usize {
        k1 * self.n2 + k2
    }

    /// Computes the DFT of `x`.
    ///
    /// Fails with [`ShapeError::LengthMismatch`] when `x.len() != n1 * n2`, before doing any
    /// work. The output is in natural bin order: bin 0 is the DC component.
    #[instrument(skip_all, fields(n1 = self.n1, n2 = self.n2), level = "debug")]
    pub fn process(&self, x: &[Complex64]) -> Result<Vec<Complex64>, ShapeError> {
        let (n1, n2) = (self.n1, self.n2);
        if x.len() != self.len() {
            return Err(ShapeError::LengthMismatch {
                len: x.len(),
                n1,
                n2,
            });
        }

        // ## Decimation
        //
        // Row `n1` gathers the samples `x[n1], x[n1 + N1], x[n1 + 2 N1], ...`.
        //
        // ### Example with N=6 (n1=2, n2=3)
        // Input `[x0, x1, x2, x3, x4, x5]` becomes
        // `[ x0, x2, x4 ]`  <-- n1=0
        // `[ x1, x3, x5 ]`  <-- n1=1
        let mut grid = ComplexGrid::from_fn(n1, n2, |row, col| x[row + n1 * col]);

        // ## Row DFTs
        //
        // $$ Y_{n_1, k_2} = \sum_{n_2=0}^{N_2-1} X_{n_1, n_2} \cdot \omega_{N_2}^{n_2 k_2} $$
        //
        // Each row is contiguous, so it is transformed in place.
        let mut scratch = vec![Complex64::default(); n2];
        for row in grid.rows_mut() {
            self.row_dft.process_in_place(row, &mut scratch);
        }

        // ## Twiddle factors
        //
        // $$ Z_{n_1, k_2} = Y_{n_1, k_2} \cdot \omega_N^{n_1 k_2} $$
        //
        // The row DFTs treated every row as if it started at offset 0. This restores the
        // phase of offset `n1` at frequency `k2`, which is what lets the two smaller
        // transforms recombine into the `N`-point one.
        grid.hadamard_in_place(&self.twiddles);

        // ## Column DFTs
        //
        // $$ Z'_{k_1, k_2} = \sum_{n_1=0}^{N_1-1} Z_{n_1, k_2} \cdot \omega_{N_1}^{n_1 k_1} $$
        //
        // Columns are strided in the row-major grid: gather, transform, scatter.
        let mut column = vec![Complex64::default(); n1];
        let mut transformed = vec![Complex64::default(); n1];
        for k2 in 0..n2 {
            grid.read_column(k2, &mut column);
            self.column_dft.process(&column, &mut transformed);
            grid.write_column(k2, &transformed);
        }

        // ## Re-indexing
        //
        // Cell `(k1, k2)` holds bin `k = k1 * N2 + k2`. Note this is *not* `k1 + N1 * k2`:
        // the decimation stride on the input side becomes the block size on the output side.
        //
        // ### Example with N=6 (n1=2, n2=3)
        // `[ Z'_{0,0}, Z'_{0,1}, Z'_{0,2} ]`  -> bins 0, 1, 2
        // `[ Z'_{1,0}, Z'_{1,1}, Z'_{1,2} ]`  -> bins 3, 4, 5
        let mut out = vec![Complex64::default(); self.len()];
        for (k1, k2) in iproduct!(0..n1, 0..n2) {
            out[self.bin_index(k1, k2)] = grid.get(k1, k2);
        }

        Ok(out)
    }

    /// Computes the inverse DFT of `spectrum`.
    ///
    /// Uses `IDFT(X) = conj(DFT(conj(X))) / N`, so the same forward machinery is reused.
    pub fn inverse(&self, spectrum: &[Complex64]) -> Result<Vec<Complex64>, ShapeError> {
        let conjugated: Vec<_> = spectrum.iter().map(Complex64::conj).collect();
        let scale = 1.0 / self.len() as f64;

        Ok(self
            .process(&conjugated)?
            .into_iter()
            .map(|v| v.conj() * scale)
            .collect())
    }
}

/// Splits `n` into `(n1, n2)` with `n1 <= n2`, `n1 * n2 = n` and `n1` as large as possible.
///
/// A prime `n` yields `(1, n)`. `n = 0` yields `(0, 0)`, which no plan accepts.
#[must_use]
pub fn balanced_factors(n: usize) -> (usize, usize) {
    if n == 0 {
        return (0, 0);
    }
    let n1 = (1..=n.isqrt())
        .rev()
        .find(|d| n % d == 0)
        .unwrap_or(1);
    (n1, n / n1)
}

/// Computes the DFT of `x` through a `n1 x n2` decomposition.
///
/// Fails with a [`ShapeError`] when `x.len() != n1 * n2`.
pub fn transform(x: &[Complex64], n1: usize, n2: usize) -> Result<Vec<Complex64>, ShapeError> {
    check_shape(x.len(), n1, n2)?;
    CompositeDft::new(n1, n2)?.process(x)
}

/// Same as [`transform`] for real-valued samples. The output is complex.
pub fn transform_real(x: &[f64], n1: usize, n2: usize) -> Result<Vec<Complex64>, ShapeError> {
    check_shape(x.len(), n1, n2)?;
    let promoted: Vec<_> = x.iter().map(|&re| Complex64::new(re, 0.0)).collect();
    CompositeDft::new(n1, n2)?.process(&promoted)
}

/// Transforms a batch of independent sequences with a shared plan.
///
/// Every input must have length `n1 * n2`. With the `parallel` feature the inputs are
/// spread over the rayon thread pool.
pub fn transform_batch(
    inputs: &[Vec<Complex64>],
    n1: usize,
    n2: usize,
) -> Result<Vec<Vec<Complex64>>, ShapeError> {
    let plan = CompositeDft::new(n1, n2)?;

    #[cfg(feature = "parallel")]
    let outputs = inputs.par_iter().map(|x| plan.process(x)).collect();

    #[cfg(not(feature = "parallel"))]
    let outputs = inputs.iter().map(|x| plan.process(x)).collect();

    outputs
}

/// Length check done before the plan (and its twiddle table) is built.
const fn check_shape(len: usize, n1: usize, n2: usize) -> Result<(), ShapeError> {
    if n1 == 0 || n2 == 0 {
        return Err(ShapeError::ZeroFactor { n1, n2 });
    }
    match n1.checked_mul(n2) {
        Some(n) if n == len => Ok(()),
        _ => Err(ShapeError::LengthMismatch { len, n1, n2 }),
    }
}
