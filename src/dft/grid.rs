use num_complex::Complex64;

/// A dense row-major grid of complex values.
///
/// The composite DFT works on an `n1 x n2` arrangement of its input: `height` is the
/// number of rows (`n1`) and `width` the number of columns (`n2`).
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexGrid {
    /// The values, row after row.
    values: Vec<Complex64>,
    /// The number of columns.
    width: usize,
}

impl ComplexGrid {
    /// Wraps `values` as a grid with `width` columns.
    ///
    /// `values.len()` must be a multiple of `width`.
    #[must_use]
    pub fn new(values: Vec<Complex64>, width: usize) -> Self {
        debug_assert!(width > 0, "grid width must be positive");
        debug_assert_eq!(
            values.len() % width,
            0,
            "grid length must be a multiple of its width"
        );
        Self { values, width }
    }

    /// Builds a grid by evaluating `f(row, col)` for every cell.
    #[must_use]
    pub fn from_fn(
        height: usize,
        width: usize,
        mut f: impl FnMut(usize, usize) -> Complex64,
    ) -> Self {
        let values = (0..height)
            .flat_map(|row| (0..width).map(move |col| (row, col)))
            .map(|(row, col)| f(row, col))
            .collect();
        Self::new(values, width)
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.values.len() / self.width
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.values[row * self.width + col]
    }

    /// The values, row after row.
    #[must_use]
    pub fn values(&self) -> &[Complex64] {
        &self.values
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Complex64]> {
        self.values.chunks_exact(self.width)
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [Complex64]> {
        self.values.chunks_exact_mut(self.width)
    }

    /// Copies column `col` into `out`, top to bottom.
    pub fn read_column(&self, col: usize, out: &mut [Complex64]) {
        debug_assert_eq!(out.len(), self.height());
        for (dst, row) in out.iter_mut().zip(self.rows()) {
            *dst = row[col];
        }
    }

    /// Overwrites column `col` with `column`, top to bottom.
    pub fn write_column(&mut self, col: usize, column: &[Complex64]) {
        debug_assert_eq!(column.len(), self.height());
        let width = self.width;
        for (row, &value) in self.values.chunks_exact_mut(width).zip(column) {
            row[col] = value;
        }
    }

    /// Elementwise product with a grid of the same shape.
    pub fn hadamard_in_place(&mut self, other: &Self) {
        assert_eq!(self.width, other.width);
        assert_eq!(self.values.len(), other.values.len());
        for (lhs, rhs) in self.values.iter_mut().zip(&other.values) {
            *lhs *= *rhs;
        }
    }
}
