use std::f64::consts::TAU;

use super::errors::CompressionError;

/// A grayscale image with row-major pixels, nominally in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    pixels: Vec<f64>,
}

impl GrayImage {
    pub fn new(width: usize, height: usize, pixels: Vec<f64>) -> Result<Self, CompressionError> {
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(CompressionError::PixelCountMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Builds an image by evaluating `f(x, y)` at every pixel.
    #[must_use]
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// A `size x size` test card: a diagonal gradient with a soft ripple and a bright square.
    ///
    /// Smooth regions compress well, the square's edges do not, so the card shows both
    /// behaviours.
    #[must_use]
    pub fn test_card(size: usize) -> Self {
        let s = size.max(1) as f64;
        Self::from_fn(size, size, |x, y| {
            let (u, v) = (x as f64 / s, y as f64 / s);
            let inside = (0.3..0.6).contains(&u) && (0.3..0.6).contains(&v);
            if inside {
                0.95
            } else {
                0.4 * (u + v) / 2.0 + 0.1 * ((TAU * 3.0 * u).sin() * (TAU * 2.0 * v).cos()) + 0.3
            }
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[f64] {
        &self.pixels
    }

    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.pixels[y * self.width + x]
    }

    /// The top-left region made of whole `block_size x block_size` blocks.
    pub fn crop_to_blocks(&self, block_size: usize) -> Result<Self, CompressionError> {
        if block_size == 0 {
            return Err(CompressionError::ZeroBlockSize);
        }
        let width = self.width / block_size * block_size;
        let height = self.height / block_size * block_size;
        if width == 0 || height == 0 {
            return Err(CompressionError::ImageTooSmall {
                width: self.width,
                height: self.height,
                block_size,
            });
        }
        Ok(Self::from_fn(width, height, |x, y| self.get(x, y)))
    }

    /// Copies the `size x size` block with top-left corner `(x0, y0)` into a row-major buffer.
    #[must_use]
    pub fn read_block(&self, x0: usize, y0: usize, size: usize) -> Vec<f64> {
        (y0..y0 + size)
            .flat_map(|y| &self.pixels[y * self.width + x0..y * self.width + x0 + size])
            .copied()
            .collect()
    }

    /// Writes a row-major `size x size` block with top-left corner `(x0, y0)`.
    pub fn write_block(&mut self, x0: usize, y0: usize, size: usize, block: &[f64]) {
        for (dy, row) in block.chunks_exact(size).enumerate() {
            let start = (y0 + dy) * self.width + x0;
            self.pixels[start..start + size].copy_from_slice(row);
        }
    }

    /// Ensures `other` has the same dimensions.
    pub(crate) const fn check_same_shape(&self, other: &Self) -> Result<(), CompressionError> {
        if self.width == other.width && self.height == other.height {
            Ok(())
        } else {
            Err(CompressionError::DimensionMismatch(
                self.width,
                self.height,
                other.width,
                other.height,
            ))
        }
    }
}
