//! Lossy block-DCT compression.
//!
//! The image is cut into `N x N` blocks. Each block goes through a 2D DCT, keeps only the
//! first `C` coefficients of the zig-zag scan, and is transformed back. Dropping the high
//! spatial frequencies blurs edges first and leaves smooth regions intact.

use itertools::iproduct;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

use super::{
    dct::CosineTable, errors::CompressionError, image::GrayImage, parameters::CompressionParameters,
    zigzag::CoefficientMask,
};

/// Reusable DCT table and coefficient mask for one set of [`CompressionParameters`].
#[derive(Debug, Clone)]
pub struct BlockCompressor {
    params: CompressionParameters,
    table: CosineTable,
    mask: CoefficientMask,
}

impl BlockCompressor {
    pub fn new(params: CompressionParameters) -> Result<Self, CompressionError> {
        params.validate()?;
        Ok(Self {
            params,
            table: CosineTable::new(params.block_size),
            mask: CoefficientMask::zigzag(params.retained, params.block_size)?,
        })
    }

    #[must_use]
    pub const fn params(&self) -> CompressionParameters {
        self.params
    }

    #[must_use]
    pub const fn mask(&self) -> &CoefficientMask {
        &self.mask
    }

    /// Compresses and reconstructs a single row-major block.
    #[must_use]
    pub fn compress_block(&self, block: &[f64]) -> Vec<f64> {
        let mut coefficients = self.table.dct2(block);
        self.mask.apply(&mut coefficients);
        self.table.idct2(&coefficients)
    }

    /// Compresses `image` and returns the reconstruction.
    ///
    /// The result covers the top-left `⌊w/N⌋·N x ⌊h/N⌋·N` pixels; partial blocks on the
    /// right and bottom edges are dropped.
    #[instrument(skip_all, fields(
        width = image.width(),
        height = image.height(),
        block = self.params.block_size,
        retained = self.params.retained,
    ), level = "debug")]
    pub fn compress(&self, image: &GrayImage) -> Result<GrayImage, CompressionError> {
        let n = self.params.block_size;
        let mut output = image.crop_to_blocks(n)?;

        let origins: Vec<_> = iproduct!(0..output.height() / n, 0..output.width() / n)
            .map(|(by, bx)| (bx * n, by * n))
            .collect();

        #[cfg(feature = "parallel")]
        let iter = origins.par_iter();
        #[cfg(not(feature = "parallel"))]
        let iter = origins.iter();

        let blocks: Vec<_> = iter
            .map(|&(x0, y0)| self.compress_block(&output.read_block(x0, y0, n)))
            .collect();

        for (&(x0, y0), block) in origins.iter().zip(&blocks) {
            output.write_block(x0, y0, n, block);
        }

        Ok(output)
    }
}

/// One-shot [`BlockCompressor::compress`].
pub fn compress(
    image: &GrayImage,
    params: CompressionParameters,
) -> Result<GrayImage, CompressionError> {
    BlockCompressor::new(params)?.compress(image)
}
