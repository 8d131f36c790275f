//! Block-DCT image compression with zig-zag coefficient truncation.

pub mod compressor;
pub mod dct;
pub mod errors;
pub mod image;
pub mod metrics;
pub mod parameters;
pub mod zigzag;

pub use compressor::{BlockCompressor, compress};
pub use dct::CosineTable;
pub use errors::CompressionError;
pub use image::GrayImage;
pub use metrics::{mse, psnr};
pub use parameters::CompressionParameters;
pub use zigzag::{CoefficientMask, zigzag_order};
