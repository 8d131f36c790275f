//! Composite-length discrete Fourier transforms.
//!
//! [`dft::CompositeDft`] computes an `N`-point DFT with `N = N1 · N2` through the two-factor
//! Cooley-Tukey decomposition. [`signal`] and [`compression`] build the classic sampling and
//! block-DCT experiments on top of it.

pub mod compression;
pub mod dft;
pub mod errors;
pub mod signal;
