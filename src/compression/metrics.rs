//! Reconstruction quality.

use super::{errors::CompressionError, image::GrayImage};

/// Mean squared pixel error between two images of the same dimensions.
pub fn mse(original: &GrayImage, reconstructed: &GrayImage) -> Result<f64, CompressionError> {
    original.check_same_shape(reconstructed)?;
    let len = original.pixels().len();
    if len == 0 {
        return Ok(0.0);
    }
    let total: f64 = original
        .pixels()
        .iter()
        .zip(reconstructed.pixels())
        .map(|(a, b)| (a - b) * (a - b))
        .sum();
    Ok(total / len as f64)
}

/// Peak signal-to-noise ratio in decibels: `20 · log10(max_pixel / √mse)`.
///
/// Identical images give `+∞`.
pub fn psnr(
    original: &GrayImage,
    reconstructed: &GrayImage,
    max_pixel: f64,
) -> Result<f64, CompressionError> {
    let mse = mse(original, reconstructed)?;
    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(20.0 * (max_pixel / mse.sqrt()).log10())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_images() {
        let image = GrayImage::test_card(16);
        assert_eq!(mse(&image, &image).unwrap(), 0.0);
        assert_eq!(psnr(&image, &image, 1.0).unwrap(), f64::INFINITY);
    }

    #[test]
    fn test_known_error() {
        let a = GrayImage::new(2, 1, vec![0.0, 0.0]).unwrap();
        let b = GrayImage::new(2, 1, vec![0.1, -0.1]).unwrap();

        assert!((mse(&a, &b).unwrap() - 0.01).abs() < 1e-15);
        // 20 · log10(1 / 0.1) = 20 dB
        assert!((psnr(&a, &b, 1.0).unwrap() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = GrayImage::from_fn(4, 2, |_, _| 0.0);
        let b = GrayImage::from_fn(2, 4, |_, _| 0.0);
        assert_eq!(
            mse(&a, &b),
            Err(CompressionError::DimensionMismatch(4, 2, 2, 4))
        );
        assert!(psnr(&a, &b, 1.0).is_err());
    }
}
