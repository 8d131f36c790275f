//! Frequency axes and magnitude spectra.

use num_complex::Complex64;
use serde::Serialize;

use crate::{dft::CompositeDft, errors::Error, signal::errors::SignalError};

/// Frequencies of the DFT bins for `n` samples spaced `d` seconds apart.
///
/// Bins are in transform order: `[0, 1, …, ⌈n/2⌉ - 1, -⌊n/2⌋, …, -1] / (n · d)`.
#[must_use]
pub fn fftfreq(n: usize, d: f64) -> Vec<f64> {
    let scale = 1.0 / (n as f64 * d);
    let positive = n.div_ceil(2);
    (0..n)
        .map(|i| {
            if i < positive {
                i as f64
            } else {
                i as f64 - n as f64
            }
        })
        .map(|k| k * scale)
        .collect()
}

/// Moves the zero-frequency bin to the center: rotates right by `n / 2`.
#[must_use]
pub fn fftshift<T: Clone>(values: &[T]) -> Vec<T> {
    let mut shifted = values.to_vec();
    shifted.rotate_right(values.len() / 2);
    shifted
}

/// Undoes [`fftshift`].
#[must_use]
pub fn ifftshift<T: Clone>(values: &[T]) -> Vec<T> {
    let mut shifted = values.to_vec();
    shifted.rotate_left(values.len() / 2);
    shifted
}

/// The frequency a tone at `frequency` appears at after sampling at `sample_rate`.
///
/// The result is folded into `[-fs/2, fs/2)`.
#[must_use]
pub fn aliased_frequency(frequency: f64, sample_rate: f64) -> f64 {
    let folded = frequency - sample_rate * (frequency / sample_rate).round();
    if folded >= sample_rate / 2.0 {
        folded - sample_rate
    } else {
        folded
    }
}

/// Whether sampling at `sample_rate` cannot represent `frequency` (Nyquist: `fs > 2 f`).
#[must_use]
pub fn is_aliased(frequency: f64, sample_rate: f64) -> bool {
    2.0 * frequency.abs() >= sample_rate
}

/// A centered, normalized magnitude spectrum: `|X[k]| / N` against frequency in Hz.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spectrum {
    /// Ascending frequencies, zero in the middle.
    pub frequencies: Vec<f64>,
    /// `|X[k]| / N` for each frequency.
    pub magnitudes: Vec<f64>,
}

impl Spectrum {
    /// Spectrum of complex samples taken at `sample_rate`.
    ///
    /// The DFT is a [`CompositeDft`] over the most balanced factorization of the length.
    pub fn of(samples: &[Complex64], sample_rate: f64) -> Result<Self, Error> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(SignalError::InvalidSampleRate(sample_rate).into());
        }
        let n = samples.len();
        let plan = CompositeDft::for_len(n)?;
        let bins = plan.process(samples)?;

        let magnitudes: Vec<_> = bins.iter().map(|v| v.norm() / n as f64).collect();

        Ok(Self {
            frequencies: fftshift(&fftfreq(n, 1.0 / sample_rate)),
            magnitudes: fftshift(&magnitudes),
        })
    }

    /// Spectrum of real samples taken at `sample_rate`.
    pub fn of_real(samples: &[f64], sample_rate: f64) -> Result<Self, Error> {
        let promoted: Vec<_> = samples.iter().map(|&re| Complex64::new(re, 0.0)).collect();
        Self::of(&promoted, sample_rate)
    }

    /// Magnitude at the bin closest to `frequency`.
    #[must_use]
    pub fn magnitude_at(&self, frequency: f64) -> Option<f64> {
        self.frequencies
            .iter()
            .zip(&self.magnitudes)
            .min_by(|(a, _), (b, _)| (*a - frequency).abs().total_cmp(&(*b - frequency).abs()))
            .map(|(_, &m)| m)
    }

    /// The frequency with the largest magnitude. The lowest frequency wins ties.
    #[must_use]
    pub fn dominant_frequency(&self) -> Option<f64> {
        Self::peak(self.frequencies.iter().zip(&self.magnitudes))
    }

    /// Like [`Self::dominant_frequency`], restricted to non-negative frequencies.
    ///
    /// For real signals the spectrum is symmetric, so this is the meaningful peak.
    #[must_use]
    pub fn dominant_positive_frequency(&self) -> Option<f64> {
        Self::peak(
            self.frequencies
                .iter()
                .zip(&self.magnitudes)
                .filter(|(f, _)| **f >= 0.0),
        )
    }

    fn peak<'a>(bins: impl Iterator<Item = (&'a f64, &'a f64)>) -> Option<f64> {
        bins.fold(None, |best: Option<(f64, f64)>, (&f, &m)| match best {
            Some((_, best_m)) if best_m >= m => best,
            _ => Some((f, m)),
        })
        .map(|(f, _)| f)
    }
}
