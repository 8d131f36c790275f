//! Sampled test signals for the sampling and aliasing experiments.
//!
//! A continuous tone `A · wave(2π f t + φ)` is evaluated on a grid of sampling instants.
//! Evaluating the same tone on a dense grid and on a coarse grid shows what the sampler
//! keeps and what it folds back.

use core::{
    f64::consts::{PI, TAU},
    fmt::Display,
    str::FromStr,
};

use num_complex::Complex64;
use serde::Serialize;

use super::errors::SignalError;

/// Shape of a periodic tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub enum Waveform {
    /// `sin(θ)`.
    #[default]
    Sine,
    /// `cos(θ)`.
    Cosine,
    /// `+1` on the first half of each period, `-1` on the second half (duty cycle 0.5).
    Square,
}

impl Waveform {
    /// Evaluates the unit-amplitude waveform at phase `theta` (radians).
    #[must_use]
    pub fn eval(self, theta: f64) -> f64 {
        match self {
            Self::Sine => theta.sin(),
            Self::Cosine => theta.cos(),
            Self::Square => {
                if theta.rem_euclid(TAU) < PI {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

impl Display for Waveform {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Sine => "sine",
            Self::Cosine => "cosine",
            Self::Square => "square",
        })
    }
}

impl FromStr for Waveform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sine" | "sin" => Ok(Self::Sine),
            "cosine" | "cos" => Ok(Self::Cosine),
            "square" => Ok(Self::Square),
            _ => Err(format!("Invalid waveform: {s}")),
        }
    }
}

/// A tone sampled at a fixed rate over a time window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToneParameters {
    /// Peak amplitude.
    pub amplitude: f64,
    /// Tone frequency in Hz.
    pub frequency: f64,
    /// Phase offset in radians.
    pub phase: f64,
    /// Sampling rate in Hz.
    pub sample_rate: f64,
    /// First sampling instant, in seconds.
    pub start: f64,
    /// End of the window (exclusive), in seconds.
    pub end: f64,
    pub waveform: Waveform,
}

impl ToneParameters {
    /// The sampling period `1 / sample_rate`.
    #[must_use]
    pub fn period(&self) -> f64 {
        1.0 / self.sample_rate
    }

    /// Nyquist frequency `sample_rate / 2`.
    #[must_use]
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// Samples the tone over `[start, end)`.
    ///
    /// Returns the sampling instants and the sample values.
    pub fn sample(&self) -> Result<(Vec<f64>, Vec<f64>), SignalError> {
        let times = sample_times(self.start, self.end, self.sample_rate)?;
        let values = tone(
            &times,
            self.amplitude,
            self.frequency,
            self.phase,
            self.waveform,
        );
        Ok((times, values))
    }
}

impl Display for ToneParameters {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} tone: A={}, f0={} Hz, fs={} Hz, t in [{}, {}) s",
            self.waveform, self.amplitude, self.frequency, self.sample_rate, self.start, self.end
        )
    }
}

/// Sampling instants `start + i / sample_rate` lying strictly before `end`.
///
/// Same convention as a half-open `arange`: `end` itself is excluded.
pub fn sample_times(start: f64, end: f64, sample_rate: f64) -> Result<Vec<f64>, SignalError> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(SignalError::InvalidSampleRate(sample_rate));
    }
    // The small slack keeps `(end - start) * fs` from rounding up to one extra instant.
    let count = ((end - start) * sample_rate - 1e-9).ceil();
    if !(count.is_finite() && count >= 1.0) {
        return Err(SignalError::EmptyWindow { start, end });
    }

    let period = 1.0 / sample_rate;
    Ok((0..count as usize)
        .map(|i| start + i as f64 * period)
        .collect())
}

/// `count` evenly spaced points from `start` to `end`.
///
/// `end` is the last point when `endpoint` is set, otherwise the grid stops one step short.
#[must_use]
pub fn linspace(start: f64, end: f64, count: usize, endpoint: bool) -> Vec<f64> {
    let divisions = match (count, endpoint) {
        (0, _) => return Vec::new(),
        (1, _) => return vec![start],
        (n, true) => n - 1,
        (n, false) => n,
    };
    let step = (end - start) / divisions as f64;
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// Evaluates `amplitude · waveform(2π · frequency · t + phase)` at every instant.
#[must_use]
pub fn tone(
    times: &[f64],
    amplitude: f64,
    frequency: f64,
    phase: f64,
    waveform: Waveform,
) -> Vec<f64> {
    times
        .iter()
        .map(|&t| amplitude * waveform.eval(TAU * frequency * t + phase))
        .collect()
}

/// Shifts a real signal down in frequency by `shift_hz`: `x(t) · exp(-2πi · shift_hz · t)`.
pub fn modulate(
    samples: &[f64],
    times: &[f64],
    shift_hz: f64,
) -> Result<Vec<Complex64>, SignalError> {
    if samples.len() != times.len() {
        return Err(SignalError::LengthMismatch {
            samples: samples.len(),
            times: times.len(),
        });
    }
    Ok(samples
        .iter()
        .zip(times)
        .map(|(&x, &t)| Complex64::from_polar(x, -TAU * shift_hz * t))
        .collect())
}

/// Keeps every `len / max_points`-th value when there are more than `max_points` values.
///
/// Used to thin dense sample grids before printing them.
#[must_use]
pub fn downsample<T: Copy>(values: &[T], max_points: usize) -> Vec<T> {
    if max_points == 0 || values.len() <= max_points {
        return values.to_vec();
    }
    let factor = values.len() / max_points;
    values.iter().step_by(factor).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_times_excludes_end() {
        let times = sample_times(0.0, 0.1, 10_000.0).unwrap();
        assert_eq!(times.len(), 1000);
        assert_eq!(times[0], 0.0);
        assert!((times[999] - 0.0999).abs() < 1e-12);
    }

    #[test]
    fn test_sample_times_negative_start() {
        // Five periods before zero and ten after, as in the aliasing plots.
        let fs = 5000.0;
        let ts = 1.0 / fs;
        let times = sample_times(-5.0 * ts, 10.0 * ts, fs).unwrap();
        assert_eq!(times.len(), 15);
        assert!((times[5]).abs() < 1e-15);
    }

    #[test]
    fn test_sample_times_errors() {
        assert_eq!(
            sample_times(0.0, 1.0, 0.0),
            Err(SignalError::InvalidSampleRate(0.0))
        );
        assert!(matches!(
            sample_times(0.0, 1.0, f64::NAN),
            Err(SignalError::InvalidSampleRate(_))
        ));
        assert_eq!(
            sample_times(1.0, 1.0, 100.0),
            Err(SignalError::EmptyWindow {
                start: 1.0,
                end: 1.0
            })
        );
        assert!(sample_times(2.0, 1.0, 100.0).is_err());
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5, true), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(0.0, 1.0, 4, false), vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(linspace(3.0, 9.0, 1, true), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0, true).is_empty());
    }

    #[test]
    fn test_square_wave() {
        let w = Waveform::Square;
        assert_eq!(w.eval(0.0), 1.0);
        assert_eq!(w.eval(PI / 2.0), 1.0);
        assert_eq!(w.eval(PI), -1.0);
        assert_eq!(w.eval(1.5 * PI), -1.0);
        // Negative phases wrap into [0, 2π).
        assert_eq!(w.eval(-PI / 2.0), -1.0);
    }

    #[test]
    fn test_tone_sampled_at_quarter_period() {
        // f0 = fs / 4 hits the sine at 0, peak, 0, trough.
        let times = sample_times(0.0, 4.0 / 400.0, 400.0).unwrap();
        let values = tone(&times, 2.0, 100.0, 0.0, Waveform::Sine);
        let expected = [0.0, 2.0, 0.0, -2.0];
        for (v, e) in values.iter().zip(expected) {
            assert!((v - e).abs() < 1e-12);
        }
    }

    #[test]
    fn test_sampling_at_the_tone_frequency_sees_a_constant() {
        // fs = f0: every sample lands at the same phase, so the sine looks like DC.
        let params = ToneParameters {
            amplitude: 1.0,
            frequency: 1000.0,
            phase: 0.3,
            sample_rate: 1000.0,
            start: 0.0,
            end: 0.02,
            waveform: Waveform::Sine,
        };
        let (_, values) = params.sample().unwrap();
        assert_eq!(values.len(), 20);
        assert!(values.iter().all(|v| (v - 0.3f64.sin()).abs() < 1e-9));
    }

    #[test]
    fn test_modulate() {
        let times = [0.0, 0.25];
        let out = modulate(&[1.0, 2.0], &times, 1.0).unwrap();
        assert!((out[0] - Complex64::new(1.0, 0.0)).norm() < 1e-12);
        // exp(-2πi · 0.25) = -i
        assert!((out[1] - Complex64::new(0.0, -2.0)).norm() < 1e-12);

        assert_eq!(
            modulate(&[1.0], &times, 1.0),
            Err(SignalError::LengthMismatch {
                samples: 1,
                times: 2
            })
        );
    }

    #[test]
    fn test_downsample() {
        let values: Vec<usize> = (0..10).collect();
        assert_eq!(downsample(&values, 20), values);
        assert_eq!(downsample(&values, 5), vec![0, 2, 4, 6, 8]);
        assert_eq!(downsample(&values, 3), vec![0, 3, 6, 9]);
    }

    #[test]
    fn test_waveform_display_from_str() {
        for w in [Waveform::Sine, Waveform::Cosine, Waveform::Square] {
            assert_eq!(Waveform::from_str(&w.to_string()), Ok(w));
        }
        assert_eq!(Waveform::from_str("cos"), Ok(Waveform::Cosine));
        assert!(Waveform::from_str("triangle").is_err());
    }
}
