//! Sampled signals and their spectra.

pub mod errors;
pub mod generator;
pub mod spectrum;

pub use errors::SignalError;
pub use generator::{ToneParameters, Waveform, downsample, linspace, modulate, sample_times, tone};
pub use spectrum::{Spectrum, aliased_frequency, fftfreq, fftshift, ifftshift, is_aliased};
