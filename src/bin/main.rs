use clap::{Parser, Subcommand};
use composite_fft::{
    compression::{BlockCompressor, CompressionParameters, GrayImage, mse, psnr},
    dft::{CompositeDft, naive_dft},
    errors::Error,
    signal::{Spectrum, ToneParameters, Waveform, aliased_frequency, is_aliased, modulate},
};
use num_complex::Complex64;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, info, info_span, warn};
use tracing_forest::{ForestLayer, util::LevelFilter};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compares the composite transform with the direct DFT on random input.
    Fft {
        #[arg(long, default_value = "3")]
        n1: usize,

        #[arg(long, default_value = "4")]
        n2: usize,

        #[arg(short, long, default_value = "0")]
        seed: u64,
    },

    /// Samples a tone and reports where its spectrum peaks.
    Spectrum {
        #[arg(short, long, default_value = "500")]
        frequency: f64,

        #[arg(long = "sample-rate", default_value = "10000")]
        sample_rate: f64,

        #[arg(long, default_value = "0")]
        start: f64,

        #[arg(long, default_value = "0.1")]
        end: f64,

        #[arg(short = 'a', long, default_value = "1")]
        amplitude: f64,

        /// Shifts the tone down by this many Hz before the transform.
        #[arg(long)]
        shift: Option<f64>,

        #[arg(short, long, default_value = "sine")]
        waveform: Waveform,
    },

    /// Compresses a synthetic image with several coefficient budgets.
    Compress {
        #[arg(long, default_value = "64")]
        size: usize,

        #[arg(short, long = "block", default_value = "8")]
        block_size: usize,

        /// Coefficients kept per block. Repeat to compare several budgets.
        #[arg(short, long = "keep", default_values_t = [1, 3, 10])]
        keep: Vec<usize>,
    },
}

fn main() -> Result<(), Error> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();

    let args = Args::parse();
    debug!(?args);

    match args.command {
        Command::Fft { n1, n2, seed } => run_fft(n1, n2, seed),
        Command::Spectrum {
            frequency,
            sample_rate,
            start,
            end,
            amplitude,
            shift,
            waveform,
        } => run_spectrum(
            ToneParameters {
                amplitude,
                frequency,
                phase: 0.0,
                sample_rate,
                start,
                end,
                waveform,
            },
            shift,
        ),
        Command::Compress {
            size,
            block_size,
            keep,
        } => run_compress(size, block_size, &keep),
    }
}

fn run_fft(n1: usize, n2: usize, seed: u64) -> Result<(), Error> {
    let mut rng = StdRng::seed_from_u64(seed);
    let plan = CompositeDft::new(n1, n2)?;
    let input: Vec<_> = (0..plan.len())
        .map(|_| Complex64::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
        .collect();

    let composite = info_span!("composite", n1, n2).in_scope(|| plan.process(&input))?;
    let direct = info_span!("direct", n = plan.len()).in_scope(|| naive_dft(&input));

    let max_error = composite
        .iter()
        .zip(&direct)
        .map(|(a, b)| (a - b).norm())
        .fold(0.0, f64::max);

    println!("=========================================");
    println!("Composite DFT, N = {n1} x {n2} = {}", plan.len());
    println!("max |composite - direct| = {max_error:.3e}");
    if max_error > 1e-9 * plan.len() as f64 {
        warn!(max_error, "composite transform disagrees with the direct DFT");
    }
    Ok(())
}

fn run_spectrum(tone: ToneParameters, shift: Option<f64>) -> Result<(), Error> {
    info!(%tone);
    let (times, values) = tone.sample()?;

    let spectrum = match shift {
        Some(shift_hz) => Spectrum::of(&modulate(&values, &times, shift_hz)?, tone.sample_rate)?,
        None => Spectrum::of_real(&values, tone.sample_rate)?,
    };
    debug!(bins = spectrum.frequencies.len());

    println!("=========================================");
    println!("{tone}");
    println!("samples: {}", values.len());
    if let Some(peak) = spectrum.dominant_frequency() {
        println!("dominant frequency: {peak:.3} Hz");
    }
    if let (None, Some(peak)) = (shift, spectrum.dominant_positive_frequency()) {
        println!("dominant positive frequency: {peak:.3} Hz");
    }

    if is_aliased(tone.frequency, tone.sample_rate) {
        println!(
            "aliased: fs = {} Hz <= 2 f0, the tone appears at {:.3} Hz",
            tone.sample_rate,
            aliased_frequency(tone.frequency, tone.sample_rate)
        );
    } else {
        println!(
            "not aliased: fs = {} Hz > 2 f0 (Nyquist {} Hz)",
            tone.sample_rate,
            tone.nyquist()
        );
    }
    Ok(())
}

fn run_compress(size: usize, block_size: usize, keep: &[usize]) -> Result<(), Error> {
    let image = GrayImage::test_card(size);

    println!("=========================================");
    println!("Block-DCT compression of a {size}x{size} test card");
    for &retained in keep {
        let params = CompressionParameters::new(block_size, retained)?;
        let compressor = BlockCompressor::new(params)?;
        let restored = compressor.compress(&image)?;
        let original = image.crop_to_blocks(block_size)?;

        let mse = mse(&original, &restored)?;
        let psnr = psnr(&original, &restored, 1.0)?;
        info!(%params, mse, psnr);
        println!(
            "{params}: kept {:.1}%, MSE = {mse:.3e}, PSNR = {psnr:.2} dB",
            100.0 * params.kept_ratio()
        );
    }
    Ok(())
}
