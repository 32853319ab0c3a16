//! Stego Extract CLI
//!
//! Decodes text hidden in the bit-planes of an image and writes it to a
//! file.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;
use stego_extract::{
    config::{ConfigError, FileConfig},
    extraction::{CancelToken, DecodeError, Decoder},
    metrics::MetricsRegistry,
    report::{DecodeReport, DigestAlgorithm},
    source::load_frame,
    DecoderConfig, PixelSource,
};
use tracing::{info, warn};

/// Steganography decoder for extracting hidden data from images using
/// MSB/LSB bit-plane techniques.
#[derive(Debug, Parser)]
#[command(
    name = "stego-extract",
    version,
    after_help = "\
Examples:
  Extract MSB (Most Significant Bit):
    stego-extract -i hidden.png -o output.txt -b 10000000

  Extract LSB (Least Significant Bit):
    stego-extract -i hidden.png -o output.txt -b 00000001

  Extract 2 LSBs with custom channel order:
    stego-extract -i hidden.png -o output.txt -b 00000011 -c BGR

  Extract using row traversal:
    stego-extract -i hidden.png -o output.txt -b 10000000 -m row"
)]
struct Cli {
    /// Input image file (PNG, JPG, etc.)
    #[arg(short, long)]
    input: PathBuf,

    /// Output text file for decoded message
    #[arg(short, long)]
    output: PathBuf,

    /// Bit pattern to extract (8 chars: 1=extract, 0=skip) [default: 00000001]
    #[arg(short, long)]
    bits: Option<String>,

    /// Channel order for extraction, any permutation of RGB [default: RGB]
    #[arg(short, long)]
    channels: Option<String>,

    /// Pixel traversal mode, row or column [default: column]
    #[arg(short, long)]
    mode: Option<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a TOML decode report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write Prometheus metrics in text format to this path
    #[arg(long)]
    metrics_file: Option<PathBuf>,

    /// Digest algorithm used in the report (blake3 or sha256)
    #[arg(long)]
    digest: Option<DigestAlgorithm>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Stego Extract v{}", stego_extract::VERSION);

    if let Err(e) = run(&cli) {
        eprintln!("✗ Error: {}", e);
        let code = match e.downcast_ref::<DecodeError>() {
            Some(DecodeError::Cancelled { .. }) => 130,
            _ => 1,
        };
        std::process::exit(code);
    }
}

/// Settings after merging flags, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Resolved {
    config: DecoderConfig,
    digest: DigestAlgorithm,
    report: Option<PathBuf>,
    metrics_file: Option<PathBuf>,
}

/// Merges settings: flags override the file, the file overrides defaults.
///
/// Only the merged decode values are validated, so a flag can replace a
/// bad value in the file.
fn resolve(cli: &Cli, file: FileConfig) -> Result<Resolved, ConfigError> {
    let config = DecoderConfig::parse(
        cli.bits.as_deref().unwrap_or(&file.decode.bits),
        cli.channels.as_deref().unwrap_or(&file.decode.channels),
        cli.mode.as_deref().unwrap_or(&file.decode.mode),
    )?;
    Ok(Resolved {
        config,
        digest: cli.digest.unwrap_or(file.output.digest),
        report: cli.report.clone().or(file.output.report),
        metrics_file: cli.metrics_file.clone().or(file.output.metrics_file),
    })
}

/// Cancels `cancel` on the first Ctrl-C and exits on the second.
fn install_interrupt_handler(cancel: &CancelToken) {
    let handler_token = cancel.clone();
    let result = ctrlc::set_handler(move || {
        if handler_token.is_cancelled() {
            std::process::exit(130);
        }
        handler_token.cancel();
    });
    if let Err(e) = result {
        warn!("Could not install Ctrl-C handler: {}", e);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let file = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let Resolved {
        config,
        digest,
        report: report_path,
        metrics_file: metrics_path,
    } = resolve(cli, file).map_err(DecodeError::from)?;

    let frame = load_frame(&cli.input).map_err(DecodeError::from)?;

    let cancel = CancelToken::new();
    install_interrupt_handler(&cancel);
    let started = Instant::now();
    let text = Decoder::new(config).decode_with_cancel(&frame, &cancel)?;
    let elapsed = started.elapsed();

    std::fs::write(&cli.output, text.as_str())?;

    println!("✓ Successfully decoded {}", cli.input.display());
    println!("✓ Output saved to {}", cli.output.display());
    println!("✓ Extracted {} characters", text.char_count());

    if let Some(path) = report_path {
        DecodeReport::new(&cli.input, frame.dimensions(), config, &text, digest)
            .with_output(&cli.output)
            .write_to(&path)?;
        info!("Report written to {}", path.display());
    }

    if let Some(path) = metrics_path {
        let registry = MetricsRegistry::new()?;
        registry.record(text.stats(), elapsed);
        registry.write_textfile(&path)?;
        info!("Metrics written to {}", path.display());
    }

    Ok(())
}
