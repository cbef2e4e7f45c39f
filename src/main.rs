//! `photonorm` CLI - Normalize uploaded photos for storage.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photonorm::image::{header_dimensions, read_orientation, sniff_format};
use photonorm::{serve, Config, Normalized, Normalizer};

/// Normalize uploaded photos: EXIF orientation, fit-within downscale, JPEG re-encode.
#[derive(Parser, Debug)]
#[command(name = "photonorm")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Normalize an upload and write the bytes that would be stored.
    Normalize {
        /// Uploaded image path.
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Where to write the stored bytes.
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        limits: LimitArgs,
    },

    /// Report how an upload would be routed, without writing anything.
    Inspect {
        /// Image path.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
struct LimitArgs {
    /// Maximum stored width in pixels.
    #[arg(long, default_value = "512", env = "PHOTONORM_MAX_WIDTH", value_name = "INT")]
    max_width: u32,

    /// Maximum stored height in pixels.
    #[arg(long, default_value = "512", env = "PHOTONORM_MAX_HEIGHT", value_name = "INT")]
    max_height: u32,

    /// JPEG quality (1-100) for re-encoded photos.
    #[arg(short, long, default_value = "80", env = "PHOTONORM_QUALITY", value_name = "INT")]
    quality: u8,
}

impl From<&LimitArgs> for Config {
    fn from(args: &LimitArgs) -> Self {
        Self {
            max_width: args.max_width,
            max_height: args.max_height,
            quality: args.quality,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("photonorm={log_level}").into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let outcome = match &cli.command {
        Command::Normalize {
            input,
            output,
            limits,
        } => normalize(input, output, limits),
        Command::Inspect { file } => inspect(file),
    };

    if let Err(err) = outcome {
        tracing::error!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn normalize(input: &Path, output: &Path, limits: &LimitArgs) -> Result<()> {
    if !input.exists() {
        anyhow::bail!("Input file does not exist: {}", input.display());
    }

    let normalizer = Normalizer::new(limits.into()).context("Invalid normalization settings")?;

    let normalized = normalizer
        .normalize_file(input, output)
        .context("Failed to normalize upload")?;

    match &normalized {
        Normalized::Reencoded {
            width,
            height,
            orientation,
            ..
        } => println!(
            "Re-encoded {} -> {} ({width}x{height}, orientation {}, quality {}, {})",
            input.display(),
            output.display(),
            orientation.code(),
            normalizer.config().quality,
            normalized.content_type()
        ),
        Normalized::PassThrough { format, .. } => println!(
            "Stored {} -> {} unchanged ({format}, {})",
            input.display(),
            output.display(),
            normalized.content_type()
        ),
    }

    Ok(())
}

fn inspect(file: &Path) -> Result<()> {
    let bytes = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let format = sniff_format(&bytes);
    println!("format:        {format}");

    match header_dimensions(&bytes) {
        Some((width, height)) => println!("dimensions:    {width}x{height}"),
        None => println!("dimensions:    unknown"),
    }

    if format.is_photographic() {
        let orientation = read_orientation(&bytes);
        println!("orientation:   {} ({orientation:?})", orientation.code());
        println!("route:         re-encode");
    } else {
        println!("route:         pass-through");
    }

    let headers = serve::headers(&bytes, false);
    println!("content-type:  {}", headers.content_type);
    println!("cache-control: {}", headers.cache_control);

    Ok(())
}
