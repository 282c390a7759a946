//! Command-line front end for the tiered vectorization engine.
//!
//! Reads a raster image, runs the full engine fallback chain, and
//! writes the resulting SVG markup (or the JSON response envelope) to a
//! file or stdout. Remote-tier credentials come from the environment so
//! they never appear in shell history.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use keyline_engine::{vectorize, EngineConfig, RemoteConfig};

/// Convert a raster image to a print-ready transparent SVG.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input image path (PNG or JPEG).
    input: PathBuf,

    /// Output path. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the full JSON response envelope instead of bare markup.
    #[arg(long)]
    json: bool,

    /// Luminance threshold: pixels strictly darker become foreground.
    #[arg(long, default_value_t = 180)]
    threshold: u8,

    /// Suppress connected components smaller than this many pixels.
    #[arg(long, default_value_t = 5)]
    speckle_size: u32,

    /// Path simplification tolerance before curve fitting.
    #[arg(long, default_value_t = 0.2)]
    curve_tolerance: f64,

    /// Emit straight line segments instead of smoothed curves.
    #[arg(long)]
    no_curves: bool,

    /// Skip keying near-black pixels to transparency.
    #[arg(long)]
    keep_background: bool,

    /// External vector export tool for the second engine tier.
    #[arg(long, default_value = "inkscape")]
    cli_tool: String,
}

/// Build the remote tier configuration from the environment, if all
/// three variables are set.
fn remote_from_env() -> Option<RemoteConfig> {
    let endpoint = std::env::var("KEYLINE_REMOTE_ENDPOINT").ok()?;
    let api_id = std::env::var("KEYLINE_REMOTE_API_ID").ok()?;
    let api_secret = std::env::var("KEYLINE_REMOTE_API_SECRET").ok()?;
    Some(RemoteConfig {
        endpoint,
        api_id,
        api_secret,
        simplify: 0.3,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = EngineConfig {
        cli_tool: args.cli_tool,
        key_dark_background: !args.keep_background,
        remote: remote_from_env(),
        ..EngineConfig::default()
    };
    config.trace.threshold = args.threshold;
    config.trace.speckle_size = args.speckle_size;
    config.trace.curve_tolerance = args.curve_tolerance;
    config.trace.use_curves = !args.no_curves;

    eprintln!("Reading image from {}", args.input.display());
    let image_bytes = std::fs::read(&args.input)?;

    let response = vectorize(&image_bytes, &config).await?;

    let body = if args.json {
        let mut json = serde_json::to_string_pretty(&response)?;
        json.push('\n');
        json
    } else {
        response.svg_data
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, body)?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{body}"),
    }

    Ok(())
}
