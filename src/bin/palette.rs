use anyhow::{Context, Result, bail};
use clap::Parser;
use palette_harmony::{
    ExtractionConfig, HarmonyMode, PaletteExtractor, PixelBuffer, validate_ring_count,
};
use serde_json::json;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Extract dominant colors from images and expand them into harmony palettes.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Number of dominant colors to extract
    #[arg(short = 'k', long, default_value_t = 5)]
    n_colors: usize,

    /// Colors generated per dominant color (3-12)
    #[arg(short, long, default_value_t = 5)]
    ring: usize,

    /// complementary, analogous, triadic, tetradic or split-complementary
    #[arg(short, long, default_value = "complementary")]
    mode: HarmonyMode,

    /// Fix the random seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding extraction parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write one <stem>.json per input here instead of printing to stdout
    #[arg(short = 'd', long)]
    out_dir: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.n_colors == 0 {
        bail!("--n-colors must be at least 1");
    }
    let ring_count = validate_ring_count(args.ring)?;

    let config = match &args.config {
        Some(path) => ExtractionConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ExtractionConfig::default(),
    };

    let mut extractor = PaletteExtractor::new().with_config(config);
    if let Some(seed) = args.seed {
        extractor = extractor.with_seed(seed);
    }

    for input in &args.inputs {
        let img = image::open(input)
            .with_context(|| format!("decoding {}", input.display()))?
            .to_rgba8();
        let buffer = PixelBuffer::from(&img);
        let palette = extractor.build_palette(&buffer, args.n_colors, ring_count, args.mode);
        info!(
            input = %input.display(),
            bases = palette.bases().len(),
            colors = palette.len(),
            "built palette"
        );

        let doc = json!({
            "input": input.display().to_string(),
            "width": img.width(),
            "height": img.height(),
            "palette": palette,
        });
        let text = if args.pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            serde_json::to_string(&doc)?
        };

        match &args.out_dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                let stem = input.file_stem().unwrap_or_default().to_string_lossy();
                let out_path = dir.join(format!("{stem}.json"));
                fs::write(&out_path, text)?;
                eprintln!("Saved → {}", out_path.display());
            }
            None => println!("{text}"),
        }
    }

    Ok(())
}
