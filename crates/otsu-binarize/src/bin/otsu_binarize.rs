use clap::Parser;
use log::LevelFilter;
use otsu_binarize::codec::binarize_file;
use otsu_binarize::io::BinarizeConfig;
use std::path::PathBuf;

/// Binarize an image with a global Otsu threshold.
#[derive(Parser, Debug)]
#[command(name = "otsu-binarize", version, about)]
struct Cli {
    /// Input image (JPEG, PNG, ...). Gray and RGB images are supported.
    #[arg(required_unless_present = "config", conflicts_with = "config")]
    input: Option<PathBuf>,

    /// Output image; defaults to `Result_<input name>` next to the input.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JPEG quality for JPEG output (default 100); overrides `--config`.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=100))]
    quality: Option<u8>,

    /// Load the run configuration from a JSON file instead.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write a JSON report (threshold, histogram) to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Split the work across threads (needs the `rayon` feature).
    #[arg(long)]
    parallel: bool,

    /// Log level; falls back to `OTSU_BINARIZE_LOG`, then `warn`.
    /// With the `tracing` feature it sets the default filter instead
    /// (`RUST_LOG` still wins, the fallback is `info`).
    #[arg(long)]
    log_level: Option<LevelFilter>,

    /// Emit `tracing` spans as JSON.
    #[cfg(feature = "tracing")]
    #[arg(long)]
    trace_json: bool,
}

impl Cli {
    fn into_config(self) -> Result<BinarizeConfig, Box<dyn std::error::Error>> {
        let mut config = match (&self.config, &self.input) {
            (Some(path), _) => BinarizeConfig::load_json(path)?,
            (None, Some(input)) => BinarizeConfig::for_image(input.to_string_lossy()),
            (None, None) => return Err("either an input image or --config is required".into()),
        };
        if let Some(quality) = self.quality {
            config.jpeg_quality = quality;
        }
        if let Some(output) = self.output {
            config.output_path = Some(output.to_string_lossy().into_owned());
        }
        if let Some(report) = self.report {
            config.report_path = Some(report.to_string_lossy().into_owned());
        }
        if self.parallel {
            config.params.parallel = true;
        }
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    #[cfg(feature = "tracing")]
    otsu_binarize::core::init_tracing(cli.trace_json, cli.log_level.unwrap_or(LevelFilter::Info));
    #[cfg(not(feature = "tracing"))]
    match cli.log_level {
        Some(level) => otsu_binarize::core::init_with_level(level)?,
        None => otsu_binarize::core::init_from_env(LevelFilter::Warn)?,
    }

    let config = cli.into_config()?;
    let report = binarize_file(&config)?;
    println!("threshold {} -> {}", report.threshold, report.output_path);
    Ok(())
}
