//! ocr-lines - print the text lines of an image
//!
//! Runs OCR on an image (or replays stored detections), groups the fragments
//! into lines by their vertical extents and prints one line per band.
//!
//! Usage:
//!   ocr-lines image.png                      OCR an image (needs --features tesseract)
//!   ocr-lines --detections det.json          Group precomputed detections
//!   ocr-lines warmup                         Initialise the engine and exit
//!   ocr-lines completions bash               Print shell completions

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use ocr_lines_core::{
    group_by_bands, render_json, render_lines, DetectionFile, EngineConfig, LineOrder, OcrEngine,
};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

mod config;

use config::{default_config_path, load_config, Config};

#[derive(Parser)]
#[command(name = "ocr-lines")]
#[command(about = "Rebuild text lines from OCR fragments")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Image to read (when no subcommand given)
    image: Option<PathBuf>,

    #[command(flatten)]
    engine: EngineArgs,

    #[command(flatten)]
    grouping: GroupingArgs,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialise the OCR engine (fetching or checking its data) and exit
    Warmup {
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Clone, Default)]
struct EngineArgs {
    /// Read detections from a JSON file instead of running OCR
    #[arg(long, value_name = "FILE")]
    detections: Option<PathBuf>,

    /// Tesseract language codes (e.g., "eng", "chi_sim+eng")
    #[arg(long)]
    language: Option<String>,

    /// Tesseract page segmentation mode
    #[arg(long, value_name = "N")]
    psm: Option<u32>,

    /// Config file (defaults to $OCR_LINES_CONFIG or the platform config dir)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct GroupingArgs {
    /// Pixels added above and below each fragment before merging
    #[arg(long, value_name = "PIXELS")]
    padding: Option<f32>,

    /// Order of fragments within a line
    #[arg(long, value_enum)]
    order: Option<OrderArg>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    /// As emitted by the OCR engine
    Arrival,
    /// Sorted by leftmost x
    LeftToRight,
}

impl From<OrderArg> for LineOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Arrival => LineOrder::Arrival,
            OrderArg::LeftToRight => LineOrder::LeftToRight,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One line of text per band
    Text,
    /// JSON array with band bounds and labels
    Json,
}

fn load_cli_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };
    tracing::debug!("Using config file {}", path.display());
    load_config(&path)
}

fn build_engine(args: &EngineArgs, config: &Config) -> Result<Box<dyn OcrEngine>> {
    if let Some(path) = &args.detections {
        return Ok(Box::new(DetectionFile::new(path)));
    }
    live_engine(config.engine_config(args.language.clone(), args.psm))
}

#[cfg(feature = "tesseract")]
fn live_engine(config: EngineConfig) -> Result<Box<dyn OcrEngine>> {
    let engine = ocr_lines_core::TesseractEngine::new(config)
        .context("Failed to initialize OCR engine")?;
    Ok(Box::new(engine))
}

#[cfg(not(feature = "tesseract"))]
fn live_engine(config: EngineConfig) -> Result<Box<dyn OcrEngine>> {
    tracing::debug!("Requested engine language '{}'", config.language);
    Err(ocr_lines_core::LinesError::EngineUnavailable(
        "built without the `tesseract` feature; pass --detections <FILE> \
         or rebuild with --features tesseract"
            .to_string(),
    )
    .into())
}

fn cmd_lines(image: Option<&Path>, engine_args: &EngineArgs, grouping: &GroupingArgs) -> Result<()> {
    let config = load_cli_config(engine_args.config.as_deref())?;
    let options = config.grouping_options(grouping.padding, grouping.order.map(LineOrder::from))?;

    let image = match (image, &engine_args.detections) {
        (Some(image), _) => image.to_path_buf(),
        (None, Some(detections)) => detections.clone(),
        (None, None) => anyhow::bail!("No image given (pass an image path or --detections <FILE>)"),
    };

    let mut engine = build_engine(engine_args, &config)?;
    let detections = engine
        .detect(&image)
        .with_context(|| format!("OCR failed for {}", image.display()))?;
    tracing::debug!(
        "{} returned {} detections for {}",
        engine.name(),
        detections.len(),
        image.display()
    );

    let groups = group_by_bands(&detections, &options)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match grouping.format {
        OutputFormat::Text => {
            for line in render_lines(&groups) {
                writeln!(out, "{line}")?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", render_json(&groups)?)?,
    }
    out.flush()?;
    Ok(())
}

fn cmd_warmup(engine_args: &EngineArgs) -> Result<()> {
    let config = load_cli_config(engine_args.config.as_deref())?;
    let mut engine = build_engine(engine_args, &config)?;
    engine.warm_up().context("Engine warm-up failed")?;
    tracing::info!("{} engine ready", engine.name());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries only the reconstructed lines
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    match cli.command {
        Some(Commands::Warmup { engine }) => cmd_warmup(&engine),
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "ocr-lines", &mut io::stdout());
            Ok(())
        }
        None => cmd_lines(cli.image.as_deref(), &cli.engine, &cli.grouping),
    }
}
