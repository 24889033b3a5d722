use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use padframe::{
    BatchQueue, Color, Config, FileStatus, Orchestrator, ProgressEvent, StatusKind,
    ZipArchiveWriter,
};

#[derive(Parser, Debug)]
#[command(name = "padframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Frame images into every configured format and write a ZIP archive.
    Process(ProcessArgs),
    /// Print the default configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Configuration JSON (formats, style, padding, quality).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas color, e.g. `#FFFFFF`.
    #[arg(long)]
    background: Option<Color>,

    /// Draw a drop shadow under each image.
    #[arg(long)]
    shadow: bool,

    /// Padding ratio applied to each side, in `[0, 0.5)`.
    #[arg(long)]
    padding: Option<f64>,

    /// JPEG quality in `(0, 1]`.
    #[arg(long)]
    quality: Option<f32>,

    /// Output ZIP path. Defaults to `processed_images_{unix_ms}.zip` in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also write every JPEG into this directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Input images (webp, png, jpg, jpeg).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Process(args) => cmd_process(args),
        Command::Config => cmd_config(),
    }
}

fn cmd_config() -> anyhow::Result<()> {
    println!("{}", Config::default().to_json_pretty()?);
    Ok(())
}

fn load_config(args: &ProcessArgs) -> anyhow::Result<Config> {
    let mut cfg = match &args.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => Config::default(),
    };
    if let Some(color) = args.background {
        cfg.style.background_color = color;
    }
    if args.shadow {
        cfg.style.apply_shadow = true;
    }
    if let Some(ratio) = args.padding {
        cfg.render.padding_ratio = ratio;
    }
    if let Some(quality) = args.quality {
        cfg.render.jpeg_quality = quality;
    }
    cfg.validate().context("validate config")?;
    Ok(cfg)
}

fn cmd_process(args: ProcessArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args)?;
    let formats = cfg.format_list()?;
    let orchestrator = Orchestrator::new(&formats, cfg.style, cfg.render)?;

    let mut queue = BatchQueue::new();
    for path in &args.inputs {
        if !padframe::is_supported_extension(path) {
            warn!(path = %path.display(), "skipping unsupported file type");
            continue;
        }
        if let Err(e) = queue.add_path(path) {
            warn!(path = %path.display(), "skipping unreadable input: {e}");
        }
    }
    if queue.is_empty() {
        anyhow::bail!("no readable input images (expected webp, png, jpg or jpeg)");
    }

    let summary = orchestrator.run_with_progress(&mut queue, |event| match event {
        ProgressEvent::FileStarted {
            name,
            position,
            total,
            ..
        } => info!("[{position}/{total}] {name}"),
        ProgressEvent::FileFinished {
            name,
            status: StatusKind::Error,
            ..
        } => warn!("{name} failed"),
        ProgressEvent::FileFinished { .. } => {}
    });

    for file in queue.iter() {
        if let FileStatus::Error(reason) = file.status() {
            eprintln!("error: {}: {reason}", file.name());
        }
    }

    if let Some(dir) = &args.out_dir {
        write_outputs(&queue, dir)?;
    }

    let mut writer = ZipArchiveWriter::default();
    if let Some(bytes) = padframe::package(&queue, &mut writer)? {
        let out = args
            .out
            .clone()
            .unwrap_or_else(|| PathBuf::from(padframe::default_archive_file_name()));
        if let Some(parent) = out.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output directory '{}'", parent.display()))?;
        }
        std::fs::write(&out, bytes).with_context(|| format!("write '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }

    eprintln!(
        "completed {} / failed {} / skipped {}",
        summary.completed, summary.failed, summary.skipped
    );
    if queue.count(StatusKind::Completed) == 0 {
        anyhow::bail!("no file completed");
    }
    Ok(())
}

fn write_outputs(queue: &BatchQueue, dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output directory '{}'", dir.display()))?;
    for entry in padframe::collect_entries(queue) {
        let path = dir.join(entry.file_name);
        std::fs::write(&path, entry.bytes)
            .with_context(|| format!("write '{}'", path.display()))?;
    }
    eprintln!("wrote outputs to {}", dir.display());
    Ok(())
}
