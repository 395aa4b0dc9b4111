use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "roundel", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a badge as a PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Badge JSON (camelCase keys: name, title, outlineColor, backgroundColor, fontColor, image,
    /// imageScale, fontSize, size).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Override the bottom-arc text.
    #[arg(long)]
    name: Option<String>,

    /// Override the top-arc text.
    #[arg(long)]
    title: Option<String>,

    /// Override the decal url (relative paths resolve against the config directory).
    #[arg(long)]
    image: Option<String>,

    /// Font file used for all text instead of a system font.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut patch = match &args.config {
        Some(path) => roundel::BadgePatch::from_path(path)?,
        None => roundel::BadgePatch::default(),
    };
    if args.name.is_some() {
        patch.name = args.name;
    }
    if args.title.is_some() {
        patch.title = args.title;
    }
    if args.image.is_some() {
        patch.image = args.image;
    }

    let config = roundel::BadgeConfig::from_patch(&patch);
    let size = config.size();
    let decal_root = args
        .config
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));
    let loader = roundel::FsDecalLoader::new(decal_root);
    let mut renderer = roundel::BadgeRenderer::with_config(config, loader)
        .with_opts(roundel::RendererOpts::from_env());

    let mut surface = match &args.font {
        Some(font) => roundel::CpuSurface::with_font_file(size.max(1), size.max(1), font)?,
        None => roundel::CpuSurface::new(size.max(1), size.max(1))?,
    };

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    let report = rt.block_on(renderer.make(&mut surface))?;
    if let Some(e) = report.decal.error() {
        eprintln!("warning: {e}");
    }

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    surface.frame().save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
