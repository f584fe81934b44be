use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use scrollseq::{
    DEFAULT_MAX_SETTLE_TICKS, Fps, FsLoader, Page, PageConfig, PngSequenceSink, ScrollPath,
    ScrollSession, Viewport,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrollseq", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the settled view at one scroll position as a PNG.
    Frame(FrameArgs),
    /// Render a scripted scroll to a PNG sequence.
    Play(PlayArgs),
    /// Print per-section progress, frame index and overlay values as JSON.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
struct PageArgs {
    /// Page JSON. The built-in showcase page is used when omitted.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Directory frame URLs are resolved against. Defaults to the page JSON's directory.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Override the viewport, as WIDTHxHEIGHT.
    #[arg(long)]
    viewport: Option<Viewport>,

    /// Clock rate used to tick the springs.
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

#[derive(Args, Debug)]
struct Position {
    /// Document scroll offset in pixels.
    #[arg(long, conflicts_with = "fraction")]
    scroll: Option<f64>,

    /// Scroll offset as a fraction of the scrollable height.
    #[arg(long)]
    fraction: Option<f64>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    page: PageArgs,

    #[command(flatten)]
    at: Position,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    page: PageArgs,

    /// Start scroll offset in pixels.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// End scroll offset in pixels. Defaults to the bottom of the page.
    #[arg(long)]
    to: Option<f64>,

    /// Scroll duration in seconds.
    #[arg(long, default_value_t = 4.0)]
    duration: f64,

    /// Extra seconds at the end position.
    #[arg(long, default_value_t = 1.0)]
    hold: f64,

    /// Output directory for `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    page: PageArgs,

    #[command(flatten)]
    at: Position,

    /// Do not load frames (drawn indices stay empty).
    #[arg(long, default_value_t = false)]
    no_load: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Play(args) => cmd_play(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_session(args: &PageArgs, load: bool) -> anyhow::Result<ScrollSession> {
    let mut config = match &args.in_path {
        Some(path) => PageConfig::from_path(path)?,
        None => PageConfig::showcase(),
    };
    if let Some(viewport) = args.viewport {
        config.viewport = viewport;
    }
    let fps = Fps::new(args.fps, 1)?;

    let mut page = Page::new(config)?;
    page.start()?;
    if load {
        let root = assets_root(args);
        let mut loader = FsLoader::new(&root);
        let n = page.load_all(&mut loader)?;
        let failed: usize = page
            .sections()
            .iter()
            .map(|s| s.sequence().frames().failed_count())
            .sum();
        tracing::info!(frames = n, failed, root = %root.display(), "frames loaded");
    }
    Ok(ScrollSession::new(page, fps))
}

fn assets_root(args: &PageArgs) -> PathBuf {
    if let Some(root) = &args.assets {
        return root.clone();
    }
    args.in_path
        .as_deref()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn scroll_position(at: &Position, page: &Page) -> f64 {
    match (at.scroll, at.fraction) {
        (Some(y), _) => y,
        (None, Some(f)) => f * page.max_scroll(),
        (None, None) => 0.0,
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut sess = open_session(&args.page, true)?;
    let y = scroll_position(&args.at, sess.page());
    let frame = sess.render_settled(y, DEFAULT_MAX_SETTLE_TICKS)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    scrollseq::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut sess = open_session(&args.page, true)?;
    let to = args.to.unwrap_or_else(|| sess.page().max_scroll());
    let path = ScrollPath::linear(args.from, to, args.duration)?.with_hold(args.hold)?;

    let mut sink = PngSequenceSink::new(&args.out_dir);
    let stats = sess.play(&path, &mut sink)?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let mut sess = open_session(&args.page, !args.no_load)?;
    let y = scroll_position(&args.at, sess.page());
    sess.render_settled(y, DEFAULT_MAX_SETTLE_TICKS)?;

    let report = sess.page().report();
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize page report")?
    );
    Ok(())
}
