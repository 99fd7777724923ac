use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "doofio", version, about = "Render the DOOFIO welcome screen offline")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single starfield frame as a PNG.
    Frame(FrameArgs),
    /// Render a PNG sequence plus a WAV soundtrack of the tone cues.
    Render(RenderArgs),
    /// Print the typewriter event timeline as JSON.
    Timeline(TimelineArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Welcome config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Welcome config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for frames and `welcome.wav`.
    #[arg(long)]
    out_dir: PathBuf,

    /// Length to render. Defaults to the configured duration.
    #[arg(long)]
    seconds: Option<f64>,

    /// Render with sound off.
    #[arg(long, default_value_t = false)]
    mute: bool,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    /// Welcome config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Timeline(args) => cmd_timeline(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<doofio::WelcomeConfig> {
    match path {
        Some(p) => doofio::WelcomeConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(doofio::WelcomeConfig::default()),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let frame = doofio::render_frame(
        &cfg,
        doofio::FrameIndex(args.frame),
        doofio::PngSequenceSink::DEFAULT_BACKGROUND,
    )?;

    doofio::write_png(&args.out, &frame)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;

    let frames = match args.seconds {
        Some(s) if s.is_finite() && s > 0.0 => {
            Some(cfg.fps.ms_to_frames_ceil((s * 1000.0).round() as u64))
        }
        Some(s) => anyhow::bail!("--seconds must be a positive number, got {s}"),
        None => None,
    };
    let opts = doofio::RenderOpts {
        frames,
        mute: args.mute,
        ..doofio::RenderOpts::default()
    };

    let report = doofio::render_to_dir(&cfg, &args.out_dir, &opts)
        .with_context(|| format!("render into '{}'", args.out_dir.display()))?;

    eprintln!(
        "wrote {} frames and {} tones to {}",
        report.stats.frames_pushed,
        report.tones,
        report.frames_dir.display()
    );
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let events =
        doofio::Sequencer::timeline(&cfg.script, &cfg.typewriter, cfg.load_delay_ms)?;
    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}
