use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use lpuvis::{EncoderPreference, JsonLoader, RunOpts, load_project};

#[derive(Parser, Debug)]
#[command(name = "lpuvis", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Animate a project to a video file or a live preview.
    Render(RenderArgs),
    /// Render only the terminal frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output video path; omit for a live preview.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Video codec.
    #[arg(long)]
    codec: Option<String>,

    /// Timesteps advanced per frame (0 renders only the terminal frame).
    #[arg(long)]
    interval: Option<usize>,

    /// Encoder binary.
    #[arg(long, value_enum)]
    encoder: Option<EncoderPreference>,

    /// Also save the terminal frame as a PNG.
    #[arg(long)]
    final_frame: Option<PathBuf>,

    /// Resolution of the terminal frame.
    #[arg(long, default_value_t = 300.0)]
    dpi: f64,

    /// Image file backing the live preview (instead of the window, when built with it).
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Font file for titles and labels.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Output resolution.
    #[arg(long, default_value_t = 300.0)]
    dpi: f64,

    /// Font file for titles and labels.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut vis = load_project(&args.in_path, &JsonLoader)
        .with_context(|| format!("load project '{}'", args.in_path.display()))?;

    let cfg = vis.config_mut();
    if let Some(out) = args.out {
        cfg.out_path = Some(out);
    }
    if let Some(fps) = args.fps {
        cfg.fps = fps;
    }
    if let Some(codec) = args.codec {
        cfg.codec = codec;
    }
    if let Some(interval) = args.interval {
        cfg.update_interval = interval;
    }
    if let Some(encoder) = args.encoder {
        cfg.encoder = encoder;
    }
    if let Some(font) = args.font {
        cfg.font = Some(font);
    }

    let opts = RunOpts {
        final_frame: args.final_frame,
        final_dpi: args.dpi,
        preview: args.preview,
    };
    let stats = vis.run(&opts).context("render project")?;

    if let Some(out) = &vis.config().out_path {
        eprintln!("wrote {}", out.display());
    }
    if let Some(path) = &opts.final_frame {
        eprintln!("wrote {}", path.display());
    }
    eprintln!(
        "{} ticks, {} frames, stride {}",
        stats.ticks, stats.frames_rendered, stats.effective_stride
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut vis = load_project(&args.in_path, &JsonLoader)
        .with_context(|| format!("load project '{}'", args.in_path.display()))?;

    let cfg = vis.config_mut();
    cfg.out_path = None;
    cfg.update_interval = 0;
    if let Some(font) = args.font {
        cfg.font = Some(font);
    }

    let opts = RunOpts {
        final_dpi: args.dpi,
        ..RunOpts::final_frame(&args.out)
    };
    vis.run(&opts)
        .with_context(|| format!("render frame '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
