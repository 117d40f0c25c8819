use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use spansort::{
    AnimationOpts, AnimationThreading, BucketScale, CompareKind, Direction, EffectConfig,
    FrameSignals, FrameSink, GifSink, MaskSource, SinkConfig, SortInputs, SortOrder,
};

#[derive(Parser, Debug)]
#[command(name = "spansort", version, about = "Mask-driven pixel span sorting")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sort a single image and write a PNG.
    Sort(SortArgs),
    /// Render an animated GIF of the same image with per-frame noise.
    Animate(AnimateArgs),
    /// Render an audio-reactive animated GIF driven by a WAV file.
    Wave(WaveArgs),
    /// Render the spectrum of a WAV file as an animated GIF.
    Spectrum(SpectrumArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum CompareArg {
    Mean,
    Red,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DirectionArg {
    Right,
    Left,
    Up,
    Down,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ScaleArg {
    Linear,
    Log,
}

/// Effect flags shared by every sorting subcommand. Flags override `--config` values.
#[derive(Args, Debug)]
struct EffectArgs {
    /// JSON effect config used as the base for the flags below.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Red-channel threshold (0-255); pixels below it are sorted.
    #[arg(long)]
    threshold: Option<u8>,

    /// Multiplier applied to every span length.
    #[arg(long)]
    scalar: Option<f64>,

    /// Length jitter; negative values also shift span starts.
    #[arg(long, allow_hyphen_values = true)]
    noise: Option<i32>,

    /// Screen direction spans are sorted toward.
    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,

    /// Pixel comparison.
    #[arg(long, value_enum)]
    compare: Option<CompareArg>,

    /// Sort largest first.
    #[arg(long)]
    descend: bool,

    /// Write exactly the mask runs, without bleed.
    #[arg(long)]
    clean: bool,

    /// Swap mask polarity.
    #[arg(long)]
    invert: bool,

    /// Lossy merge write-back.
    #[arg(long)]
    crush: bool,

    /// RNG seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Paint each span one random color.
    #[arg(long)]
    debug_spans: bool,

    /// Force the whole mask active and write gray levels.
    #[arg(long)]
    debug_mask: bool,

    /// Replace the source with random noise.
    #[arg(long)]
    debug_source: bool,
}

impl EffectArgs {
    fn resolve(&self) -> anyhow::Result<EffectConfig> {
        let mut cfg = match &self.config {
            Some(path) => EffectConfig::from_json_path(path)?,
            None => EffectConfig::default(),
        };
        if let Some(t) = self.threshold {
            cfg.threshold = t;
        }
        if let Some(s) = self.scalar {
            cfg.scalar = s;
        }
        if let Some(n) = self.noise {
            cfg.noise_factor = n;
        }
        if let Some(d) = self.direction {
            cfg.direction = match d {
                DirectionArg::Right => Direction::Right,
                DirectionArg::Left => Direction::Left,
                DirectionArg::Up => Direction::Up,
                DirectionArg::Down => Direction::Down,
            };
        }
        if let Some(c) = self.compare {
            cfg.compare = match c {
                CompareArg::Mean => CompareKind::Mean,
                CompareArg::Red => CompareKind::Red,
            };
        }
        if self.descend {
            cfg.order = SortOrder::Descending;
        }
        cfg.clean |= self.clean;
        cfg.invert |= self.invert;
        cfg.crush |= self.crush;
        cfg.debug.span_colors |= self.debug_spans;
        cfg.debug.mask |= self.debug_mask;
        cfg.debug.source_noise |= self.debug_source;
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Parser, Debug)]
struct SortArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the mask used for the pass.
    #[arg(long)]
    mask_out: Option<PathBuf>,

    /// Mask image to use instead of thresholding.
    #[arg(long)]
    mask_in: Option<PathBuf>,

    /// Raw byte file used as a per-row amplitude signal.
    #[arg(long)]
    signal: Option<PathBuf>,

    #[command(flatten)]
    effect: EffectArgs,
}

#[derive(Args, Debug)]
struct ThreadingArgs {
    /// Render frames one after another.
    #[arg(long)]
    sequential: bool,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

impl ThreadingArgs {
    fn opts(&self, mask_path: Option<PathBuf>) -> AnimationOpts {
        AnimationOpts {
            threading: AnimationThreading {
                parallel: !self.sequential,
                threads: self.threads,
            },
            mask_path,
        }
    }
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Number of frames.
    #[arg(long)]
    frames: usize,

    /// Playback rate.
    #[arg(long, default_value_t = 24)]
    framerate: u32,

    /// Mask image to use instead of thresholding.
    #[arg(long)]
    mask_in: Option<PathBuf>,

    /// Also write each frame as FRAME_<n>.png into this directory.
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    #[command(flatten)]
    threading: ThreadingArgs,

    #[command(flatten)]
    effect: EffectArgs,
}

#[derive(Parser, Debug)]
struct WaveArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// PCM WAV file driving the animation.
    #[arg(long)]
    wav: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Playback rate; also the number of spectrum windows per second of audio.
    #[arg(long, default_value_t = 24)]
    framerate: u32,

    /// Spectrum buckets per frame.
    #[arg(long, default_value_t = 64)]
    buckets: usize,

    /// Bucket grouping.
    #[arg(long, value_enum, default_value_t = ScaleArg::Linear)]
    scale: ScaleArg,

    /// Mask image to use instead of thresholding.
    #[arg(long)]
    mask_in: Option<PathBuf>,

    /// Also write each frame as FRAME_<n>.png into this directory.
    #[arg(long)]
    frames_dir: Option<PathBuf>,

    #[command(flatten)]
    threading: ThreadingArgs,

    #[command(flatten)]
    effect: EffectArgs,
}

#[derive(Parser, Debug)]
struct SpectrumArgs {
    /// PCM WAV file.
    #[arg(long)]
    wav: PathBuf,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,

    /// Playback rate.
    #[arg(long, default_value_t = 24)]
    framerate: u32,

    /// Spectrum buckets per frame.
    #[arg(long, default_value_t = 64)]
    buckets: usize,

    /// Bucket grouping.
    #[arg(long, value_enum, default_value_t = ScaleArg::Linear)]
    scale: ScaleArg,

    /// Frame side length in pixels.
    #[arg(long, default_value_t = 512)]
    size: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Sort(args) => cmd_sort(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Wave(args) => cmd_wave(args),
        Command::Spectrum(args) => cmd_spectrum(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn scale_of(arg: ScaleArg) -> BucketScale {
    match arg {
        ScaleArg::Linear => BucketScale::Linear,
        ScaleArg::Log => BucketScale::Log,
    }
}

fn cmd_sort(args: SortArgs) -> anyhow::Result<()> {
    let cfg = args.effect.resolve()?;
    let image = spansort::load_image(&args.in_path)?;
    let signal = args
        .signal
        .as_deref()
        .map(spansort::load_raw_signal)
        .transpose()?;
    let mask = match args.mask_in.as_deref() {
        Some(path) => MaskSource::File(path),
        None => MaskSource::Threshold,
    };

    let mut rng = cfg.rng();
    let sorted = spansort::sort_image(
        image,
        &cfg,
        SortInputs {
            mask,
            signal: signal.as_ref(),
        },
        &mut rng,
    )?;

    spansort::write_png(&sorted.image, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    if let (Some(path), Some(mask)) = (&args.mask_out, &sorted.mask) {
        spansort::write_png(mask.as_image(), path)?;
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let cfg = args.effect.resolve()?;
    let base = spansort::load_image(&args.in_path)?;
    let opts = args.threading.opts(args.mask_in.clone());
    let signals = FrameSignals::Unmodulated(args.frames);
    write_animation(
        &base,
        &signals,
        &cfg,
        &opts,
        args.framerate,
        &args.out,
        args.frames_dir.as_deref(),
    )
}

fn cmd_wave(args: WaveArgs) -> anyhow::Result<()> {
    let cfg = args.effect.resolve()?;
    let base = spansort::load_image(&args.in_path)?;
    let stack =
        spansort::load_wave_stack(&args.wav, args.framerate, args.buckets, scale_of(args.scale))?;
    let opts = args.threading.opts(args.mask_in.clone());
    write_animation(
        &base,
        &FrameSignals::Spectrum(stack),
        &cfg,
        &opts,
        args.framerate,
        &args.out,
        args.frames_dir.as_deref(),
    )
}

fn write_animation(
    base: &spansort::PixelBuffer,
    signals: &FrameSignals,
    cfg: &EffectConfig,
    opts: &AnimationOpts,
    framerate: u32,
    out: &Path,
    frames_dir: Option<&Path>,
) -> anyhow::Result<()> {
    let mut sink = GifSink::new(out);
    match frames_dir {
        None => {
            spansort::render_animation_to_sink(base, signals, cfg, opts, framerate, &mut sink)?;
        }
        Some(dir) => {
            let paths = spansort::render_animation_to_dir(base, signals, cfg, opts, dir)?;
            sink.begin(SinkConfig {
                width: base.width(),
                height: base.height(),
                framerate,
            })?;
            for (idx, path) in paths.iter().enumerate() {
                sink.push_frame(idx, spansort::load_image(path)?)?;
            }
            sink.end()?;
            eprintln!("wrote {} frames into {}", paths.len(), dir.display());
        }
    }
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_spectrum(args: SpectrumArgs) -> anyhow::Result<()> {
    if args.size == 0 {
        anyhow::bail!("--size must be >= 1");
    }
    let stack =
        spansort::load_wave_stack(&args.wav, args.framerate, args.buckets, scale_of(args.scale))?;
    let frames = spansort::render_spectrum_frames(&stack, args.size);

    let mut sink = GifSink::new(&args.out);
    sink.begin(SinkConfig {
        width: args.size,
        height: args.size,
        framerate: args.framerate,
    })?;
    for (idx, frame) in frames.into_iter().enumerate() {
        sink.push_frame(idx, frame)?;
    }
    sink.end()?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
