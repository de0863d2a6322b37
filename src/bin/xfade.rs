use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "xfade", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crossfade the input images and write every presented frame as a PNG.
    Render(RenderArgs),
    /// Print the frame plan for the given settings without decoding anything.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input images, in presentation order.
    #[arg(long = "input", required = true)]
    inputs: Vec<PathBuf>,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Unit kind to synthesize.
    #[arg(long, value_enum, default_value_t = ModeChoice::Pixel)]
    mode: ModeChoice,

    /// How differently-sized inputs are brought to one resolution.
    #[arg(long, value_enum, default_value_t = FitChoice::Raster)]
    fit: FitChoice,

    /// Synthesize frames on all cores.
    #[arg(long)]
    parallel: bool,

    /// Pace output at the configured frame rate instead of as fast as possible.
    #[arg(long)]
    realtime: bool,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Number of input images.
    #[arg(long)]
    images: usize,

    #[command(flatten)]
    settings: SettingsArgs,
}

#[derive(clap::Args, Debug)]
struct SettingsArgs {
    /// Settings JSON (`transition_duration_secs`, `frame_rate_hz`); flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Transition duration in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Frame rate in hertz.
    #[arg(long)]
    hz: Option<f64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Pixel,
    Blend,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FitChoice {
    Raster,
    Stretch,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn load_settings(args: &SettingsArgs) -> anyhow::Result<xfade::TransitionSettings> {
    let mut settings = match &args.config {
        Some(path) => xfade::TransitionSettings::from_json_file(path)?,
        None => xfade::TransitionSettings::default(),
    };
    if let Some(d) = args.duration {
        settings.transition_duration_secs = d;
    }
    if let Some(hz) = args.hz {
        settings.frame_rate_hz = hz;
    }
    settings.validate()?;
    Ok(settings)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let settings = load_settings(&args.settings)?;
    let opts = xfade::SequenceOpts {
        settings,
        mode: match args.mode {
            ModeChoice::Pixel => xfade::SynthMode::Pixel,
            ModeChoice::Blend => xfade::SynthMode::Blend,
        },
        fit: match args.fit {
            FitChoice::Raster => xfade::FitMode::Raster,
            FitChoice::Stretch => xfade::FitMode::Stretch,
        },
        parallel: args.parallel,
    };

    let inputs = xfade::read_inputs(&args.inputs)?;
    let mut session = xfade::TransitionSession::new(opts)?;
    session
        .prepare(&xfade::ImageCrateDecoder, &inputs)
        .with_context(|| "prepare transition")?;

    let mut presenter = xfade::PngSequencePresenter::new(&args.out)?;
    let report = if args.realtime {
        let mut ticks = xfade::IntervalTicker::from_hz(settings.frame_rate_hz)?;
        session.play(&mut ticks, &mut presenter)?
    } else {
        session.play(&mut xfade::ImmediateTicker::new(), &mut presenter)?
    };

    if !report.completed {
        anyhow::bail!("playback ended before its last frame");
    }
    eprintln!(
        "wrote {} frames to {}",
        presenter.written().len(),
        args.out.display()
    );
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    if args.images == 0 {
        return Err(xfade::XfadeError::EmptyInput.into());
    }
    let settings = load_settings(&args.settings)?;
    // A single image is paired with itself.
    let segments = args.images.max(2) - 1;
    let plan = xfade::plan_from_settings(&settings, segments);

    println!("frame_duration_ms:  {:.3}", settings.frame_duration_ms());
    println!("segments:           {}", plan.segment_count);
    println!("frames_per_segment: {}", plan.frames_per_segment);
    println!("total_units:        {}", plan.total_units());
    Ok(())
}
