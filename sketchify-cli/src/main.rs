use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use sketchify::{
    FrameSampler, NonSelectedAreaMode, Selection, Sketcher, Style, StyleParams, StyleSettings,
};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "sketchify", version)]
struct Cli {
    /// Log pipeline events to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stylize an image and write it as PNG.
    Render(RenderArgs),
    /// Write a progressive "being drawn" GIF.
    Animate(AnimateArgs),
    /// List the available styles.
    Styles,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Settings JSON, e.g. `{"style":"ink","lineStrength":70,"inkTexture":40}`.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Style to use; replaces the settings file's style (and its parameters) when they differ.
    #[arg(long)]
    style: Option<Style>,

    /// Mark opacity, 1-100.
    #[arg(long)]
    line_strength: Option<f64>,

    /// Edge sensitivity, 1-100.
    #[arg(long)]
    detail: Option<f64>,

    /// Tone pass strength, 0-100.
    #[arg(long)]
    shading: Option<f64>,

    /// Fixed random seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Selections JSON (an array); when given, only these regions are stylized, each with the
    /// settings recorded in its own entry.
    #[arg(
        long,
        conflicts_with_all = ["settings", "style", "line_strength", "detail", "shading"]
    )]
    selections: Option<PathBuf>,

    /// Leave pixels outside every selection transparent instead of original.
    #[arg(long, default_value_t = false, requires = "selections")]
    transparent: bool,

    #[command(flatten)]
    style: StyleArgs,
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
    #[arg(long, default_value_t = sketchify::DEFAULT_STEPS)]
    steps: u32,

    /// Delay between frames in milliseconds.
    #[arg(long, default_value_t = sketchify::GIF_FRAME_DELAY_MS)]
    delay_ms: u32,

    #[command(flatten)]
    style: StyleArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Styles => cmd_styles(),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let image = read_image(&args.in_path)?;
    let mut rng = make_rng(args.style.seed);

    let out = match &args.selections {
        Some(path) => {
            let selections = read_selections(path)?;
            let mode = if args.transparent {
                NonSelectedAreaMode::Transparent
            } else {
                NonSelectedAreaMode::Original
            };
            sketchify::apply_style_with_selections(&image, &selections, mode, &mut rng)?
        }
        None => {
            let settings = resolve_settings(&args.style)?;
            sketchify::apply_style(&image, &settings, &mut rng)
        }
    };

    let bytes = sketchify::encode_png(&out)?;
    write_output(&args.out, &bytes)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let image = read_image(&args.in_path)?;
    let settings = resolve_settings(&args.style)?;
    let mut rng = make_rng(args.style.seed);

    let sampler = FrameSampler::new(Sketcher);
    let frames = sampler.sample_frames(&image, &settings, args.steps, &mut rng);
    let bitmaps: Vec<_> = frames.into_iter().map(|f| f.image).collect();
    let bytes = sketchify::encode_gif(&bitmaps, args.delay_ms)?;
    write_output(&args.out, &bytes)?;
    eprintln!("wrote {} ({} frames)", args.out.display(), bitmaps.len());
    Ok(())
}

fn cmd_styles() -> anyhow::Result<()> {
    for style in Style::ALL {
        let bg = style.background();
        println!("{style:<14} paper #{:02x}{:02x}{:02x}", bg.r, bg.g, bg.b);
    }
    Ok(())
}

fn resolve_settings(args: &StyleArgs) -> anyhow::Result<StyleSettings> {
    let mut settings = match &args.settings {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read settings '{}'", path.display()))?;
            StyleSettings::from_json(&json)
                .with_context(|| format!("parse settings '{}'", path.display()))?
        }
        None => StyleSettings::default(),
    };
    if let Some(style) = args.style
        && style != settings.style()
    {
        settings = settings.with_params(StyleParams::default_for(style));
    }
    if let Some(v) = args.line_strength {
        settings = settings.with_line_strength(v);
    }
    if let Some(v) = args.detail {
        settings = settings.with_detail(v);
    }
    if let Some(v) = args.shading {
        settings = settings.with_shading(v);
    }
    Ok(settings)
}

fn read_image(path: &Path) -> anyhow::Result<sketchify::Bitmap> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let image = sketchify::decode_image(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(image)
}

fn read_selections(path: &Path) -> anyhow::Result<Vec<Selection>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read selections '{}'", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parse selections '{}'", path.display()))
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => sketchify::seeded_rng(seed),
        None => sketchify::entropy_rng(),
    }
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}
