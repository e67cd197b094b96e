use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use subtitle_stitch::{ColorDef, FontBook, FontWeightToken, Session, StyleSettings};

#[derive(Parser, Debug)]
#[command(name = "subtitle-stitch", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Stack caption lines under an image and write a PNG.
    Render(RenderArgs),
    /// Print the output size for an image and a line count.
    Dims(DimsArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image.
    #[arg(long)]
    image: PathBuf,

    #[command(flatten)]
    caption: CaptionArgs,

    /// JSON style file; flags given on the command line win over it.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,

    /// Extra font file to register (repeatable).
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Output PNG path.
    #[arg(long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// Output directory; the file is named `<basename>_subtitle.png`.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct CaptionArgs {
    /// Caption text; a literal `\n` starts a new line.
    #[arg(long)]
    text: Option<String>,

    /// File holding the caption, one line per strip.
    #[arg(long)]
    text_file: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Strip height in pixels (parsed leniently, e.g. `80px`).
    #[arg(long)]
    subtitle_height: Option<String>,

    /// Font size in pixels (parsed leniently).
    #[arg(long)]
    font_size: Option<String>,

    /// Fill color, e.g. `#FFFFFF` or `white`.
    #[arg(long)]
    font_color: Option<ColorDef>,

    /// Outline color.
    #[arg(long)]
    outline_color: Option<ColorDef>,

    /// Font family name.
    #[arg(long)]
    font_family: Option<String>,

    /// `normal`, `bold`, `lighter`, `bolder` or 1..=1000.
    #[arg(long)]
    font_weight: Option<FontWeightToken>,
}

#[derive(Parser, Debug)]
struct DimsArgs {
    /// Input image.
    #[arg(long)]
    image: PathBuf,

    /// Number of caption lines.
    #[arg(long)]
    lines: usize,

    /// Strip height in pixels (parsed leniently).
    #[arg(long)]
    subtitle_height: Option<String>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Dims(args) => cmd_dims(args),
    }
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let caption = match (&args.caption.text, &args.caption.text_file) {
        (Some(text), _) => text.replace("\\n", "\n"),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("read caption '{}'", path.display()))?,
        (None, None) => anyhow::bail!("either --text or --text-file is required"),
    };

    let mut settings = match &args.config {
        Some(path) => StyleSettings::from_json_path(path)?,
        None => StyleSettings::default(),
    };
    settings = settings.merged_with(args.style.into_settings());

    let mut fonts = FontBook::new();
    for path in &args.fonts {
        fonts.register_font_file(path)?;
    }
    let mut session = Session::with_fonts(fonts);

    let file_name = file_name_of(&args.image)?;
    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;
    session.upload(&file_name, None, &bytes)?;
    session.generate(&caption, &settings)?;

    let (name, png) = session.export()?;
    let out = match (args.out, args.out_dir) {
        (Some(out), _) => out,
        (None, Some(dir)) => dir.join(name),
        (None, None) => PathBuf::from(name),
    };

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, png).with_context(|| format!("write png '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_dims(args: DimsArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;
    let image = subtitle_stitch::decode_image(&bytes)?;
    let subtitle_height = args
        .subtitle_height
        .as_deref()
        .and_then(subtitle_stitch::parse_px)
        .unwrap_or(subtitle_stitch::DEFAULT_SUBTITLE_HEIGHT);

    let (w, h) = subtitle_stitch::compute_output_dimensions(&image, subtitle_height, args.lines);
    println!("{w}x{h}");
    Ok(())
}

impl StyleArgs {
    fn into_settings(self) -> StyleSettings {
        StyleSettings {
            subtitle_height: self.subtitle_height,
            font_size: self.font_size,
            font_color: self.font_color,
            outline_color: self.outline_color,
            font_family: self.font_family,
            font_weight: self.font_weight,
        }
    }
}

fn file_name_of(path: &Path) -> anyhow::Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("image path '{}' has no file name", path.display()))
}
