use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::EnvFilter;

use brandframe::scene::presets;
use brandframe::{
    CanvasFormat, CreativePipeline, CreativeRequestDef, EditRequest, FontSet, FontSource,
    ImageEditor as _, PipelineOpts, PlaceholderEditor, StylePreset,
};

#[derive(Parser, Debug)]
#[command(name = "brandframe", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a creative PNG from a request JSON.
    Generate(GenerateArgs),
    /// Run the placeholder editor over an image.
    Edit(EditArgs),
    /// List the background style presets.
    Presets(PresetsArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input request JSON. Asset paths resolve relative to its directory.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Override the request's seed.
    #[arg(long)]
    seed: Option<u32>,

    /// Override the request's style preset (e.g. `bold-poster`).
    #[arg(long)]
    style: Option<StylePreset>,

    /// Override the canvas format (`1080x1080` or `1080x1350`).
    #[arg(long)]
    format: Option<CanvasFormat>,

    /// Font file for copy. Defaults to `BRANDFRAME_FONT_PATH`, then system fonts.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PresetsArgs {
    /// Print the catalogue as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct EditArgs {
    /// Input image (PNG, JPEG or SVG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Edit instruction.
    #[arg(long)]
    instructions: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Font file for the watermark.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Edit(args) => cmd_edit(args),
        Command::Presets(args) => cmd_presets(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn font_source(font: Option<PathBuf>) -> FontSource {
    match font {
        Some(path) => FontSource::File(path),
        None => PipelineOpts::from_env().font_source,
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut def = CreativeRequestDef::from_path(&args.in_path)?;
    if let Some(seed) = args.seed {
        def.settings.seed = seed;
    }
    if let Some(style) = args.style {
        def.settings.style_preset = style;
    }
    if let Some(format) = args.format {
        def.format = format;
    }

    let assets_root = args.in_path.parent().unwrap_or_else(|| Path::new("."));
    let req = def.load(assets_root)?;

    let pipeline = CreativePipeline::new(PipelineOpts {
        font_source: font_source(args.font),
    })?;
    let creative = pipeline.generate(&req)?;
    for w in &creative.warnings {
        eprintln!("warning: {w}");
    }

    write_output(&args.out, &creative.png)?;
    eprintln!(
        "wrote {} ({}x{})",
        args.out.display(),
        creative.width,
        creative.height
    );
    println!("sha256: {}", sha256_hex(&creative.png));
    Ok(())
}

fn cmd_edit(args: EditArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    let fonts = FontSet::resolve(&font_source(args.font))?;
    let editor = PlaceholderEditor::new(fonts);

    let mut on_progress = |p: u8| {
        eprint!("\rediting: {p:>3}%");
        if p == 100 {
            eprintln!();
        }
        let _ = std::io::stderr().flush();
    };
    let edited = editor.edit(EditRequest {
        image_bytes: &bytes,
        instruction_text: &args.instructions,
        on_progress: &mut on_progress,
    })?;

    write_output(&args.out, &edited)?;
    eprintln!("wrote {}", args.out.display());
    println!("sha256: {}", sha256_hex(&edited));
    Ok(())
}

fn cmd_presets(args: PresetsArgs) -> anyhow::Result<()> {
    let catalogue = presets::catalogue();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&catalogue)?);
        return Ok(());
    }
    for p in catalogue {
        println!(
            "{:<18} {:<18} layers={:<3} {:?}/{:?}  {}",
            p.id.as_str(),
            p.name,
            p.layer_count,
            p.complexity,
            p.color_usage,
            p.description
        );
    }
    Ok(())
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
