use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[derive(Parser, Debug)]
#[command(name = "vgrid", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the widget spec from a layout document.
    Build(BuildArgs),
    /// Print catalog metadata for a local video (requires `ffprobe` on PATH).
    Probe(ProbeArgs),
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Input layout document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Emit the deflate-compressed envelope instead of plain JSON.
    #[arg(long)]
    compressed: bool,

    /// Pretty-print the output JSON.
    #[arg(long)]
    pretty: bool,

    /// Settings JSON replacing the document's settings.
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(long, value_enum)]
    key_mode: Option<vgrid::KeyMode>,

    #[arg(long)]
    blocks_per_page: Option<u32>,

    /// Hide the timeline under each block.
    #[arg(long)]
    no_timeline: bool,

    /// Fetch thumbnails from the frameserver.
    #[arg(long)]
    use_frameserver: bool,
}

#[derive(Parser, Debug)]
struct ProbeArgs {
    /// Local video file.
    path: PathBuf,

    /// Catalog id to assign.
    #[arg(long, default_value = "0")]
    id: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Build(args) => cmd_build(args),
        Command::Probe(args) => cmd_probe(args),
    }
}

fn apply_overrides(args: &BuildArgs, doc: &mut vgrid::SpecDocument) -> anyhow::Result<()> {
    if let Some(path) = &args.settings {
        doc.settings = vgrid::VGridSettings::from_path(path)?;
    }
    if let Some(mode) = args.key_mode {
        doc.settings.key_mode = mode;
    }
    if let Some(n) = args.blocks_per_page {
        doc.settings.blocks_per_page = n;
    }
    if args.no_timeline {
        doc.settings.show_timeline = false;
    }
    if args.use_frameserver {
        doc.settings.use_frameserver = true;
    }
    Ok(())
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let mut doc = vgrid::SpecDocument::from_path(&args.in_path)?;
    apply_overrides(&args, &mut doc)?;
    let spec = doc
        .into_spec()
        .with_context(|| format!("build spec from '{}'", args.in_path.display()))?;

    let text = if args.compressed {
        let env = spec.encode_compressed()?;
        if args.pretty {
            serde_json::to_string_pretty(&env)?
        } else {
            serde_json::to_string(&env)?
        }
    } else {
        let encoded = spec.encode()?;
        if args.pretty {
            encoded.to_json_string_pretty()?
        } else {
            encoded.to_json_string()?
        }
    };

    write_output(args.out.as_deref(), &text)
}

fn cmd_probe(args: ProbeArgs) -> anyhow::Result<()> {
    let meta = vgrid::VideoMetadata::probe(&args.path, args.id.as_str())?;
    let text = serde_json::to_string_pretty(&meta)?;
    write_output(None, &text)
}

fn write_output(out: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(path, text)
                .with_context(|| format!("write output '{}'", path.display()))?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
