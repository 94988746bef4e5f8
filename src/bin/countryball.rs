use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "countryball", version)]
struct Cli {
    /// Log debug diagnostics to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a countryball and write it as a PNG.
    Render(RenderArgs),
    /// List or search flag names for one side.
    Flags(FlagsArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Session config JSON. Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing `flags.json` and `assets/`.
    #[arg(long)]
    assets_root: Option<PathBuf>,

    /// Output image side length in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Template index.
    #[arg(long)]
    template: Option<usize>,

    /// Eye style (`eyes.s1`, `eyes.s2`, `eyes.s3`).
    #[arg(long)]
    eye_style: Option<countryball::EyeStyle>,

    /// Eye index within the style.
    #[arg(long)]
    eye_index: Option<usize>,

    /// Facing side (`left` or `right`).
    #[arg(long)]
    side: Option<countryball::Side>,

    /// Flag index within the side's list.
    #[arg(long)]
    flag: Option<usize>,

    /// Flag file name within the side's list.
    #[arg(long)]
    flag_name: Option<String>,

    /// Photo to use as the background instead of a flag.
    #[arg(long)]
    upload: Option<PathBuf>,

    #[arg(long, allow_hyphen_values = true)]
    eye_offset_x: Option<i32>,

    #[arg(long, allow_hyphen_values = true)]
    eye_offset_y: Option<i32>,

    #[arg(long)]
    eye_size: Option<u32>,

    /// Output PNG path.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FlagsArgs {
    /// Directory containing `flags.json`.
    #[arg(long)]
    assets_root: Option<PathBuf>,

    #[arg(long, default_value = "left")]
    side: countryball::Side,

    /// Ordered-subsequence filter, e.g. `bz` matches `Brazil.png`.
    #[arg(long, default_value = "")]
    query: String,

    /// Search the thumbnail list instead of the side list.
    #[arg(long)]
    thumb: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Flags(args) => cmd_flags(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => countryball::SessionConfig::from_path(path)?,
        None => countryball::SessionConfig::default(),
    };
    cfg.apply_env();

    if let Some(v) = args.assets_root {
        cfg.assets_root = v;
    }
    if let Some(v) = args.size {
        cfg.output_size = v;
    }
    if let Some(v) = args.template {
        cfg.template = v;
    }
    if let Some(v) = args.eye_style {
        cfg.eye_style = v;
        cfg.eye_index = 0;
    }
    if let Some(v) = args.eye_index {
        cfg.eye_index = v;
    }
    if let Some(v) = args.side {
        cfg.side = v;
    }
    if let Some(v) = args.flag {
        cfg.flag_index = v;
        cfg.flag_name = None;
    }
    if let Some(v) = args.flag_name {
        cfg.flag_name = Some(v);
    }
    if let Some(v) = args.upload {
        cfg.upload = Some(v);
    }
    if let Some(v) = args.eye_offset_x {
        cfg.eye_offset_x = v;
    }
    if let Some(v) = args.eye_offset_y {
        cfg.eye_offset_y = v;
    }
    if let Some(v) = args.eye_size {
        cfg.eye_size = v;
    }
    if let Some(v) = args.out {
        cfg.out = v;
    }

    let session = cfg.build_session()?;
    if let Some(msg) = session.notice().message() {
        tracing::warn!("no connection to assets: {msg}");
        eprintln!("warning: some assets could not be reached ({msg})");
    }

    let frame = session.frame().context("session produced no frame")?;
    frame.save_png(&cfg.out)?;
    println!("wrote {}", cfg.out.display());
    Ok(())
}

fn cmd_flags(args: FlagsArgs) -> anyhow::Result<()> {
    let mut cfg = countryball::SessionConfig::default();
    cfg.apply_env();
    if let Some(v) = args.assets_root {
        cfg.assets_root = v;
    }

    let loader = countryball::FsLoader::new(cfg.assets_root);
    let lists = countryball::ResourceLoader::fetch_flag_lists(&loader)
        .with_context(|| format!("fetch flag lists from '{}'", loader.root().display()))?;

    let names = if args.thumb {
        lists.thumb.as_slice()
    } else {
        lists.for_side(args.side)
    };
    for (idx, name) in countryball::filter_names(&args.query, names) {
        println!("{idx}\t{name}");
    }
    Ok(())
}
