use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use tessera_engine::{filters::DitherMode, EditorSession, EngineSettings, FlipDirection};

mod config;

#[derive(Parser)]
#[command(version, about = "Edits and exports tessera pixel art projects.", long_about = None)]
pub struct Cli {
    #[arg(help = "Settings file to use instead of the one in the config directory.", long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create an empty project")]
    New {
        #[arg(help = "Canvas size in cells (the canvas is square).")]
        size: String,
        #[arg(help = "Project file to write.", short, long)]
        output: PathBuf,
        #[arg(help = "Number of layers.", long)]
        layers: Option<usize>,
    },

    #[command(about = "Mirror a layer")]
    Flip {
        file: PathBuf,
        #[arg(help = "h mirrors left/right, v mirrors top/bottom.")]
        direction: Direction,
        #[arg(help = "Layer index, defaults to the active layer.", long)]
        layer: Option<usize>,
    },

    #[command(about = "Run a filter over a layer")]
    Filter {
        file: PathBuf,
        filter: FilterKind,
        #[arg(help = "Motion blur direction in degrees.", long, default_value_t = 0.0)]
        angle: f64,
        #[arg(help = "Layer index, defaults to the active layer.", long)]
        layer: Option<usize>,
    },

    #[command(about = "Create a project from a square image")]
    Import {
        image: PathBuf,
        #[arg(help = "Project file to write.", short, long)]
        output: PathBuf,
        #[arg(help = "Canvas size in cells, defaults to the configured grid size.", long)]
        size: Option<String>,
    },

    #[command(about = "Export a project as image, image sequence or animation")]
    Export {
        file: PathBuf,
        format: ExportFormat,
        #[arg(help = "Output file (png, gif) or directory (sequence).")]
        out: PathBuf,
        #[arg(help = "Pixels per cell.", long)]
        scale: Option<u32>,
    },

    #[command(about = "Print a summary of a project")]
    Info { file: PathBuf },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Direction {
    #[value(alias = "horizontal")]
    H,
    #[value(alias = "vertical")]
    V,
}

impl From<Direction> for FlipDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::H => FlipDirection::Horizontal,
            Direction::V => FlipDirection::Vertical,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterKind {
    Blur,
    MotionBlur,
    Floyd,
    Ordered,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ExportFormat {
    Png,
    Sequence,
    Gif,
}

fn init_logging() -> anyhow::Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str("info")?;
    let logger = match config::log_dir() {
        Some(log_dir) => logger
            .log_to_file(FileSpec::default().directory(&log_dir).basename("tessera").suffix("log").suppress_timestamp())
            .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
            .duplicate_to_stderr(Duplicate::Warn),
        None => logger.log_to_stderr(),
    };
    Ok(logger.start()?)
}

fn open_session(settings: &EngineSettings, file: &Path) -> anyhow::Result<EditorSession> {
    let mut session = EditorSession::new(settings.clone());
    session.load_project(file).with_context(|| format!("loading {}", file.display()))?;
    Ok(session)
}

fn save_session(session: &mut EditorSession, file: &Path) -> anyhow::Result<()> {
    session.save_project(file).with_context(|| format!("saving {}", file.display()))
}

/// Runs `edit` on `layer` (or the active layer) and makes the previously active layer active again,
/// so the saved project keeps its selection.
fn edit_layer(session: &mut EditorSession, layer: Option<usize>, edit: impl FnOnce(&mut EditorSession) -> tessera_engine::Result<()>) -> anyhow::Result<()> {
    let previous = session.active_layer();
    if let Some(layer) = layer {
        if !session.set_active_layer(layer)? {
            anyhow::bail!("layer {layer} does not exist (project has {})", session.layer_count());
        }
    }
    edit(session)?;
    session.set_active_layer(previous)?;
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = config::load_settings(cli.settings.as_deref());

    match cli.command {
        Commands::New { size, output, layers } => {
            let mut session = EditorSession::new(settings);
            session.new_canvas_from_str(&size)?;
            if let Some(layers) = layers {
                session.set_layer_count(layers)?;
            }
            save_session(&mut session, &output)?;
            println!("created {}", output.display());
        }
        Commands::Flip { file, direction, layer } => {
            let mut session = open_session(&settings, &file)?;
            edit_layer(&mut session, layer, |session| session.flip(direction.into()))?;
            save_session(&mut session, &file)?;
        }
        Commands::Filter { file, filter, angle, layer } => {
            let mut session = open_session(&settings, &file)?;
            edit_layer(&mut session, layer, |session| match filter {
                FilterKind::Blur => session.blur(),
                FilterKind::MotionBlur => session.motion_blur(angle),
                FilterKind::Floyd => session.dither(DitherMode::FloydSteinberg),
                FilterKind::Ordered => session.dither(DitherMode::Ordered),
            })?;
            save_session(&mut session, &file)?;
        }
        Commands::Import { image, output, size } => {
            let mut session = EditorSession::new(settings);
            if let Some(size) = size {
                session.new_canvas_from_str(&size)?;
            }
            session.import_image(&image).with_context(|| format!("importing {}", image.display()))?;
            save_session(&mut session, &output)?;
            println!("created {}", output.display());
        }
        Commands::Export { file, format, out, scale } => {
            let mut session = open_session(&settings, &file)?;
            if let Some(scale) = scale {
                session.set_export_scale(scale);
            }
            match format {
                ExportFormat::Png => {
                    session.export_png(&out)?;
                    println!("wrote {}", out.display());
                }
                ExportFormat::Sequence => {
                    let paths = session.export_sequence(&out)?;
                    println!("wrote {} frames to {}", paths.len(), out.display());
                }
                ExportFormat::Gif => {
                    let frames = session.export_gif(&out)?;
                    println!("wrote {frames} frames to {}", out.display());
                }
            }
        }
        Commands::Info { file } => {
            let session = open_session(&settings, &file)?;
            let model = session.model();
            println!("{}: {size}x{size} cells", file.display(), size = session.grid_size());
            println!("frame rate: {} fps", session.frame_rate());
            for (i, track) in model.tracks().iter().enumerate() {
                let props = &track.buffer().properties;
                let active = if i == model.active_layer() { "*" } else { " " };
                println!(
                    "{active}{i}: {:<16} frames: {:<3} current: {:<3} {}{}",
                    props.title,
                    track.frames().len(),
                    track.current(),
                    if props.is_visible { "visible" } else { "hidden" },
                    if props.is_animated { ", animated" } else { "" },
                );
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = match init_logging() {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logging: {err}");
            None
        }
    };
    log::debug!("Starting tessera {}", env!("CARGO_PKG_VERSION"));
    run(cli)
}
