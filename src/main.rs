// src/main.rs
use clap::Parser;
use nannou::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use turtledraw::{
    config::Config,
    controllers::DrawController,
    error::{Error, LoadError, Result},
    models::Document,
    render::{replay, CodeGenSink, DrawSink, ImmediateSink},
    services::svg::load_document,
};

#[derive(Parser, Debug)]
#[command(name = "turtledraw", version, about = "Draws SVG paths with a turtle pen")]
struct Cli {
    /// Write Scheme turtle code instead of drawing in a window
    #[arg(short, long)]
    scheme: bool,

    /// Config file (defaults to config.toml next to the binary, then ./config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for generated code, overriding [output] directory
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// SVG file, JSON document, or previously generated .scm code to replay
    input: PathBuf,
}

struct Model {
    sink: ImmediateSink,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.scheme {
        if let Err(e) = generate(&cli) {
            log::error!("{}", e);
            std::process::exit(1);
        }
        return;
    }

    nannou::app(model).run();
}

fn load(cli: &Cli) -> Result<(Config, Document)> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let document = load_document(&cli.input)?;
    log::info!(
        "Loaded {} ({} top-level groups)",
        cli.input.display(),
        document.group_count()
    );
    Ok((config, document))
}

fn output_path(cli: &Cli, config: &Config) -> Result<PathBuf> {
    let dir = cli
        .output
        .clone()
        .unwrap_or_else(|| config.resolve_output_dir());
    fs::create_dir_all(&dir).map_err(|source| Error::OutputDir {
        path: dir.clone(),
        source,
    })?;
    let stem = cli
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    Ok(dir.join(format!("{}.scm", stem)))
}

fn generate(cli: &Cli) -> Result<()> {
    let (config, document) = load(cli)?;
    let controller = DrawController::new(&config, &document)?;
    let path = output_path(cli, &config)?;

    let mut sink = CodeGenSink::create(&path, config.output.precision)?;
    let summary = controller.run(&document, &mut sink)?;
    println!("[+] Generated {} ({} lines)", path.display(), sink.lines_written());
    println!("    {}", summary);
    Ok(())
}

fn is_generated_code(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("scm"))
}

// previously generated code is replayed rather than re-interpreted
fn replay_code(cli: &Cli) -> Result<(Config, ImmediateSink)> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let source = fs::read_to_string(&cli.input).map_err(|source| LoadError::Io {
        path: cli.input.clone(),
        source,
    })?;
    let mut sink = ImmediateSink::new(config.drawing.pen_width);
    let calls = replay(&source, &mut sink)?;
    sink.finish()?;
    println!("[+] Replayed {} calls from {}", calls, cli.input.display());
    Ok((config, sink))
}

fn draw_immediately(cli: &Cli) -> Result<(Config, ImmediateSink)> {
    if is_generated_code(&cli.input) {
        return replay_code(cli);
    }
    let (config, document) = load(cli)?;
    let controller = DrawController::new(&config, &document)?;
    let mut sink = ImmediateSink::new(config.drawing.pen_width);
    let summary = controller.run(&document, &mut sink)?;
    println!("[+] Drawing complete: {}", summary);
    Ok((config, sink))
}

fn model(app: &App) -> Model {
    // nannou builds the model without arguments, so the CLI is read again here
    let cli = Cli::parse();
    let (config, sink) = match draw_immediately(&cli) {
        Ok(result) => result,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let title = format!("turtledraw - {}", cli.input.display());
    if let Err(e) = app
        .new_window()
        .title(title)
        .size(config.window.width, config.window.height)
        .view(view)
        .build()
    {
        log::error!("Failed to open window: {:?}", e);
        std::process::exit(1);
    }

    Model { sink }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(WHITE);
    model.sink.draw(&draw);
    if let Err(e) = draw.to_frame(app, &frame) {
        log::error!("Failed to render frame: {:?}", e);
    }
}
