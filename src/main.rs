use anyhow::Context;
use clap::{ArgAction, Parser};
use low_calorie_draw::assets::{AssetCache, DirectorySource};
use low_calorie_draw::draw::{CanvasRenderer, StrokeStyle};
use low_calorie_draw::ui::{Controls, status_line};
use low_calorie_draw::{Config, DrawingApp, export, script};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(name = "low-calorie-draw")]
#[command(
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("LOW_CALORIE_DRAW_GIT_HASH"), ")"),
    about = "Minimal freehand drawing surface with pen, eraser and undo/redo"
)]
struct Cli {
    /// Replay a JSON-lines input script
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Where to write the rendered PNG (default: timestamped file in the export directory,
    /// or no PNG with --dump-strokes)
    #[arg(long, short = 'o', value_name = "FILE", requires = "script")]
    output: Option<PathBuf>,

    /// Print the committed strokes as JSON after replaying
    #[arg(long, action = ArgAction::SetTrue, requires = "script")]
    dump_strokes: bool,

    /// Use an alternate configuration file
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Populate the offline asset cache from a directory
    #[arg(long, value_name = "DIR")]
    precache: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.script.is_none() && cli.precache.is_none() {
        println!("low-calorie-draw: Minimal freehand drawing surface");
        println!();
        println!("Usage:");
        println!("  low-calorie-draw --script input.jsonl [--output out.png]");
        println!("  low-calorie-draw --precache ./site");
        println!("  low-calorie-draw --help");
        println!();
        println!("Controls (default bindings):");
        println!("  Undo: Ctrl+Z    Redo: Ctrl+Y    Clear: E");
        println!("  Pen: P          Eraser: X");
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(dir) = &cli.precache {
        precache(&config, dir)?;
    }

    if let Some(path) = &cli.script {
        run_script(&config, path, cli.output.as_deref(), cli.dump_strokes)?;
    }

    Ok(())
}

fn precache(config: &Config, dir: &Path) -> anyhow::Result<()> {
    let cache = AssetCache::from_config(&config.assets)?;
    let stored = cache
        .install(&DirectorySource::new(dir))
        .with_context(|| format!("Failed to populate {} from {}", cache.name(), dir.display()))?;
    println!("Cached {} asset(s) in {}", stored, cache.root().display());
    Ok(())
}

fn run_script(
    config: &Config,
    path: &Path,
    output: Option<&Path>,
    dump_strokes: bool,
) -> anyhow::Result<()> {
    let events = script::load(path)
        .with_context(|| format!("Failed to load script {}", path.display()))?;

    let pen = config.drawing.pen_color.to_color();
    let style = StrokeStyle {
        color: pen,
        thickness: config.drawing.thickness,
    };
    let renderer = Rc::new(RefCell::new(CanvasRenderer::new(
        config.canvas.width,
        config.canvas.height,
        config.canvas.background.to_color(),
        style,
    )?));
    let controls = Rc::new(RefCell::new(Controls::new()));

    let mut app = DrawingApp::builder()
        .keybindings(config.keybindings.clone())
        .tool(config.drawing.default_tool)
        .render_sink(Rc::clone(&renderer))
        .affordance_sink(Rc::clone(&controls))
        .build()?;

    let actions = script::replay(&mut app, &events);
    log::info!(
        "Replayed {} event(s), {} key action(s)",
        events.len(),
        actions
    );

    if dump_strokes {
        // A dump writes a PNG only when --output names one.
        if let Some(target) = output {
            export::save_png(&renderer.borrow(), target)?;
        }
        println!("{}", serde_json::to_string_pretty(&app.strokes())?);
        return Ok(());
    }

    let target = match output {
        Some(path) => path.to_path_buf(),
        None => export::timestamped_path(&config.export)?,
    };
    let saved = export::save_png(&renderer.borrow(), &target)?;
    println!("{}", status_line(app.tool(), &pen, app.history(), &controls.borrow()));
    println!("Saved drawing to {}", saved.display());

    Ok(())
}
