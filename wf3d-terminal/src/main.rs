/// wf3d Terminal Demo - Spinning cubes and a prism
///
/// Controls:
///   - W/S: Grow / shrink every shape
///   - A/D: Spin every shape around all three axes
///   - Q/ESC or Ctrl+C: Quit

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use wf3d_core::{Backend, SceneConfig};
use wf3d_terminal::cli::Args;
use wf3d_terminal::logging::{init_logging, LoggingConfig};
use wf3d_terminal::showcase::{controls, showcase_world};
use wf3d_terminal::TerminalBackend;

const DEFAULT_FPS: f64 = 30.0;

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(LoggingConfig {
        filter: args.log.clone(),
        file: args.log_file.clone(),
    })
    .with_context(|| format!("failed to open log file {}", args.log_file.display()))?;

    let (world, scene_fps) = match &args.scene {
        Some(path) => {
            let scene = SceneConfig::load(path)
                .with_context(|| format!("failed to load scene {}", path.display()))?;
            let world = scene.build_world().context("invalid scene")?;
            (world, scene.window.fps)
        }
        None => (
            showcase_world(args.grid, args.cube_size).context("failed to build showcase")?,
            DEFAULT_FPS,
        ),
    };
    let mut world = world.with_update(controls);
    let fps = args.fps.unwrap_or(scene_fps);

    let (width, height) = (world.config().width, world.config().height);
    let mut backend = TerminalBackend::new(width, height).context("failed to set up terminal")?;
    info!("rendering {} shapes on {:?}", world.objects().len(), backend.size());

    world
        .display(&mut backend, fps)
        .context("frame loop failed")?;

    drop(backend);
    println!("Thank you for using wf3d!");
    Ok(())
}
