/// Example: Load and render a scene file in the terminal
///
/// Usage: cargo run --example load_scene -- path/to/scene.toml

use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use wf3d_core::{SceneConfig, Tick};
use wf3d_terminal::logging::{init_logging, LoggingConfig};
use wf3d_terminal::TerminalBackend;

const DEFAULT_SCENE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/scenes/showcase.toml");

fn main() -> Result<()> {
    init_logging(LoggingConfig::default())?;

    let args: Vec<String> = env::args().collect();
    let scene_path = match args.get(1) {
        Some(path) => path.clone(),
        None => {
            eprintln!("Usage: {} <scene-file>", args[0]);
            eprintln!("\nNo scene file provided, using {DEFAULT_SCENE}...");
            DEFAULT_SCENE.to_string()
        }
    };

    println!("Loading scene file: {}", scene_path);
    let scene = SceneConfig::load(Path::new(&scene_path))
        .with_context(|| format!("failed to load {scene_path}"))?;
    let mut world = scene
        .build_world()
        .context("invalid scene")?
        .with_update(|tick: &mut Tick<'_>| {
            for shape in tick.shapes.iter_mut() {
                shape.rotation.rotate(0.01, 0.015, 0.0);
            }
            if tick.keys.is_pressed(wf3d_core::Key::Char('q')) {
                tick.stop();
            }
        });

    println!("Loaded {} shapes (press Q or Ctrl+C to quit)...", world.objects().len());
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut backend = TerminalBackend::new(world.config().width, world.config().height)?;
    world.display(&mut backend, scene.window.fps)?;
    drop(backend);

    println!("Thank you for using wf3d!");
    Ok(())
}
