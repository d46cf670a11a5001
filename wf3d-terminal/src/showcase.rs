/// Built-in demo scene and keyboard controls
use nalgebra::Point3;
use wf3d_core::{Color, ConfigError, Key, Texture, Tick, World, WorldConfig};

/// Size change per tick while W/S is held
pub const GROW_STEP: f64 = 5.0;
/// Angle change per tick, on every axis, while A/D is held
pub const SPIN_STEP: f64 = 0.01;

/// A grid of green cubes plus one prism, on a grey 1000x800 surface
pub fn showcase_world(grid: u32, cube_size: f64) -> Result<World, ConfigError> {
    let mut world = World::new(WorldConfig {
        background: Color::rgb(100, 100, 100),
        width: 1000,
        height: 800,
        title: Some("wf3d showcase".to_string()),
        icon: None,
    })?;

    let texture = Texture::color((0, 255, 0));
    let mut shapes = Vec::with_capacity((grid * grid) as usize + 1);
    for y in 0..grid {
        for x in 0..grid {
            let position = Point3::new(x as f64 * cube_size, y as f64 * cube_size, 0.0);
            shapes.push(
                world
                    .cube(cube_size)
                    .appearance(texture.clone())
                    .position(position)
                    .build()?,
            );
        }
    }
    shapes.push(
        world
            .prism(cube_size * 3.0)
            .appearance(Color::rgb(200, 60, 60))
            .outline_height(2)
            .build()?,
    );
    world.add_objects(shapes);
    Ok(world)
}

/// W/S grow and shrink, A/D spin, Q/Esc quit
pub fn controls(tick: &mut Tick<'_>) {
    if tick.keys.is_pressed(Key::Char('q')) || tick.keys.is_pressed(Key::Esc) {
        tick.stop();
        return;
    }

    let grow = match (tick.keys.is_pressed(Key::Char('w')), tick.keys.is_pressed(Key::Char('s'))) {
        (true, false) => GROW_STEP,
        (false, true) => -GROW_STEP,
        _ => 0.0,
    };
    let spin = match (tick.keys.is_pressed(Key::Char('d')), tick.keys.is_pressed(Key::Char('a'))) {
        (true, false) => SPIN_STEP,
        (false, true) => -SPIN_STEP,
        _ => 0.0,
    };

    for shape in tick.shapes.iter_mut() {
        shape.size += grow;
        shape.rotation.rotate(spin, spin, spin);
    }
}
