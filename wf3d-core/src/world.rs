/// The world: owned shapes, window settings and the frame driver
use log::{debug, info, warn};
use nalgebra::Point3;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::appearance::Color;
use crate::canvas::{Backend, KeySnapshot, WindowEvent};
use crate::error::{ConfigError, DrawError};
use crate::geometry::ShapeKind;
use crate::shape::{Shape, ShapeBuilder};
use crate::time::{FramePacer, FrameTime};

/// Window and background settings
#[derive(Debug, Clone, PartialEq)]
pub struct WorldConfig {
    pub background: Color,
    pub width: u32,
    pub height: u32,
    pub title: Option<String>,
    pub icon: Option<PathBuf>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            width: 800,
            height: 600,
            title: None,
            icon: None,
        }
    }
}

/// Per-tick update callback; its single argument is the tick context
pub type UpdateHook = Box<dyn FnMut(&mut Tick<'_>)>;

/// What an update hook sees on each tick
pub struct Tick<'a> {
    pub keys: &'a KeySnapshot,
    pub shapes: &'a mut [Shape],
    pub frame: FrameTime,
    running: &'a mut bool,
}

impl Tick<'_> {
    /// Ask the frame loop to exit after this frame
    pub fn stop(&mut self) {
        *self.running = false;
    }
}

/// Outcome of rendering one frame
#[derive(Debug, Default)]
pub struct FrameReport {
    pub drawn: usize,
    pub failures: Vec<(usize, DrawError)>,
    /// Shapes whose failure differs from the previous frame's and was warned about
    pub newly_failing: Vec<usize>,
}

pub struct World {
    config: WorldConfig,
    shapes: Vec<Shape>,
    update: Option<UpdateHook>,
    running: bool,
    /// Last draw error per shape index, so a persistent failure warns once
    failing: HashMap<usize, String>,
}

impl World {
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        if config.width == 0 || config.height == 0 {
            return Err(ConfigError::WindowSize {
                width: config.width,
                height: config.height,
            });
        }
        Ok(Self {
            config,
            shapes: Vec::new(),
            update: None,
            running: true,
            failing: HashMap::new(),
        })
    }

    pub fn with_update<F>(mut self, hook: F) -> Self
    where
        F: FnMut(&mut Tick<'_>) + 'static,
    {
        self.update = Some(Box::new(hook));
        self
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Screen centre at z = 0, the default position for new shapes
    pub fn center(&self) -> Point3<f64> {
        Point3::new(self.config.width as f64 / 2.0, self.config.height as f64 / 2.0, 0.0)
    }

    /// Start building a shape positioned at this world's centre
    pub fn shape(&self, kind: ShapeKind, size: f64) -> ShapeBuilder {
        ShapeBuilder::new(kind, size, self.center())
    }

    pub fn cube(&self, size: f64) -> ShapeBuilder {
        self.shape(ShapeKind::Cube, size)
    }

    pub fn prism(&self, size: f64) -> ShapeBuilder {
        self.shape(ShapeKind::Prism, size)
    }

    pub fn add(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Append `shapes` after the existing ones.
    ///
    /// Use [`set_objects`](Self::set_objects) to replace the collection.
    pub fn add_objects<I>(&mut self, shapes: I)
    where
        I: IntoIterator<Item = Shape>,
    {
        self.shapes.extend(shapes);
    }

    /// Replace the whole collection, returning the previous shapes
    pub fn set_objects<I>(&mut self, shapes: I) -> Vec<Shape>
    where
        I: IntoIterator<Item = Shape>,
    {
        self.failing.clear();
        std::mem::replace(&mut self.shapes, shapes.into_iter().collect())
    }

    pub fn remove(&mut self, index: usize) -> Option<Shape> {
        if index >= self.shapes.len() {
            return None;
        }
        self.failing.clear();
        Some(self.shapes.remove(index))
    }

    pub fn objects(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn objects_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Apply title and icon to a freshly created surface
    pub fn attach<B: Backend>(&self, backend: &mut B) -> Result<(), DrawError> {
        if let Some(title) = &self.config.title {
            backend.set_title(title);
        }
        if let Some(icon) = &self.config.icon {
            backend.set_icon(icon)?;
        }
        Ok(())
    }

    /// Run one iteration of the frame loop without pacing.
    ///
    /// Shape draw failures are logged and reported, never propagated; only
    /// a failure to present the frame is returned as an error.
    pub fn render_frame<B: Backend>(
        &mut self,
        backend: &mut B,
        frame: FrameTime,
    ) -> Result<FrameReport, DrawError> {
        for event in backend.poll_events() {
            match event {
                WindowEvent::CloseRequested => {
                    info!("close requested");
                    self.stop();
                }
                WindowEvent::Resized { width, height } => {
                    debug!("surface resized to {width}x{height}");
                }
            }
        }

        backend.clear(self.config.background);

        let mut report = FrameReport::default();
        for (index, shape) in self.shapes.iter().enumerate() {
            match shape.draw(backend) {
                Ok(()) => {
                    report.drawn += 1;
                    if self.failing.remove(&index).is_some() {
                        info!("frame {}: {shape} draws again", frame.index);
                    }
                }
                Err(err) => {
                    let message = err.to_string();
                    if self.failing.get(&index) == Some(&message) {
                        debug!("frame {}: skipping {shape}: {message}", frame.index);
                    } else {
                        warn!("frame {}: skipping {shape}: {message}", frame.index);
                        report.newly_failing.push(index);
                        self.failing.insert(index, message);
                    }
                    report.failures.push((index, err));
                }
            }
        }

        if let Some(hook) = self.update.as_mut() {
            let keys = backend.pressed_keys();
            let mut tick = Tick {
                keys: &keys,
                shapes: &mut self.shapes,
                frame,
                running: &mut self.running,
            };
            hook(&mut tick);
        }

        backend.present()?;
        Ok(report)
    }

    /// Drive frames at `fps` until stopped
    pub fn display<B: Backend>(&mut self, backend: &mut B, fps: f64) -> Result<(), DrawError> {
        self.attach(backend)?;
        let mut pacer = FramePacer::new(fps);
        info!("starting frame loop at {fps} fps with {} shapes", self.shapes.len());

        while self.running {
            let frame = pacer.begin();
            self.render_frame(backend, frame)?;
            pacer.wait();
        }

        info!("frame loop stopped");
        Ok(())
    }
}

impl fmt::Debug for World {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("World")
            .field("config", &self.config)
            .field("shapes", &self.shapes)
            .field("update", &self.update.is_some())
            .field("running", &self.running)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::Texture;
    use crate::canvas::Key;
    use crate::recording::{DrawCommand, RecordingCanvas};
    use crate::transform::RotationState;

    fn frame(index: u64) -> FrameTime {
        FrameTime { dt: 0.0, index }
    }

    #[test]
    fn test_defaults() {
        let world = World::new(WorldConfig::default()).unwrap();
        assert_eq!(world.config().background, Color::BLACK);
        assert_eq!((world.config().width, world.config().height), (800, 600));
        assert_eq!(world.center(), Point3::new(400.0, 300.0, 0.0));
        assert!(world.is_running());
        assert!(world.objects().is_empty());
    }

    #[test]
    fn test_zero_window_rejected() {
        let config = WorldConfig {
            width: 0,
            ..WorldConfig::default()
        };
        assert!(matches!(World::new(config), Err(ConfigError::WindowSize { .. })));
    }

    #[test]
    fn test_shapes_default_to_world_center() {
        let world = World::new(WorldConfig {
            width: 1000,
            height: 800,
            ..WorldConfig::default()
        })
        .unwrap();
        let cube = world.cube(50.0).build().unwrap();
        assert_eq!(cube.position, Point3::new(500.0, 400.0, 0.0));
    }

    #[test]
    fn test_add_and_remove() {
        let mut world = World::new(WorldConfig::default()).unwrap();
        let prism = world.prism(100.0).build().unwrap();
        world.add_objects([prism.clone(), world.cube(10.0).build().unwrap()]);
        assert_eq!(world.objects().len(), 2);
        assert_eq!(world.objects()[0], prism);

        assert_eq!(world.remove(0), Some(prism));
        assert_eq!(world.remove(5), None);
        assert_eq!(world.objects().len(), 1);
    }

    #[test]
    fn test_hook_mutations_visible_next_frame() {
        let mut world = World::new(WorldConfig::default())
            .unwrap()
            .with_update(|tick: &mut Tick<'_>| {
                if tick.keys.is_pressed(Key::Char('d')) {
                    for shape in tick.shapes.iter_mut() {
                        shape.rotation.rotate(0.01, 0.01, 0.01);
                    }
                }
            });
        world.add(world.cube(50.0).build().unwrap());

        let mut canvas = RecordingCanvas::new(800, 600);
        canvas.script_keys([Key::Char('d')].into_iter().collect());
        world.render_frame(&mut canvas, frame(0)).unwrap();

        let r = world.objects()[0].rotation;
        assert!((r.x - 0.01).abs() < 1e-12);
        assert_eq!(r, RotationState::new(r.x, r.x, r.x));
    }

    #[test]
    fn test_set_objects_replaces() {
        let mut world = World::new(WorldConfig::default()).unwrap();
        world.add(world.cube(10.0).build().unwrap());
        world.add_objects([world.cube(20.0).build().unwrap()]);
        assert_eq!(world.objects().len(), 2);

        let prism = world.prism(30.0).build().unwrap();
        let previous = world.set_objects([prism.clone()]);
        assert_eq!(previous.len(), 2);
        assert_eq!(previous[1].size, 20.0);
        assert_eq!(world.objects(), &[prism]);
    }

    /// Largest horizontal distance from the window centre among fill points
    fn fill_extent(commands: &[DrawCommand]) -> f64 {
        commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillPolygon { points, .. } => Some(points),
                _ => None,
            })
            .flatten()
            .map(|p| (p.x - 400.0).abs())
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_hook_runs_after_draw_before_present() {
        let mut world = World::new(WorldConfig::default())
            .unwrap()
            .with_update(|tick: &mut Tick<'_>| {
                for shape in tick.shapes.iter_mut() {
                    shape.size += 10.0;
                }
            });
        let cube = world.cube(50.0).build().unwrap();
        world.add_objects([cube.clone(), cube]);

        let mut canvas = RecordingCanvas::new(800, 600);
        world.render_frame(&mut canvas, frame(0)).unwrap();
        let first = canvas.take_commands();
        assert_eq!(first.last(), Some(&DrawCommand::Present));
        let fills = first
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillPolygon { .. }))
            .count();
        assert_eq!(fills, 12);
        // Both cubes were drawn at the old size, including the second one
        assert_eq!(fill_extent(&first), 25.0);
        assert_eq!(world.objects()[1].size, 60.0);

        world.render_frame(&mut canvas, frame(1)).unwrap();
        let second = canvas.take_commands();
        assert_eq!(fill_extent(&second), 30.0);
        assert_eq!(canvas.frames_presented(), 2);
    }

    #[test]
    fn test_persistent_failure_reported_once() {
        let mut world = World::new(WorldConfig::default()).unwrap();
        world.add_objects([
            world
                .cube(10.0)
                .appearance(Texture::image("crate.png"))
                .build()
                .unwrap(),
            world.cube(10.0).build().unwrap(),
        ]);
        let mut canvas = RecordingCanvas::new(800, 600);

        let report = world.render_frame(&mut canvas, frame(0)).unwrap();
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.newly_failing, vec![0]);

        let report = world.render_frame(&mut canvas, frame(1)).unwrap();
        assert_eq!(report.failures.len(), 1);
        assert!(report.newly_failing.is_empty());

        canvas.register_image("crate.png", 4, 4);
        let report = world.render_frame(&mut canvas, frame(2)).unwrap();
        assert!(report.failures.is_empty());
        assert_eq!(report.drawn, 2);

        world.objects_mut()[0].appearance = Texture::image("gone.png").into();
        let report = world.render_frame(&mut canvas, frame(3)).unwrap();
        assert_eq!(report.newly_failing, vec![0]);
    }

    #[test]
    fn test_close_request_stops_after_frame() {
        let mut world = World::new(WorldConfig::default()).unwrap();
        let mut canvas = RecordingCanvas::new(800, 600);
        canvas.script_events(vec![WindowEvent::CloseRequested]);

        world.display(&mut canvas, 0.0).unwrap();
        assert!(!world.is_running());
        assert_eq!(canvas.frames_presented(), 1);
        assert_eq!(
            canvas.commands(),
            &[DrawCommand::Clear(Color::BLACK), DrawCommand::Present]
        );
    }

    #[test]
    fn test_hook_can_stop_loop() {
        let mut ticks = 0;
        let mut world = World::new(WorldConfig::default())
            .unwrap()
            .with_update(move |tick: &mut Tick<'_>| {
                ticks += 1;
                if ticks == 3 {
                    tick.stop();
                }
            });
        let mut canvas = RecordingCanvas::new(800, 600);
        world.display(&mut canvas, 0.0).unwrap();
        assert_eq!(canvas.frames_presented(), 3);
    }

    #[test]
    fn test_attach_sets_title_and_icon() {
        let world = World::new(WorldConfig {
            title: Some("demo".to_string()),
            icon: Some("icon.png".into()),
            ..WorldConfig::default()
        })
        .unwrap();

        let mut missing = RecordingCanvas::new(800, 600);
        assert!(world.attach(&mut missing).is_err());

        let mut canvas = RecordingCanvas::new(800, 600);
        canvas.register_image("icon.png", 32, 32);
        world.attach(&mut canvas).unwrap();
        assert_eq!(canvas.title(), Some("demo"));
        assert_eq!(canvas.icon(), Some(std::path::Path::new("icon.png")));
    }
}
