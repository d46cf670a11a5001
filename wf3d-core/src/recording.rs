/// Headless backend that records draw calls instead of rasterizing them
use nalgebra::Point2;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use crate::appearance::Color;
use crate::canvas::{Backend, Canvas, ImageSize, KeySnapshot, WindowEvent};
use crate::error::DrawError;

/// A single recorded drawing primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillPolygon {
        color: Color,
        points: Vec<Point2<f64>>,
    },
    Line {
        color: Color,
        from: Point2<f64>,
        to: Point2<f64>,
        width: u32,
    },
    Blit {
        path: PathBuf,
        top_left: Point2<f64>,
    },
    Present,
}

/// Image handle resolved from the registered size table
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedImage {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ImageSize for RecordedImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// Backend for tests and headless runs.
///
/// Events and key snapshots are scripted per frame; anything not scripted
/// polls as empty.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    width: u32,
    height: u32,
    title: Option<String>,
    icon: Option<PathBuf>,
    images: HashMap<PathBuf, (u32, u32)>,
    events: VecDeque<Vec<WindowEvent>>,
    keys: VecDeque<KeySnapshot>,
    commands: Vec<DrawCommand>,
    frames: usize,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Make `path` loadable with the given pixel size
    pub fn register_image(&mut self, path: impl Into<PathBuf>, width: u32, height: u32) {
        self.images.insert(path.into(), (width, height));
    }

    /// Queue the events returned by the next `poll_events` call
    pub fn script_events(&mut self, events: Vec<WindowEvent>) {
        self.events.push_back(events);
    }

    /// Queue the keys returned by the next `pressed_keys` call
    pub fn script_keys(&mut self, keys: KeySnapshot) {
        self.keys.push_back(keys);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn frames_presented(&self) -> usize {
        self.frames
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn icon(&self) -> Option<&Path> {
        self.icon.as_deref()
    }
}

impl Canvas for RecordingCanvas {
    type Image = RecordedImage;

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_polygon(&mut self, color: Color, points: &[Point2<f64>]) {
        self.commands.push(DrawCommand::FillPolygon {
            color,
            points: points.to_vec(),
        });
    }

    fn draw_line(&mut self, color: Color, from: Point2<f64>, to: Point2<f64>, width: u32) {
        self.commands.push(DrawCommand::Line {
            color,
            from,
            to,
            width,
        });
    }

    fn load_image(&mut self, path: &Path) -> Result<Self::Image, DrawError> {
        let (width, height) = self.images.get(path).copied().ok_or_else(|| DrawError::Image {
            path: path.to_path_buf(),
            reason: "not registered".to_string(),
        })?;
        Ok(RecordedImage {
            path: path.to_path_buf(),
            width,
            height,
        })
    }

    fn blit(&mut self, image: &Self::Image, top_left: Point2<f64>) {
        self.commands.push(DrawCommand::Blit {
            path: image.path.clone(),
            top_left,
        });
    }
}

impl Backend for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }

    fn set_icon(&mut self, path: &Path) -> Result<(), DrawError> {
        self.load_image(path)?;
        self.icon = Some(path.to_path_buf());
        Ok(())
    }

    fn poll_events(&mut self) -> Vec<WindowEvent> {
        self.events.pop_front().unwrap_or_default()
    }

    fn pressed_keys(&mut self) -> KeySnapshot {
        self.keys.pop_front().unwrap_or_default()
    }

    fn present(&mut self) -> Result<(), DrawError> {
        self.commands.push(DrawCommand::Present);
        self.frames += 1;
        Ok(())
    }
}
