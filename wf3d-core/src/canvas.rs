/// Drawing and windowing traits implemented by rendering backends
use nalgebra::Point2;
use std::collections::HashSet;
use std::path::Path;

use crate::appearance::Color;
use crate::error::DrawError;

/// Pixel dimensions of a loaded image
pub trait ImageSize {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Drawing primitives a shape needs to rasterize itself
pub trait Canvas {
    type Image: ImageSize;

    fn clear(&mut self, color: Color);

    /// Fill a polygon whose points are given in winding order
    fn fill_polygon(&mut self, color: Color, points: &[Point2<f64>]);

    fn draw_line(&mut self, color: Color, from: Point2<f64>, to: Point2<f64>, width: u32);

    fn load_image(&mut self, path: &Path) -> Result<Self::Image, DrawError>;

    fn blit(&mut self, image: &Self::Image, top_left: Point2<f64>);
}

/// Keys the frame driver can report to update hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Space,
    Enter,
    Esc,
}

/// Keys held down at the start of a tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySnapshot {
    pressed: HashSet<Key>,
}

impl KeySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.pressed.iter()
    }
}

impl FromIterator<Key> for KeySnapshot {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self {
            pressed: iter.into_iter().collect(),
        }
    }
}

/// Window-level events delivered by a backend
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    CloseRequested,
    Resized { width: u32, height: u32 },
}

/// A window surface with event polling and frame presentation
pub trait Backend: Canvas {
    /// Logical surface size in pixels
    fn size(&self) -> (u32, u32);

    fn set_title(&mut self, title: &str);

    fn set_icon(&mut self, path: &Path) -> Result<(), DrawError>;

    fn poll_events(&mut self) -> Vec<WindowEvent>;

    fn pressed_keys(&mut self) -> KeySnapshot;

    fn present(&mut self) -> Result<(), DrawError>;
}
