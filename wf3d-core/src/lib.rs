/// wf3d Core Library - Shape geometry, rotation and draw ordering
///
/// This library provides the backend-agnostic core of the renderer: shape
/// vertex generation, the three-axis rotation transform, orthographic
/// projection, the face/edge rasterization policy and the frame driver.
/// Backends plug in through the `Canvas` and `Backend` traits.

pub mod appearance;
pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod recording;
pub mod render;
pub mod shape;
pub mod time;
pub mod transform;
pub mod world;

// Re-export commonly used types
pub use appearance::{Appearance, Color, FaceFill, Texture};
pub use canvas::{Backend, Canvas, ImageSize, Key, KeySnapshot, WindowEvent};
pub use config::SceneConfig;
pub use error::{ConfigError, DrawError, ShapeError};
pub use geometry::ShapeKind;
pub use recording::{DrawCommand, RecordingCanvas};
pub use shape::{Shape, ShapeBuilder};
pub use time::{FramePacer, FrameTime};
pub use transform::{Axis, RotationState, Transform, ANGLE_X, ANGLE_Y, ANGLE_Z};
pub use world::{FrameReport, Tick, World, WorldConfig};
