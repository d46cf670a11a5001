/// Scene files: window settings plus a list of shapes, in TOML
use log::debug;
use nalgebra::Point3;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::appearance::{Appearance, Color, Texture};
use crate::error::ConfigError;
use crate::geometry::ShapeKind;
use crate::shape::{Shape, ShapeBuilder};
use crate::transform::RotationState;
use crate::world::{World, WorldConfig};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub icon: Option<PathBuf>,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_fps")]
    pub fps: f64,
}

/// One scene entry; `kind` is checked when the world is built
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectConfig {
    pub kind: String,
    pub size: f64,
    #[serde(default)]
    pub position: Option<[f64; 3]>,
    #[serde(default)]
    pub rotation: Option<[f64; 3]>,
    #[serde(default)]
    pub outline_height: OutlineHeightValue,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub image: Option<PathBuf>,
}

/// Outline height as written in the file; only TOML integers are accepted
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OutlineHeightValue {
    Integer(i64),
    Float(f64),
}

impl Default for OutlineHeightValue {
    fn default() -> Self {
        Self::Integer(1)
    }
}

impl OutlineHeightValue {
    pub fn to_pixels(self) -> Result<u32, ConfigError> {
        match self {
            Self::Integer(n) => u32::try_from(n)
                .ok()
                .filter(|&n| n > 0)
                .ok_or(ConfigError::OutlineHeight(n as f64)),
            Self::Float(v) => Err(ConfigError::OutlineHeight(v)),
        }
    }
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_background() -> Color {
    Color::BLACK
}

fn default_fps() -> f64 {
    30.0
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: None,
            icon: None,
            background: default_background(),
            fps: default_fps(),
        }
    }
}

impl WindowConfig {
    pub fn world_config(&self) -> WorldConfig {
        WorldConfig {
            background: self.background,
            width: self.width,
            height: self.height,
            title: self.title.clone(),
            icon: self.icon.clone(),
        }
    }
}

impl ObjectConfig {
    fn appearance(&self) -> Appearance {
        match (&self.image, self.color) {
            (None, Some(color)) => Appearance::Color(color),
            (None, None) => Appearance::default(),
            (Some(image), color) => Appearance::Texture(Texture::new(Some(image.clone()), color)),
        }
    }

    /// Turn the entry into a shape builder seeded with the world's centre
    fn builder(&self, index: usize, world: &World) -> Result<ShapeBuilder, ConfigError> {
        let kind = ShapeKind::from_name(&self.kind).ok_or_else(|| ConfigError::NotAShape {
            index,
            kind: self.kind.clone(),
        })?;

        let mut builder = world
            .shape(kind, self.size)
            .appearance(self.appearance())
            .outline_height(self.outline_height.to_pixels()?);
        if let Some([x, y, z]) = self.position {
            builder = builder.position(Point3::new(x, y, z));
        }
        if let Some([x, y, z]) = self.rotation {
            builder = builder.rotation(RotationState::new(x, y, z));
        }
        Ok(builder)
    }
}

impl FromStr for SceneConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl SceneConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded scene file {}", path.display());
        text.parse()
    }

    /// Build every object, all or nothing
    pub fn build_shapes(&self, world: &World) -> Result<Vec<Shape>, ConfigError> {
        self.objects
            .iter()
            .enumerate()
            .map(|(index, object)| object.builder(index, world)?.build())
            .collect()
    }

    /// Add this scene's objects to `world`.
    ///
    /// If any entry is invalid the world's collection is left unchanged.
    pub fn populate(&self, world: &mut World) -> Result<usize, ConfigError> {
        let shapes = self.build_shapes(world)?;
        let count = shapes.len();
        world.add_objects(shapes);
        Ok(count)
    }

    /// Create a world from the window section and fill it with the objects
    pub fn build_world(&self) -> Result<World, ConfigError> {
        let mut world = World::new(self.window.world_config())?;
        self.populate(&mut world)?;
        Ok(world)
    }
}
