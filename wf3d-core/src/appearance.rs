/// Colors, textures and how a face gets filled
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

/// An image and/or a solid color for a shape's faces.
///
/// When both are set the image wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Texture {
    pub image: Option<PathBuf>,
    pub color: Option<Color>,
}

impl Texture {
    pub fn new(image: Option<PathBuf>, color: Option<Color>) -> Self {
        Self { image, color }
    }

    pub fn image(path: impl Into<PathBuf>) -> Self {
        Self {
            image: Some(path.into()),
            color: None,
        }
    }

    pub fn color(color: impl Into<Color>) -> Self {
        Self {
            image: None,
            color: Some(color.into()),
        }
    }
}

/// What a shape's faces look like
#[derive(Debug, Clone, PartialEq)]
pub enum Appearance {
    Color(Color),
    Texture(Texture),
}

impl Appearance {
    /// Resolve how every face of the shape should be filled this frame
    pub fn face_fill(&self) -> FaceFill<'_> {
        match self {
            Appearance::Color(color) => FaceFill::Color(*color),
            Appearance::Texture(Texture { image: Some(path), .. }) => FaceFill::Image(path),
            Appearance::Texture(Texture {
                image: None,
                color: Some(color),
            }) => FaceFill::Color(*color),
            Appearance::Texture(Texture {
                image: None,
                color: None,
            }) => FaceFill::Skip,
        }
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Appearance::Color(Color::WHITE)
    }
}

impl From<Color> for Appearance {
    fn from(color: Color) -> Self {
        Appearance::Color(color)
    }
}

impl From<Texture> for Appearance {
    fn from(texture: Texture) -> Self {
        Appearance::Texture(texture)
    }
}

/// Resolved fill for a face
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FaceFill<'a> {
    Color(Color),
    Image(&'a Path),
    Skip,
}
