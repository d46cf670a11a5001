/// Posed, rotatable polyhedral shapes
use log::trace;
use nalgebra::{Point2, Point3, Vector3};
use std::fmt;

use crate::appearance::Appearance;
use crate::canvas::Canvas;
use crate::error::{ConfigError, DrawError, ShapeError};
use crate::geometry::{Edge, Face, ShapeKind};
use crate::projection::project_orthographic;
use crate::render;
use crate::transform::{Axis, RotationState, Transform};

/// Edge line width in pixels; always a positive integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutlineHeight(u32);

impl OutlineHeight {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for OutlineHeight {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u32> for OutlineHeight {
    type Error = ConfigError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value == 0 {
            return Err(ConfigError::OutlineHeight(0.0));
        }
        Ok(Self(value))
    }
}

/// A cube or prism with a pose and an appearance.
///
/// `position`, `rotation`, `size` and `appearance` are meant to be changed
/// freely between frames; everything derived from them is recomputed on
/// each draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    kind: ShapeKind,
    outline_height: OutlineHeight,
    pub position: Point3<f64>,
    pub rotation: RotationState,
    pub size: f64,
    pub appearance: Appearance,
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn outline_height(&self) -> u32 {
        self.outline_height.get()
    }

    pub fn set_outline_height(&mut self, height: u32) -> Result<(), ConfigError> {
        self.outline_height = OutlineHeight::try_from(height)?;
        Ok(())
    }

    pub fn edges(&self) -> &'static [Edge] {
        self.kind.edges()
    }

    pub fn faces(&self) -> &'static [Face] {
        self.kind.faces()
    }

    /// Set one rotation angle to an explicit value.
    ///
    /// Incrementing `rotation` directly from an update hook is the usual way
    /// to animate a shape; this is a convenience setter.
    pub fn rotate(&mut self, axis: Axis, value: f64) {
        self.rotation.set(axis, value);
    }

    /// Set a rotation angle addressed by name (`"x"`, `"angle_y"`, ...).
    ///
    /// Unknown selectors leave every angle unchanged.
    pub fn rotate_named(&mut self, selector: &str, value: f64) -> Result<(), ShapeError> {
        let axis = selector.parse::<Axis>()?;
        self.rotate(axis, value);
        Ok(())
    }

    /// Set a rotation angle addressed by numeric selector (`ANGLE_X`, ...)
    pub fn rotate_index(&mut self, selector: u8, value: f64) -> Result<(), ShapeError> {
        let axis = Axis::try_from(selector)?;
        self.rotate(axis, value);
        Ok(())
    }

    /// Vertices in the shape's own frame, regenerated from `size` and `position.z`
    pub fn local_vertices(&self) -> Vec<Vector3<f64>> {
        self.kind.local_vertices(self.size, self.position.z)
    }

    /// Rotate and project the local vertices to screen space
    pub fn project(&self) -> Vec<Point2<f64>> {
        let rotated = Transform::rotate_vertices(&self.local_vertices(), &self.rotation);
        project_orthographic(&rotated, &self.position)
    }

    /// Draw filled faces, then edge outlines, onto `canvas`
    pub fn draw<C: Canvas>(&self, canvas: &mut C) -> Result<(), DrawError> {
        let projected = self.project();
        trace!("drawing {} with {} projected vertices", self, projected.len());
        render::draw_faces(canvas, &projected, self.faces(), &self.appearance)?;
        render::draw_edges(canvas, &projected, self.edges(), self.outline_height())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}(size={}, position=[{}, {}, {}])",
            self.kind, self.size, self.position.x, self.position.y, self.position.z
        )
    }
}

/// Builder validating shape construction parameters.
///
/// Shapes are positioned on a particular screen, so builders normally come
/// from [`World::shape`](crate::World::shape), which starts them at that
/// world's centre.
#[derive(Debug, Clone)]
pub struct ShapeBuilder {
    kind: ShapeKind,
    size: f64,
    position: Point3<f64>,
    rotation: RotationState,
    appearance: Appearance,
    outline_height: u32,
}

impl ShapeBuilder {
    pub fn new(kind: ShapeKind, size: f64, center: Point3<f64>) -> Self {
        Self {
            kind,
            size,
            position: center,
            rotation: RotationState::zero(),
            appearance: Appearance::default(),
            outline_height: 1,
        }
    }

    pub fn position(mut self, position: Point3<f64>) -> Self {
        self.position = position;
        self
    }

    pub fn rotation(mut self, rotation: RotationState) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn appearance(mut self, appearance: impl Into<Appearance>) -> Self {
        self.appearance = appearance.into();
        self
    }

    /// Line width for edges in pixels; zero is rejected by `build`
    pub fn outline_height(mut self, height: u32) -> Self {
        self.outline_height = height;
        self
    }

    pub fn build(self) -> Result<Shape, ConfigError> {
        let outline_height = OutlineHeight::try_from(self.outline_height)?;
        Ok(Shape {
            kind: self.kind,
            outline_height,
            position: self.position,
            rotation: self.rotation,
            size: self.size,
            appearance: self.appearance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{ANGLE_X, ANGLE_Z};

    fn cube(size: f64) -> ShapeBuilder {
        ShapeBuilder::new(ShapeKind::Cube, size, Point3::new(400.0, 300.0, 0.0))
    }

    fn prism(size: f64) -> ShapeBuilder {
        ShapeBuilder::new(ShapeKind::Prism, size, Point3::new(400.0, 300.0, 0.0))
    }

    #[test]
    fn test_rotate_sets_single_axis() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let mut shape = prism(100.0).build().unwrap();
            shape.rotate(axis, 1.5);
            for other in [Axis::X, Axis::Y, Axis::Z] {
                let expected = if other == axis { 1.5 } else { 0.0 };
                assert_eq!(shape.rotation.get(other), expected);
            }
        }
    }

    #[test]
    fn test_rotate_invalid_selector() {
        let mut shape = cube(100.0).build().unwrap();
        shape.rotation = RotationState::new(0.5, 0.25, 0.125);

        assert!(matches!(shape.rotate_named("w", 1.0), Err(ShapeError::InvalidAxis(_))));
        assert!(shape.rotate_index(7, 1.0).is_err());
        assert_eq!(shape.rotation, RotationState::new(0.5, 0.25, 0.125));

        shape.rotate_named("angle_x", 69.0).unwrap();
        shape.rotate_index(ANGLE_Z, -1.0).unwrap();
        assert_eq!(shape.rotation, RotationState::new(69.0, 0.25, -1.0));
        assert!(shape.rotate_index(ANGLE_X, 0.0).is_ok());
    }

    #[test]
    fn test_outline_height_must_be_positive() {
        let err = cube(100.0).outline_height(0).build().unwrap_err();
        assert!(matches!(err, ConfigError::OutlineHeight(h) if h == 0.0));

        let mut shape = prism(100.0).outline_height(3).build().unwrap();
        assert_eq!(shape.outline_height(), 3);

        assert!(shape.set_outline_height(0).is_err());
        assert_eq!(shape.outline_height(), 3);
        shape.set_outline_height(5).unwrap();
        assert_eq!(shape.outline_height(), 5);
    }

    #[test]
    fn test_defaults() {
        let center = Point3::new(12.0, 34.0, 0.0);
        let shape = ShapeBuilder::new(ShapeKind::Cube, 50.0, center).build().unwrap();
        assert_eq!(shape.kind(), ShapeKind::Cube);
        assert_eq!(shape.position, center);
        assert_eq!(shape.rotation, RotationState::zero());
        assert_eq!(shape.outline_height(), 1);
        assert_eq!(shape.appearance, Appearance::default());
    }

    #[test]
    fn test_project_centres_on_position() {
        let shape = cube(100.0)
            .position(Point3::new(10.0, 20.0, 0.0))
            .build()
            .unwrap();
        let projected = shape.project();
        assert_eq!(projected.len(), 8);
        assert_eq!(projected[0], Point2::new(60.0, 70.0));
        assert_eq!(projected[7], Point2::new(-40.0, -30.0));
    }

    #[test]
    fn test_display() {
        let shape = prism(100.0)
            .position(Point3::new(1.0, 2.0, 0.0))
            .build()
            .unwrap();
        assert_eq!(shape.to_string(), "prism(size=100, position=[1, 2, 0])");
    }
}
