/// Rotation state and the three-axis rotation transform
use nalgebra::{Matrix3, Vector3};
use std::fmt;
use std::str::FromStr;

use crate::error::ShapeError;

/// Numeric selector for the X angle, kept for callers that address axes by index.
pub const ANGLE_X: u8 = 0;
/// Numeric selector for the Y angle.
pub const ANGLE_Y: u8 = 1;
/// Numeric selector for the Z angle.
pub const ANGLE_Z: u8 = 2;

/// One of the three rotation axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl TryFrom<u8> for Axis {
    type Error = ShapeError;

    fn try_from(selector: u8) -> Result<Self, Self::Error> {
        match selector {
            ANGLE_X => Ok(Axis::X),
            ANGLE_Y => Ok(Axis::Y),
            ANGLE_Z => Ok(Axis::Z),
            other => Err(ShapeError::InvalidAxis(other.to_string())),
        }
    }
}

impl FromStr for Axis {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" | "angle_x" => Ok(Axis::X),
            "y" | "angle_y" => Ok(Axis::Y),
            "z" | "angle_z" => Ok(Axis::Z),
            _ => Err(ShapeError::InvalidAxis(s.to_string())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// Rotation state around three axes (in radians)
///
/// Angles are unbounded; wrapping happens implicitly through the
/// periodicity of `sin`/`cos`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Overwrite a single angle, leaving the other two untouched
    pub fn set(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Rotation matrices about each axis, rebuilt from the angles on every call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrices {
    pub x: Matrix3<f64>,
    pub y: Matrix3<f64>,
    pub z: Matrix3<f64>,
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    #[rustfmt::skip]
    pub fn rotation_x(angle: f64) -> Matrix3<f64> {
        let (s, c) = angle.sin_cos();
        Matrix3::new(
            1.0, 0.0, 0.0,
            0.0, c, -s,
            0.0, s, c,
        )
    }

    #[rustfmt::skip]
    pub fn rotation_y(angle: f64) -> Matrix3<f64> {
        let (s, c) = angle.sin_cos();
        Matrix3::new(
            c, 0.0, s,
            0.0, 1.0, 0.0,
            -s, 0.0, c,
        )
    }

    #[rustfmt::skip]
    pub fn rotation_z(angle: f64) -> Matrix3<f64> {
        let (s, c) = angle.sin_cos();
        Matrix3::new(
            c, -s, 0.0,
            s, c, 0.0,
            0.0, 0.0, 1.0,
        )
    }

    /// Create the three per-axis rotation matrices from a rotation state
    pub fn rotation_matrices(rotation: &RotationState) -> RotationMatrices {
        RotationMatrices {
            x: Self::rotation_x(rotation.x),
            y: Self::rotation_y(rotation.y),
            z: Self::rotation_z(rotation.z),
        }
    }

    /// Rotate a vertex set.
    ///
    /// Vertices are treated as the rows of an N×3 matrix `V` and multiplied
    /// on the right in the fixed order X, Y, Z: `((V·Rx)·Ry)·Rz`. The order is
    /// part of the visual contract and must not change.
    pub fn rotate_vertices(
        vertices: &[Vector3<f64>],
        rotation: &RotationState,
    ) -> Vec<Vector3<f64>> {
        let m = Self::rotation_matrices(rotation);
        vertices
            .iter()
            .map(|v| {
                let row = v.transpose() * m.x;
                let row = row * m.y;
                let row = row * m.z;
                row.transpose()
            })
            .collect()
    }
}
