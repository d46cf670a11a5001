/// Shape kinds, local vertex generation and fixed topology
use nalgebra::Vector3;
use std::fmt;

/// Index pair into a shape's local vertices
pub type Edge = (usize, usize);

/// Ordered index sequence into a shape's local vertices
pub type Face = &'static [usize];

#[rustfmt::skip]
const CUBE_EDGES: [Edge; 12] = [
    (0, 1), (1, 3), (3, 2), (2, 0),
    (4, 5), (5, 7), (7, 6), (6, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

const CUBE_FACES: [Face; 6] = [
    &[0, 1, 3, 2],
    &[4, 5, 7, 6],
    &[0, 4, 6, 2],
    &[1, 5, 7, 3],
    &[0, 1, 5, 4],
    &[2, 3, 7, 6],
];

#[rustfmt::skip]
const PRISM_EDGES: [Edge; 9] = [
    (0, 1), (1, 2), (2, 0),
    (3, 4), (4, 5), (5, 3),
    (0, 3), (1, 4), (2, 5),
];

const PRISM_FACES: [Face; 5] = [
    &[0, 1, 2],
    &[3, 4, 5],
    &[0, 1, 4, 3],
    &[1, 2, 5, 4],
    &[0, 2, 5, 3],
];

/// The concrete polyhedra a shape can be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cube,
    /// Triangular prism
    Prism,
}

impl ShapeKind {
    /// Parse a scene-file kind name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "cube" => Some(ShapeKind::Cube),
            "prism" | "triangle" => Some(ShapeKind::Prism),
            _ => None,
        }
    }

    pub fn vertex_count(self) -> usize {
        match self {
            ShapeKind::Cube => 8,
            ShapeKind::Prism => 6,
        }
    }

    /// Generate local vertices from the shape size and its z position.
    ///
    /// `z` is added to `size` rather than treated as depth, so moving a
    /// shape along z grows or shrinks it on screen.
    pub fn local_vertices(self, size: f64, z: f64) -> Vec<Vector3<f64>> {
        let extent = size + z;
        match self {
            ShapeKind::Cube => cube_vertices(extent),
            ShapeKind::Prism => prism_vertices(extent),
        }
    }

    pub fn edges(self) -> &'static [Edge] {
        match self {
            ShapeKind::Cube => &CUBE_EDGES,
            ShapeKind::Prism => &PRISM_EDGES,
        }
    }

    pub fn faces(self) -> &'static [Face] {
        match self {
            ShapeKind::Cube => &CUBE_FACES,
            ShapeKind::Prism => &PRISM_FACES,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Cube => f.write_str("cube"),
            ShapeKind::Prism => f.write_str("prism"),
        }
    }
}

// Edges and faces index this enumeration positionally: x outer, y middle,
// z inner, each walking +half then -half.
fn cube_vertices(extent: f64) -> Vec<Vector3<f64>> {
    let half = extent / 2.0;
    let signs = [half, -half];
    let mut vertices = Vec::with_capacity(8);
    for x in signs {
        for y in signs {
            for z in signs {
                vertices.push(Vector3::new(x, y, z));
            }
        }
    }
    vertices
}

fn prism_vertices(extent: f64) -> Vec<Vector3<f64>> {
    let half = extent / 2.0;
    let third = extent / 3.0;
    vec![
        Vector3::new(-half, -third, -half),
        Vector3::new(half, -third, -half),
        Vector3::new(0.0, third, -half),
        Vector3::new(-half, -third, half),
        Vector3::new(half, -third, half),
        Vector3::new(0.0, third, half),
    ]
}
