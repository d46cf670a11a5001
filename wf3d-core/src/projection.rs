/// Orthographic projection to screen space
use nalgebra::{Point2, Point3, Vector2, Vector3};

/// Project rotated vertices by dropping z and offsetting by the shape's screen position.
///
/// No clipping is performed; points may land outside the surface.
pub fn project_orthographic(rotated: &[Vector3<f64>], position: &Point3<f64>) -> Vec<Point2<f64>> {
    let offset = Vector2::new(position.x, position.y);
    rotated
        .iter()
        .map(|v| Point2::from(v.xy() + offset))
        .collect()
}

/// Arithmetic mean of a set of screen points
pub fn centroid(points: &[Point2<f64>]) -> Option<Point2<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector2::zeros(), |acc, p| acc + p.coords);
    Some(Point2::from(sum / points.len() as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_drops_z() {
        let rotated = vec![Vector3::new(10.0, -5.0, 99.0), Vector3::new(0.0, 0.0, -3.0)];
        let projected = project_orthographic(&rotated, &Point3::new(400.0, 300.0, 7.0));
        assert_eq!(projected, vec![Point2::new(410.0, 295.0), Point2::new(400.0, 300.0)]);
    }

    #[test]
    fn test_centroid() {
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ];
        assert_eq!(centroid(&square), Some(Point2::new(1.0, 1.0)));
        assert_eq!(centroid(&[]), None);
    }
}
