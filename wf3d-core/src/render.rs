/// Face and edge rasterization policy
///
/// Faces are filled in their declared order and edges are drawn afterwards
/// as an overlay. There is no depth sorting.
use nalgebra::{Point2, Vector2};

use crate::appearance::{Appearance, Color, FaceFill};
use crate::canvas::{Canvas, ImageSize};
use crate::error::DrawError;
use crate::geometry::{Edge, Face};
use crate::projection::centroid;

/// Color used for every edge outline
pub const OUTLINE_COLOR: Color = Color::BLACK;

pub fn draw_faces<C: Canvas>(
    canvas: &mut C,
    projected: &[Point2<f64>],
    faces: &[Face],
    appearance: &Appearance,
) -> Result<(), DrawError> {
    let fill = appearance.face_fill();
    for face in faces {
        let points = gather(projected, face)?;
        match fill {
            FaceFill::Color(color) => canvas.fill_polygon(color, &points),
            FaceFill::Image(path) => {
                // Loaded per face, every frame.
                let image = canvas.load_image(path)?;
                if let Some(center) = centroid(&points) {
                    canvas.blit(&image, image_top_left(&image, center));
                }
            }
            FaceFill::Skip => {}
        }
    }
    Ok(())
}

pub fn draw_edges<C: Canvas>(
    canvas: &mut C,
    projected: &[Point2<f64>],
    edges: &[Edge],
    width: u32,
) -> Result<(), DrawError> {
    for &(a, b) in edges {
        let from = vertex(projected, a)?;
        let to = vertex(projected, b)?;
        canvas.draw_line(OUTLINE_COLOR, from, to, width);
    }
    Ok(())
}

/// Top-left corner that centres an unscaled image on `center`
pub fn image_top_left<I: ImageSize>(image: &I, center: Point2<f64>) -> Point2<f64> {
    center - Vector2::new(image.width() as f64 / 2.0, image.height() as f64 / 2.0)
}

fn vertex(projected: &[Point2<f64>], index: usize) -> Result<Point2<f64>, DrawError> {
    projected.get(index).copied().ok_or(DrawError::Topology {
        index,
        len: projected.len(),
    })
}

fn gather(projected: &[Point2<f64>], face: &[usize]) -> Result<Vec<Point2<f64>>, DrawError> {
    face.iter().map(|&i| vertex(projected, i)).collect()
}
