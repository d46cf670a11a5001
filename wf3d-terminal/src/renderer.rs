/// Cell-buffer rasterizer for terminal rendering
use crossterm::{
    cursor::MoveTo,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor},
    QueueableCommand,
};
use image::RgbaImage;
use nalgebra::Point2;
use std::io::Write;
use std::path::Path;
use wf3d_core::{Canvas, Color, DrawError, ImageSize};

/// Image decoded for blitting into cells
pub struct TerminalImage {
    pixels: RgbaImage,
}

impl TerminalImage {
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn open(path: &Path) -> Result<Self, DrawError> {
        let pixels = image::open(path)
            .map_err(|e| DrawError::Image {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            .to_rgba8();
        Ok(Self { pixels })
    }
}

impl ImageSize for TerminalImage {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }
}

/// A grid of colored cells covering a logical pixel surface.
///
/// Drawing calls take logical pixel coordinates; each cell covers
/// `width / cols` by `height / rows` pixels.
pub struct CellBuffer {
    cols: usize,
    rows: usize,
    logical: (u32, u32),
    cells: Vec<Color>,
}

impl CellBuffer {
    pub fn new(cols: usize, rows: usize, logical: (u32, u32)) -> Self {
        Self {
            cols,
            rows,
            logical,
            cells: vec![Color::BLACK; cols * rows],
        }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![Color::BLACK; cols * rows];
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<Color> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    fn scale(&self) -> (f64, f64) {
        (
            self.cols as f64 / self.logical.0 as f64,
            self.rows as f64 / self.logical.1 as f64,
        )
    }

    fn to_cells(&self, p: Point2<f64>) -> (f64, f64) {
        let (sx, sy) = self.scale();
        (p.x * sx, p.y * sy)
    }

    fn set(&mut self, col: i64, row: i64, color: Color) {
        if col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows {
            self.cells[row as usize * self.cols + col as usize] = color;
        }
    }

    fn rasterize_triangle(&mut self, v0: (f64, f64), v1: (f64, f64), v2: (f64, f64), color: Color) {
        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor().max(0.0) as i64;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil().min(self.cols as f64 - 1.0) as i64;
        let min_y = v0.1.min(v1.1).min(v2.1).floor().max(0.0) as i64;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil().min(self.rows as f64 - 1.0) as i64;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f64 + 0.5, y as f64 + 0.5);
                if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.set(x, y, color);
                    }
                }
            }
        }
    }

    /// Write the buffer to the terminal, one row at a time
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current: Option<Color> = None;
        for row in 0..self.rows {
            writer.queue(MoveTo(0, row as u16))?;
            for col in 0..self.cols {
                let color = self.cells[row * self.cols + col];
                if current != Some(color) {
                    writer.queue(SetBackgroundColor(term_color(color)))?;
                    current = Some(color);
                }
                writer.queue(Print(' '))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Canvas for CellBuffer {
    type Image = TerminalImage;

    fn clear(&mut self, color: Color) {
        self.cells.fill(color);
    }

    /// Fill a convex polygon as a triangle fan around its first point
    fn fill_polygon(&mut self, color: Color, points: &[Point2<f64>]) {
        if points.len() < 3 {
            return;
        }
        let cells: Vec<(f64, f64)> = points.iter().map(|p| self.to_cells(*p)).collect();
        for i in 1..cells.len() - 1 {
            self.rasterize_triangle(cells[0], cells[i], cells[i + 1], color);
        }
    }

    fn draw_line(&mut self, color: Color, from: Point2<f64>, to: Point2<f64>, width: u32) {
        let (sx, _) = self.scale();
        let stroke = ((width as f64 * sx).round() as i64).max(1);
        let lo = -(stroke - 1) / 2;
        let hi = stroke / 2;

        let (x0, y0) = self.to_cells(from);
        let (x1, y1) = self.to_cells(to);
        let (mut x, mut y) = (x0.floor() as i64, y0.floor() as i64);
        let (x1, y1) = (x1.floor() as i64, y1.floor() as i64);

        // Bresenham
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let step_x = if x < x1 { 1 } else { -1 };
        let step_y = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            for oy in lo..=hi {
                for ox in lo..=hi {
                    self.set(x + ox, y + oy, color);
                }
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += step_x;
            }
            if e2 <= dx {
                err += dx;
                y += step_y;
            }
        }
    }

    fn load_image(&mut self, path: &Path) -> Result<Self::Image, DrawError> {
        TerminalImage::open(path)
    }

    /// Copy an image at its natural pixel size, sampling one pixel per cell
    fn blit(&mut self, image: &Self::Image, top_left: Point2<f64>) {
        let (sx, sy) = self.scale();
        let (left, top) = self.to_cells(top_left);
        let cols = (image.width() as f64 * sx).round() as i64;
        let rows = (image.height() as f64 * sy).round() as i64;
        if cols == 0 || rows == 0 {
            return;
        }

        for row in 0..rows {
            for col in 0..cols {
                let px = ((col as f64 + 0.5) / sx) as u32;
                let py = ((row as f64 + 0.5) / sy) as u32;
                let pixel = image
                    .pixels
                    .get_pixel(px.min(image.width() - 1), py.min(image.height() - 1));
                let [r, g, b, a] = pixel.0;
                if a >= 128 {
                    let (x, y) = (left.floor() as i64 + col, top.floor() as i64 + row);
                    self.set(x, y, Color::rgb(r, g, b));
                }
            }
        }
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-9 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Color = Color::rgb(255, 0, 0);

    // 10x10 cells over a 100x100 logical surface: one cell per 10 px.
    fn buffer() -> CellBuffer {
        CellBuffer::new(10, 10, (100, 100))
    }

    #[test]
    fn test_clear() {
        let mut buf = buffer();
        buf.clear(Color::WHITE);
        assert_eq!(buf.cell(0, 0), Some(Color::WHITE));
        assert_eq!(buf.cell(9, 9), Some(Color::WHITE));
        assert_eq!(buf.cell(10, 0), None);
    }

    #[test]
    fn test_fill_square_either_winding() {
        let square = [
            Point2::new(20.0, 20.0),
            Point2::new(60.0, 20.0),
            Point2::new(60.0, 60.0),
            Point2::new(20.0, 60.0),
        ];
        for points in [square.to_vec(), square.iter().rev().copied().collect()] {
            let mut buf = buffer();
            buf.fill_polygon(RED, &points);
            assert_eq!(buf.cell(3, 3), Some(RED));
            assert_eq!(buf.cell(5, 5), Some(RED));
            assert_eq!(buf.cell(1, 1), Some(Color::BLACK));
            assert_eq!(buf.cell(7, 3), Some(Color::BLACK));
        }
    }

    #[test]
    fn test_degenerate_polygon_draws_nothing() {
        let mut buf = buffer();
        let flat = [
            Point2::new(50.0, 10.0),
            Point2::new(50.0, 10.0),
            Point2::new(50.0, 90.0),
            Point2::new(50.0, 90.0),
        ];
        buf.fill_polygon(RED, &flat);
        assert!((0..10).all(|r| (0..10).all(|c| buf.cell(c, r) == Some(Color::BLACK))));
    }

    #[test]
    fn test_line_covers_endpoints() {
        let mut buf = buffer();
        buf.draw_line(RED, Point2::new(5.0, 5.0), Point2::new(95.0, 95.0), 1);
        for i in 0..10 {
            assert_eq!(buf.cell(i, i), Some(RED));
        }
        assert_eq!(buf.cell(1, 0), Some(Color::BLACK));
    }

    #[test]
    fn test_line_offscreen_is_clipped() {
        let mut buf = buffer();
        buf.draw_line(RED, Point2::new(-50.0, 55.0), Point2::new(150.0, 55.0), 1);
        assert!((0..10).all(|c| buf.cell(c, 5) == Some(RED)));
    }

    #[test]
    fn test_blit_skips_transparent_pixels() {
        let mut pixels = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 255, 255]));
        pixels.put_pixel(15, 15, Rgba([0, 0, 0, 0]));
        let image = TerminalImage::from_rgba(pixels);

        let mut buf = buffer();
        buf.blit(&image, Point2::new(40.0, 40.0));
        assert_eq!(buf.cell(4, 4), Some(Color::rgb(0, 0, 255)));
        assert_eq!(buf.cell(5, 5), Some(Color::BLACK));
        assert_eq!(buf.cell(6, 6), Some(Color::BLACK));
    }

    #[test]
    fn test_missing_image() {
        let mut buf = buffer();
        let err = buf.load_image(Path::new("/nonexistent/wf3d.png")).err();
        assert!(matches!(err, Some(DrawError::Image { .. })));
    }

    #[test]
    fn test_draw_emits_every_row() {
        let buf = CellBuffer::new(3, 2, (30, 20));
        let mut out = Vec::new();
        buf.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(' ').count(), 6);
    }
}
