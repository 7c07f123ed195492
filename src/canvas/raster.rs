//! CPU raster canvas backed by an `image::RgbImage`
//!
//! The frame is fitted once, at construction, to the projected scene bounds
//! with the same scale on both screen axes so squares stay square.

use std::path::Path;

use image::{Rgb, RgbImage};
use nalgebra::{Point2, Point3};
use tracing::{debug, info};

use super::{Canvas, Marker, Stroke, View};
use crate::core::{Bounds, Color};
use crate::error::Result;
use crate::theme::colors;

/// Fraction of the shorter image side kept free around the plot area
const MARGIN: f64 = 0.06;

/// Mapping from projected world space to pixel space
#[derive(Clone, Copy, Debug)]
struct Frame {
    origin: Point2<f64>,
    scale: f64,
    left: f64,
    bottom: f64,
}

impl Frame {
    fn fit(width: u32, height: u32, view: &View, bounds: &Bounds) -> Self {
        let bounds = if bounds.is_empty() {
            let mut unit = Bounds::empty();
            unit.include(&Point3::origin());
            unit.include(&Point3::new(1.0, 1.0, 1.0));
            unit
        } else {
            *bounds
        };

        let (mut lo, mut hi) = (
            Point2::new(f64::INFINITY, f64::INFINITY),
            Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        );
        for corner in bounds.corners() {
            let p = view.project(&corner);
            lo = lo.inf(&p);
            hi = hi.sup(&p);
        }

        // a single point or a flat line still needs a non-zero span
        for axis in 0..2 {
            if hi[axis] - lo[axis] < f64::EPSILON {
                lo[axis] -= 0.5;
                hi[axis] += 0.5;
            }
        }

        let (w, h) = (f64::from(width), f64::from(height));
        let margin = w.min(h) * MARGIN;
        let span = hi - lo;
        let scale = ((w - 2.0 * margin) / span.x).min((h - 2.0 * margin) / span.y);

        Self {
            origin: lo,
            scale,
            left: (w - span.x * scale) / 2.0,
            bottom: h - (h - span.y * scale) / 2.0,
        }
    }

    fn to_pixel(&self, p: &Point2<f64>) -> Point2<f64> {
        Point2::new(
            self.left + (p.x - self.origin.x) * self.scale,
            self.bottom - (p.y - self.origin.y) * self.scale,
        )
    }
}

pub struct RasterCanvas {
    image: RgbImage,
    view: View,
    frame: Frame,
}

impl RasterCanvas {
    /// Blank figure sized to show everything inside `bounds`
    pub fn new(width: u32, height: u32, view: View, bounds: &Bounds) -> Self {
        let frame = Frame::fit(width, height, &view, bounds);
        debug!(width, height, ?view, scale = frame.scale, "Raster frame fitted");

        let mut canvas = Self {
            image: RgbImage::from_pixel(width, height, rgb(colors::BACKGROUND)),
            view,
            frame,
        };
        canvas.draw_border();
        canvas
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Pixel position of a world-space point
    pub fn to_pixel(&self, point: &Point3<f64>) -> Point2<f64> {
        self.frame.to_pixel(&self.view.project(point))
    }

    /// Encode as PNG (format chosen from the extension)
    pub fn save(&self, path: &Path) -> Result<()> {
        self.image.save(path)?;
        info!(path = %path.display(), "Figure saved");
        Ok(())
    }

    fn draw_border(&mut self) {
        let (w, h) = (self.image.width() as i64, self.image.height() as i64);
        if w == 0 || h == 0 {
            return;
        }
        let color = rgb(colors::FRAME);
        for x in 0..w {
            self.plot(x, 0, color);
            self.plot(x, h - 1, color);
        }
        for y in 0..h {
            self.plot(0, y, color);
            self.plot(w - 1, y, color);
        }
    }

    fn plot(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && x < self.image.width() as i64 && y < self.image.height() as i64 {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Filled disc; radii under one pixel set a single pixel
    fn dab(&mut self, center: &Point2<f64>, radius: f64, color: Rgb<u8>) {
        if radius < 1.0 {
            self.plot(center.x.round() as i64, center.y.round() as i64, color);
            return;
        }
        let r2 = radius * radius;
        let (x0, x1) = ((center.x - radius).floor() as i64, (center.x + radius).ceil() as i64);
        let (y0, y1) = ((center.y - radius).floor() as i64, (center.y + radius).ceil() as i64);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let (dx, dy) = (x as f64 + 0.5 - center.x, y as f64 + 0.5 - center.y);
                if dx * dx + dy * dy <= r2 {
                    self.plot(x, y, color);
                }
            }
        }
    }
}

impl Canvas for RasterCanvas {
    fn line(&mut self, from: &Point3<f64>, to: &Point3<f64>, stroke: &Stroke) {
        let (a, b) = (self.to_pixel(from), self.to_pixel(to));
        let length = (b - a).norm();
        let steps = (length * 2.0).ceil().max(1.0) as usize;
        let color = rgb(stroke.color);
        let radius = f64::from(stroke.width) / 2.0;
        let dashes = stroke
            .style
            .dash_pattern(stroke.width)
            .map(|(on, off)| (f64::from(on), f64::from(on + off)));

        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            if let Some((on, period)) = dashes {
                if (t * length) % period >= on {
                    continue;
                }
            }
            let p = a + (b - a) * t;
            self.dab(&p, radius, color);
        }
    }

    fn markers(&mut self, points: &[Point3<f64>], marker: &Marker) {
        let color = rgb(marker.color);
        let radius = f64::from(marker.radius);
        for point in points {
            let p = self.to_pixel(point);
            self.dab(&p, radius, color);
        }
    }
}

fn rgb(color: Color) -> Rgb<u8> {
    Rgb([color.r, color.g, color.b])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::LineStyle;
    use crate::test_support::ScratchDir;

    fn unit_square() -> Bounds {
        let mut bounds = Bounds::empty();
        bounds.include(&Point3::new(-2.0, -2.0, 0.0));
        bounds.include(&Point3::new(2.0, 2.0, 0.0));
        bounds
    }

    #[test]
    fn test_plan_frame_is_centered_and_equal_aspect() {
        let canvas = RasterCanvas::new(200, 100, View::Plan, &unit_square());

        let center = canvas.to_pixel(&Point3::origin());
        assert!((center.x - 100.0).abs() < 1e-9);
        assert!((center.y - 50.0).abs() < 1e-9);

        // same pixel length along x and y, y axis points up
        let right = canvas.to_pixel(&Point3::new(1.0, 0.0, 0.0));
        let up = canvas.to_pixel(&Point3::new(0.0, 1.0, 0.0));
        assert!(((right.x - center.x) - (center.y - up.y)).abs() < 1e-9);
        assert!(up.y < center.y);
    }

    #[test]
    fn test_marker_paints_projected_pixel() {
        let mut canvas = RasterCanvas::new(100, 100, View::Plan, &unit_square());
        let red = Color::from_rgb(255, 0, 0);
        canvas.markers(&[Point3::new(1.0, 1.0, 0.0)], &Marker { color: red, radius: 3.0 });

        let p = canvas.to_pixel(&Point3::new(1.0, 1.0, 0.0));
        let pixel = canvas.image().get_pixel(p.x as u32, p.y as u32);
        assert_eq!(*pixel, Rgb([255, 0, 0]));
    }

    #[test]
    fn test_dotted_line_leaves_gaps() {
        let bounds = unit_square();
        let blue = Color::from_rgb(0, 0, 255);
        let count = |style: LineStyle| {
            let mut canvas = RasterCanvas::new(100, 100, View::Plan, &bounds);
            let stroke = Stroke { color: blue, width: 1.0, style };
            canvas.line(&Point3::new(-2.0, 0.0, 0.0), &Point3::new(2.0, 0.0, 0.0), &stroke);
            canvas.image().pixels().filter(|p| **p == Rgb([0, 0, 255])).count()
        };

        let solid = count(LineStyle::Solid);
        let dotted = count(LineStyle::Dotted);
        assert!(solid > 0);
        assert!(dotted > 0 && dotted < solid, "dotted {dotted} vs solid {solid}");
    }

    #[test]
    fn test_empty_bounds_still_produce_a_figure() {
        let canvas = RasterCanvas::new(50, 40, View::Plan, &Bounds::empty());
        assert_eq!(canvas.image().dimensions(), (50, 40));
        assert_eq!(*canvas.image().get_pixel(25, 20), rgb(colors::BACKGROUND));
        assert_eq!(*canvas.image().get_pixel(0, 0), rgb(colors::FRAME));
    }

    #[test]
    fn test_save_png() {
        let scratch = ScratchDir::new("raster_save");
        let path = scratch.path().join("figure.png");
        let canvas = RasterCanvas::new(32, 32, View::Plan, &unit_square());
        canvas.save(&path).unwrap();

        let reloaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(reloaded.dimensions(), (32, 32));
    }
}
