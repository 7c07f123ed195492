//! Drawing surfaces a scene can be rendered onto
//!
//! A [`Canvas`] receives world-space primitives; each backend owns its own
//! projection to screen space.

mod commands;
pub mod projection;
mod raster;

use nalgebra::Point3;

use crate::core::Color;

pub use commands::{CommandList, DrawCommand};
pub use projection::View;
pub use raster::RasterCanvas;

/// Stroke pattern of a line
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineStyle {
    Solid,
    #[default]
    Dotted,
}

impl LineStyle {
    /// `(on, off)` run lengths in pixels for a stroke of `width`, or `None`
    /// for a continuous line
    pub fn dash_pattern(self, width: f32) -> Option<(f32, f32)> {
        let width = width.max(1.0);
        match self {
            LineStyle::Solid => None,
            LineStyle::Dotted => Some((width * 1.5, width * 2.0)),
        }
    }
}

/// How a line is drawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Color,
    /// Pixels
    pub width: f32,
    pub style: LineStyle,
}

/// How a scattered point is drawn
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub color: Color,
    /// Disc radius in pixels
    pub radius: f32,
}

/// Render target for scene primitives
pub trait Canvas {
    fn line(&mut self, from: &Point3<f64>, to: &Point3<f64>, stroke: &Stroke);

    fn markers(&mut self, points: &[Point3<f64>], marker: &Marker);
}
