//! World → screen projection
//!
//! 2D scenes are drawn in plan (x right, y up). 3D scenes use an orthographic
//! orbit view given by elevation and azimuth in degrees, the same angles a
//! plotting library's 3D axes use.

use nalgebra::{Matrix2x3, Point2, Point3};
use serde::{Deserialize, Serialize};

use crate::core::Dimension;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum View {
    Plan,
    Orbit { elevation: f64, azimuth: f64 },
}

impl View {
    pub fn for_dimension(dimension: Dimension, elevation: f64, azimuth: f64) -> Self {
        match dimension {
            Dimension::Two => View::Plan,
            Dimension::Three => View::Orbit { elevation, azimuth },
        }
    }

    /// Rows are the world-space screen right and screen up vectors
    pub fn screen_axes(&self) -> Matrix2x3<f64> {
        match *self {
            View::Plan => Matrix2x3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0),
            View::Orbit { elevation, azimuth } => {
                let (sin_el, cos_el) = elevation.to_radians().sin_cos();
                let (sin_az, cos_az) = azimuth.to_radians().sin_cos();
                Matrix2x3::new(
                    -sin_az,
                    cos_az,
                    0.0,
                    -sin_el * cos_az,
                    -sin_el * sin_az,
                    cos_el,
                )
            }
        }
    }

    pub fn project(&self, point: &Point3<f64>) -> Point2<f64> {
        Point2::from(self.screen_axes() * point.coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_plan_view_drops_z() {
        let view = View::for_dimension(Dimension::Two, 30.0, -60.0);
        assert_eq!(view, View::Plan);
        assert_eq!(view.project(&Point3::new(1.5, -2.0, 7.0)), Point2::new(1.5, -2.0));
    }

    #[test]
    fn test_orbit_from_above_matches_plan() {
        let view = View::Orbit {
            elevation: 90.0,
            azimuth: -90.0,
        };
        let p = view.project(&Point3::new(3.0, 4.0, 100.0));
        assert_relative_eq!(p.x, 3.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn test_orbit_side_view_puts_z_up() {
        let view = View::Orbit {
            elevation: 0.0,
            azimuth: 0.0,
        };
        let p = view.project(&Point3::new(9.0, 2.0, 5.0));
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_orbit_preserves_lengths_along_screen_plane() {
        let view = View::for_dimension(Dimension::Three, 30.0, -60.0);
        let axes = view.screen_axes();
        let right = axes.row(0);
        let up = axes.row(1);
        assert_relative_eq!(right.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(up.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(right.dot(&up), 0.0, epsilon = 1e-12);
    }
}
