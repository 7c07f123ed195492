//! Geometric records emitted by the tree-construction workers
//!
//! Points and node boxes are always stored as 3D points; 2D records carry
//! `z = 0` and the owning set remembers its [`Dimension`].

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Worker identifier, 0-based
pub type Rank = usize;

/// Spatial dimension of a scene (quadtree vs. octree)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Two,
    Three,
}

impl Dimension {
    /// Number of coordinates per point
    pub fn axes(self) -> usize {
        match self {
            Dimension::Two => 2,
            Dimension::Three => 3,
        }
    }

    /// Build a point from the leading `axes()` values of a record
    pub fn point(self, coords: &[f64]) -> Point3<f64> {
        match self {
            Dimension::Two => Point3::new(coords[0], coords[1], 0.0),
            Dimension::Three => Point3::new(coords[0], coords[1], coords[2]),
        }
    }
}

/// Ordered points owned by one rank
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    pub rank: Rank,
    pub dimension: Dimension,
    pub points: Vec<Point3<f64>>,
}

impl PointSet {
    pub fn new(rank: Rank, dimension: Dimension, points: Vec<Point3<f64>>) -> Self {
        Self {
            rank,
            dimension,
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Tree node encoded as center + uniform edge length.
///
/// `rank` is present only for records read from a global node file; per-rank
/// records take their owner from the file they came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeBox {
    pub center: Point3<f64>,
    pub size: f64,
    pub rank: Option<Rank>,
}

impl NodeBox {
    pub fn new(center: Point3<f64>, size: f64) -> Self {
        Self {
            center,
            size,
            rank: None,
        }
    }

    pub fn with_rank(mut self, rank: Rank) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn half_extent(&self) -> f64 {
        self.size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_point() {
        assert_eq!(Dimension::Two.axes(), 2);
        assert_eq!(Dimension::Three.axes(), 3);
        assert_eq!(Dimension::Two.point(&[1.0, 2.0]), Point3::new(1.0, 2.0, 0.0));
        assert_eq!(
            Dimension::Three.point(&[1.0, 2.0, 3.0, 9.0]),
            Point3::new(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_node_box_rank() {
        let node = NodeBox::new(Point3::origin(), 2.0);
        assert_eq!(node.rank, None);
        assert_eq!(node.half_extent(), 1.0);
        assert_eq!(node.with_rank(3).rank, Some(3));
    }
}
