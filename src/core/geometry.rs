//! Box geometry derived from center + size node records
//!
//! Corners are indexed by bit pattern: bit 0 selects max x, bit 1 max y and
//! bit 2 max z. Two corners share an edge when their indices differ in
//! exactly one bit.

use nalgebra::{Point3, Vector3};

use super::records::{Dimension, NodeBox};

/// Straight segment between two points
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Point3<f64>,
    pub to: Point3<f64>,
}

/// Planar quadrilateral, corners in drawing order
pub type Quad = [Point3<f64>; 4];

/// Axis-aligned square (2D) or cube (3D)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxGeometry {
    min: Point3<f64>,
    size: f64,
    dimension: Dimension,
}

impl BoxGeometry {
    pub fn from_node(node: &NodeBox, dimension: Dimension) -> Self {
        let half = node.half_extent();
        let offset = match dimension {
            Dimension::Two => Vector3::new(half, half, 0.0),
            Dimension::Three => Vector3::new(half, half, half),
        };
        Self {
            min: node.center - offset,
            size: node.size,
            dimension,
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn half_extent(&self) -> f64 {
        self.size / 2.0
    }

    pub fn min_corner(&self) -> Point3<f64> {
        self.min
    }

    pub fn max_corner(&self) -> Point3<f64> {
        self.min + self.extent()
    }

    pub fn center(&self) -> Point3<f64> {
        self.min + self.extent() / 2.0
    }

    fn extent(&self) -> Vector3<f64> {
        match self.dimension {
            Dimension::Two => Vector3::new(self.size, self.size, 0.0),
            Dimension::Three => Vector3::new(self.size, self.size, self.size),
        }
    }

    fn corner(&self, index: usize) -> Point3<f64> {
        let pick = |bit: usize, lo: f64| if index & bit != 0 { lo + self.size } else { lo };
        Point3::new(pick(1, self.min.x), pick(2, self.min.y), pick(4, self.min.z))
    }

    fn corner_count(&self) -> usize {
        1 << self.dimension.axes()
    }

    /// 4 corners in 2D, 8 in 3D
    pub fn corners(&self) -> Vec<Point3<f64>> {
        (0..self.corner_count()).map(|i| self.corner(i)).collect()
    }

    /// Outline edges: 4 in 2D, 12 in 3D
    pub fn edges(&self) -> Vec<Segment> {
        let count = self.corner_count();
        let mut edges = Vec::with_capacity(if count == 4 { 4 } else { 12 });
        for a in 0..count {
            for bit in [1, 2, 4] {
                let b = a | bit;
                if b != a && b < count {
                    edges.push(Segment {
                        from: self.corner(a),
                        to: self.corner(b),
                    });
                }
            }
        }
        edges
    }

    /// Wireframe faces. 2D: the square itself. 3D: bottom, top, then the
    /// x-min, x-max, y-min and y-max sides.
    pub fn faces(&self) -> Vec<Quad> {
        // corner indices of each face, walked around its perimeter
        const SQUARE: [usize; 4] = [0, 1, 3, 2];
        const CUBE: [[usize; 4]; 6] = [
            [0, 1, 3, 2],
            [4, 5, 7, 6],
            [0, 2, 6, 4],
            [1, 3, 7, 5],
            [0, 1, 5, 4],
            [2, 3, 7, 6],
        ];

        let quad = |idx: &[usize; 4]| idx.map(|i| self.corner(i));
        match self.dimension {
            Dimension::Two => vec![quad(&SQUARE)],
            Dimension::Three => CUBE.iter().map(quad).collect(),
        }
    }

    /// Closed containment test
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        let max = self.max_corner();
        let axes = self.dimension.axes();
        (0..axes).all(|axis| point[axis] >= self.min[axis] && point[axis] <= max[axis])
    }
}

/// Running axis-aligned bounds of everything in a scene
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Default for Bounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl Bounds {
    /// Bounds initialised to infinity values
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    pub fn include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }

    pub fn include_box(&mut self, geometry: &BoxGeometry) {
        self.include(&geometry.min_corner());
        self.include(&geometry.max_corner());
    }

    /// The 8 corners of the bounds (duplicates collapse for flat bounds)
    pub fn corners(&self) -> [Point3<f64>; 8] {
        std::array::from_fn(|i| {
            Point3::new(
                if i & 1 != 0 { self.max.x } else { self.min.x },
                if i & 2 != 0 { self.max.y } else { self.min.y },
                if i & 4 != 0 { self.max.z } else { self.min.z },
            )
        })
    }
}
