//! Reconstruction and composition core - shared by the CLI and the viewer

pub mod geometry;
pub mod palette;
pub mod parser;
pub mod records;
pub mod scene;
pub mod source;

pub use geometry::{BoxGeometry, Bounds, Quad, Segment};
pub use palette::{Color, Palette, DEFAULT_PALETTE};
pub use parser::{parse_nodes, parse_points, NodeLayout};
pub use records::{Dimension, NodeBox, PointSet, Rank};
pub use scene::{RankedBox, RankedPoints, Scene, SceneBuilder, SceneStyle};
pub use source::{optional, NodeSource};
