//! Partition visualization - figures of parallel octree/quadtree construction
//!
//! Reads per-rank point files and node-box files written by a distributed
//! tree build, colors everything by owning rank and draws:
//! - dotted wireframes for each node box (cubes in 3D, squares in 2D)
//! - point markers on top of the structure
//!
//! The figure is saved as PNG; with the `viewer` feature it can also be shown
//! in a window.

pub mod canvas;
pub mod config;
pub mod core;
pub mod error;
pub mod scenario;
pub mod theme;

#[cfg(feature = "viewer")]
pub mod viewer;

#[cfg(test)]
mod test_support;

pub use config::RenderConfig;
pub use error::{Result, VisError};
pub use scenario::{RunReport, Scenario};
